use serde::{Deserialize, Serialize};

/// Game server as listed by the directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerEntry {
    pub name: String,
    pub numpl: u32,
    pub maxpl: u32,
    pub map: String,
    /// Seconds left on the current map
    pub ntimel: u64,
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerEntry {
    pub name: String,
    pub kills: i64,
    pub deaths: i64,
}

impl ServerEntry {
    pub fn is_active(&self) -> bool {
        self.numpl > 0
    }
}

/// Total players across a listing
pub fn total_players(servers: &[ServerEntry]) -> u64 {
    servers.iter().map(|s| u64::from(s.numpl)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_entries_use_defaults() {
        let servers: Vec<ServerEntry> =
            serde_json::from_str(r#"[{"name":"A","numpl":0},{"name":"B","numpl":3,"maxpl":10}]"#)
                .unwrap();
        assert_eq!(servers.len(), 2);
        assert!(!servers[0].is_active());
        assert_eq!(servers[1].maxpl, 10);
        assert!(servers[1].players.is_empty());
        assert_eq!(total_players(&servers), 3);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let server: ServerEntry = serde_json::from_str(
            r#"{"name":"X","numpl":1,"maxpl":32,"map":"mesa","ntimel":90,"ip":"1.2.3.4",
                "players":[{"name":"p","kills":3,"deaths":1,"team":2}]}"#,
        )
        .unwrap();
        assert_eq!(server.players[0].kills, 3);
        assert_eq!(server.map, "mesa");
    }
}
