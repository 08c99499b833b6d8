//! `online` - who is playing on the directory's servers

use std::sync::Arc;

use async_trait::async_trait;
use regex_lite::Regex;

use crate::application::errors::CommandError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::{Command, CommandHandler, ServerEntry};
use crate::domain::traits::Directory;

pub const NAME: &str = "online";

pub const NO_PLAYERS_REPLY: &str = "There are no online players right now 😞";
pub const FILTER_TOO_SHORT_REPLY: &str = "Server name must be at least 3 characters long";
pub const NOT_FOUND_REPLY: &str = "No server found with such name";

/// Shortest accepted server-name filter, in characters
pub const MIN_FILTER_CHARS: usize = 3;

pub struct OnlineCommand {
    directory: Arc<dyn Directory>,
}

impl OnlineCommand {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    pub fn command(directory: Arc<dyn Directory>) -> Command {
        Command::new(NAME, Self::new(directory))
            .with_description("List active servers, or show one server in detail")
            .with_usage("!online [server name]")
    }
}

#[async_trait]
impl CommandHandler for OnlineCommand {
    async fn execute(&self, ctx: CommandContext) -> Result<(), CommandError> {
        let reply = if ctx.args.is_empty() {
            let servers = self.directory.fetch_servers().await?;
            summary_reply(&servers)
        } else if ctx.rest.chars().count() < MIN_FILTER_CHARS {
            FILTER_TOO_SHORT_REPLY.to_string()
        } else {
            let servers = self.directory.fetch_servers().await?;
            filtered_reply(&servers, &ctx.rest)?
        };
        ctx.reply(reply).await
    }
}

/// Active servers with a player total
pub fn summary_reply(servers: &[ServerEntry]) -> String {
    let active: Vec<&ServerEntry> = servers.iter().filter(|s| s.is_active()).collect();
    if active.is_empty() {
        return NO_PLAYERS_REPLY.to_string();
    }

    let total: u64 = active.iter().map(|s| u64::from(s.numpl)).sum();
    let lines: Vec<String> = active
        .iter()
        .map(|s| format!(" ▪ {}: {}/{}", s.name, s.numpl, s.maxpl))
        .collect();

    format!(
        "There are {} currently played servers with total of {} active players:\n{}",
        active.len(),
        total,
        lines.join("\n")
    )
}

/// Reply for `online <filter>`; `filter` is already trimmed and long enough
pub fn filtered_reply(servers: &[ServerEntry], filter: &str) -> Result<String, CommandError> {
    let pattern = filter_pattern(filter)?;
    let matches: Vec<&ServerEntry> = servers.iter().filter(|s| pattern.is_match(&s.name)).collect();

    let server = match matches.as_slice() {
        [] => return Ok(NOT_FOUND_REPLY.to_string()),
        [only] => *only,
        many => match exact_match(many, filter) {
            Some(server) => server,
            None => {
                let names: Vec<String> = many.iter().map(|s| format!(" ▪ {}", s.name)).collect();
                return Ok(format!(
                    "Found {} servers with similar name, pick one:\n{}",
                    many.len(),
                    names.join("\n")
                ));
            }
        },
    };

    Ok(server_details(server))
}

/// Case-insensitive pattern where whitespace in the filter matches anything
pub fn filter_pattern(filter: &str) -> Result<Regex, CommandError> {
    let fragments: Vec<String> = filter.split_whitespace().map(regex_lite::escape).collect();
    Regex::new(&format!("(?i){}", fragments.join(".*")))
        .map_err(|e| CommandError::InvalidArgs(format!("bad server filter {filter:?}: {e}")))
}

fn exact_match<'a>(candidates: &[&'a ServerEntry], filter: &str) -> Option<&'a ServerEntry> {
    let wanted = filter.trim().to_lowercase();
    let mut exact = candidates.iter().filter(|s| s.name.trim().to_lowercase() == wanted);
    match (exact.next(), exact.next()) {
        (Some(server), None) => Some(*server),
        _ => None,
    }
}

pub fn server_details(server: &ServerEntry) -> String {
    let mut lines = vec![
        server.name.clone(),
        format!(" Online: {} / {}", server.numpl, server.maxpl),
        format!(" Map: {}", server.map),
        format!(" Time left: {}", format_time_left(server.ntimel)),
    ];

    if server.numpl > 0 && !server.players.is_empty() {
        lines.push(" Players:".to_string());
        lines.extend(
            server
                .players
                .iter()
                .map(|p| format!("  {} with {} kills and {} deaths", p.name, p.kills, p.deaths)),
        );
    }

    lines.join("\n")
}

pub fn format_time_left(seconds: u64) -> String {
    if seconds == 0 {
        return "-".to_string();
    }
    format!("{} hours, {} minutes", seconds / 3600, seconds / 60 % 60)
}
