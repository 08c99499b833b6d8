//! HTTP client for the game-server directory

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

use crate::application::errors::DirectoryError;
use crate::domain::entities::ServerEntry;
use crate::domain::traits::Directory;

/// Fetches the server listing as JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: Client,
    url: String,
}

impl HttpDirectory {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crymp-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn fetch_servers(&self) -> Result<Vec<ServerEntry>, DirectoryError> {
        let response = self.client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api/servers", addr)
    }

    fn directory(url: String) -> HttpDirectory {
        HttpDirectory::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_and_decodes_listing() {
        let app = Router::new().route(
            "/api/servers",
            get(|headers: axum::http::HeaderMap| async move {
                assert_eq!(headers.get("accept").unwrap(), "application/json");
                r#"[{"name":"A","numpl":0},{"name":"B","numpl":3,"maxpl":10,"players":[{"name":"p","kills":1,"deaths":2}]}]"#
            }),
        );
        let servers = directory(serve(app).await).fetch_servers().await.unwrap();

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[1].numpl, 3);
        assert_eq!(servers[1].players[0].deaths, 2);
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let app = Router::new().route(
            "/api/servers",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "[]") }),
        );
        let err = directory(serve(app).await).fetch_servers().await.unwrap_err();
        assert_eq!(err, DirectoryError::Status(503));
    }

    #[tokio::test]
    async fn test_malformed_body_fails() {
        let app = Router::new().route("/api/servers", get(|| async { "<html>maintenance</html>" }));
        let err = directory(serve(app).await).fetch_servers().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_fails() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = directory(format!("http://{}/api/servers", addr)).fetch_servers().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Request(_)));
    }
}
