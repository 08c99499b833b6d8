use async_trait::async_trait;

use crate::application::errors::DirectoryError;
use crate::domain::entities::ServerEntry;

/// Source of the game-server listing
#[async_trait]
pub trait Directory: Send + Sync {
    async fn fetch_servers(&self) -> Result<Vec<ServerEntry>, DirectoryError>;
}
