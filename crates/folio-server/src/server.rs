use tokio::net::TcpListener;

use folio_cms::Cms;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// Folio HTTP server.
pub struct FolioServer {
    config: ServerConfig,
}

impl FolioServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the content store and build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        let cms = Cms::open(&self.config.cms_config())?;
        Ok(build_router(AppState::new(cms)))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            environment = %self.config.environment,
            "Folio listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_cms::Environment;

    #[test]
    fn server_construction() {
        let server = FolioServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:4567".parse().unwrap());
    }

    #[test]
    fn router_creates_content_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            root: dir.path().to_path_buf(),
            environment: Environment::Test,
            ..ServerConfig::default()
        };
        let _router = FolioServer::new(config).router().unwrap();
        assert!(dir.path().join("test/data").is_dir());
    }
}
