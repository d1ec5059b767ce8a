//! Web server for CORKBOARD.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::Database;

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the bulletin board.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let sessions = Arc::new(SessionStore::new(&config.session.secret));
        let app_state = Arc::new(AppState::new(db, sessions, &config.auth.admin_email));

        Self { addr, app_state }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn router(&self) -> axum::Router {
        create_router(self.app_state.clone()).merge(create_health_router())
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
