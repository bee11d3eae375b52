use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::AppConfig;
use crate::directory::MojangDirectory;
use crate::identity::IdentityResolver;
use crate::store::{PlayerStore, SqlitePlayerStore};

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let db_path = AppConfig::database_path();
        let store: Arc<dyn PlayerStore> = Arc::new(SqlitePlayerStore::open(&db_path)?);
        let directory = Arc::new(MojangDirectory::new(&self.config.directory)?);
        info!("Serving players from {}", db_path);

        let state = Arc::new(AppState {
            resolver: IdentityResolver::new(store.clone(), directory, self.config.resolver.clone()),
            store,
            config: self.config.clone(),
        });

        let app = create_router(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
