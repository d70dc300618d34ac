//! Team Registry
//!
//! Registers teams together with their members in one atomic step and looks
//! them up by name. Storage is PostgreSQL, or an in-memory store for local
//! development and tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::TeamRepository;
use infrastructure::storage::{StorageType, connect_pool};
use infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository};
use tracing::info;

/// Create the application state for the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.storage.backend {
        StorageType::Postgres => {
            let pool = connect_pool(&config.database).await?;
            info!("Using PostgreSQL team storage");
            Ok(create_app_state_with_repository(
                Arc::new(PostgresTeamRepository::new(pool)),
                config,
            ))
        }
        StorageType::InMemory => {
            info!("Using in-memory team storage");
            Ok(create_app_state_with_repository(
                Arc::new(InMemoryTeamRepository::new()),
                config,
            ))
        }
    }
}

/// Create the application state around an already constructed repository
pub fn create_app_state_with_repository<R: TeamRepository + 'static>(
    repository: Arc<R>,
    config: &AppConfig,
) -> AppState {
    AppState::with_repository(repository, config.server.request_timeout())
}
