//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool, the startup configuration, and the field registry
//! used to decode and validate form content. All three are read-only after
//! startup, so cloning the state per request is cheap.

use std::sync::Arc;

use designer::registry::FieldRegistry;
use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::form::CreateLimits;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
    pub registry: Arc<FieldRegistry>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        Self { pool, config: Arc::new(config), registry: Arc::new(FieldRegistry::builtin()) }
    }

    #[must_use]
    pub fn create_limits(&self) -> CreateLimits {
        CreateLimits {
            name_min_len: self.config.form_name_min_len,
            share_token_len: self.config.share_token_len,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
