//! Shared application state. Handlers hold no mutable state of their own;
//! the only shared piece is the managed-backend client.

use crate::{
    backend::{Backend, BackendError},
    config::Config,
};

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        Ok(Self { backend: Backend::new(&config.backend_url, &config.backend_anon_key)? })
    }
}
