use std::sync::Arc;

use super::registry::EngineRegistry;

#[derive(Debug, Clone)]
pub struct HandlerState {
    pub registry: Arc<EngineRegistry>,

    /// Used when a request omits `top_k`.
    pub default_top_k: usize,
}

impl HandlerState {
    pub fn new(registry: Arc<EngineRegistry>) -> Self {
        let default_top_k = registry.config().default_top_k;
        Self {
            registry,
            default_top_k,
        }
    }
}
