use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::pipeline::{PipelineConfig, PipelineEngine};

pub struct AppState {
    pub engine: Arc<PipelineEngine>,
    pub admin_ids: HashSet<u64>,
    /// Pipeline parameters admins can modify at runtime.
    pub pipeline_config: Arc<RwLock<PipelineConfig>>,
}

impl AppState {
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

pub type Context<'a> = poise::Context<'a, AppState, anyhow::Error>;
