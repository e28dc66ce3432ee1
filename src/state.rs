use std::sync::Arc;

use crate::{config::AppConfig, db::Gateway};

pub struct AppState {
    pub config: AppConfig,
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn Gateway>) -> Arc<Self> {
        Arc::new(Self { config, gateway })
    }
}
