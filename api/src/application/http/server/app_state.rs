use std::sync::Arc;

use warden_core::application::WardenService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: WardenService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: WardenService) -> Self {
        Self { args, service }
    }
}
