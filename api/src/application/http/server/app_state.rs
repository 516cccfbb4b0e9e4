use std::sync::Arc;

use nutriscan_core::application::NutriscanService;
use tokio_util::sync::CancellationToken;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutriscanService,
    /// Fired on graceful shutdown; every request token is a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutriscanService, shutdown: CancellationToken) -> Self {
        Self {
            args,
            service,
            shutdown,
        }
    }

    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
