use std::sync::Arc;

use alum_config::{AlumConfig, ApiMode, ModeResolver};
use alum_core::state::KeyValueStore;
use alum_mock::MockServer;
use alum_services::{NoJitter, ServiceContext};
use alum_storage::LocalStore;

use crate::cli::{GlobalFlags, OutputFormat};

pub fn flags() -> GlobalFlags {
    GlobalFlags {
        format: OutputFormat::Raw,
        limit: None,
        quiet: true,
        verbose: false,
    }
}

/// A context pinned to mock mode over the bundled demo document. The server
/// must outlive the context.
pub fn mock_context() -> (MockServer, ServiceContext) {
    let server = MockServer::demo("127.0.0.1:0").expect("mock server should start");
    let mut config = AlumConfig::default();
    config.mock.base_url = server.base_url();
    config.api.base_url = "http://127.0.0.1:9".to_string();
    config.api.timeout_secs = 2;
    let store: Arc<dyn KeyValueStore> = Arc::new(LocalStore::in_memory());
    let ctx = ServiceContext::assemble(
        config,
        store,
        Arc::new(ModeResolver::fixed(ApiMode::Mock)),
        Arc::new(NoJitter),
    )
    .expect("context should assemble");
    (server, ctx)
}
