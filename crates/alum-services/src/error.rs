use alum_core::responses::ApiFailure;
use alum_mock::MockError;
use alum_storage::StorageError;
use thiserror::Error;

/// Failures while wiring the service context.
///
/// Once the context exists, every service call reports through response
/// envelopes and never returns a `ServiceError`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("persisted store: {0}")]
    Storage(#[from] StorageError),

    #[error("mock backend: {0}")]
    Mock(#[from] MockError),

    #[error("real backend client: {0}")]
    Client(#[from] ApiFailure),
}
