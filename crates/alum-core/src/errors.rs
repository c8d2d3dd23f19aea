//! Domain rule violations shared by the mock and real facades.
//!
//! Crate-specific errors (`ConfigError`, `StorageError`, `MockError`) live in
//! their own crates. Everything here converts into an
//! [`ApiFailure`](crate::responses::ApiFailure) envelope error.

use thiserror::Error;

use crate::responses::ApiFailure;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The status machine does not allow `from -> to`.
    #[error("cannot move {entity} {id} from {from} to {to}")]
    InvalidTransition {
        entity: String,
        id: String,
        from: String,
        to: String,
    },

    /// A stored record exists but no longer fits its type.
    #[error("stored {entity} {id} is malformed: {reason}")]
    Malformed {
        entity: String,
        id: String,
        reason: String,
    },

    /// Input rejected before reaching any backend.
    #[error("{0}")]
    Validation(String),
}

impl From<CoreError> for ApiFailure {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidTransition { .. } => 409,
            CoreError::Malformed { .. } | CoreError::Validation(_) => 422,
        };
        Self::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn invalid_transition_maps_to_409() {
        let failure: ApiFailure = CoreError::InvalidTransition {
            entity: "User".into(),
            id: "usr-1".into(),
            from: "suspended".into(),
            to: "inactive".into(),
        }
        .into();
        assert_eq!(failure.code, 409);
        assert_eq!(failure.message, "cannot move User usr-1 from suspended to inactive");
    }

    #[test]
    fn malformed_record_maps_to_422() {
        let failure: ApiFailure = CoreError::Malformed {
            entity: "Sponsor".into(),
            id: "spn-1".into(),
            reason: "unknown variant `diamond`".into(),
        }
        .into();
        assert_eq!(failure.code, 422);
        assert!(failure.message.starts_with("stored Sponsor spn-1 is malformed"));
    }
}
