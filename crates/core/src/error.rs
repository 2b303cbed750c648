use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Transient backend failure. Callers may retry with backoff.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by a [`DbId`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the caller should retry the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

/// Reject the nil UUID, which stands in for an unset identifier.
pub fn require_id(id: DbId, field: &str) -> Result<DbId, CoreError> {
    if id.is_nil() {
        return Err(CoreError::InvalidInput(format!("{field} must be set")));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    #[test]
    fn nil_id_is_rejected() {
        assert_matches!(
            require_id(Uuid::nil(), "organization_id"),
            Err(CoreError::InvalidInput(msg)) if msg == "organization_id must be set"
        );
    }

    #[test]
    fn non_nil_id_passes_through() {
        let id = Uuid::new_v4();
        assert_eq!(require_id(id, "student_id").unwrap(), id);
    }

    #[test]
    fn only_store_unavailable_is_retryable() {
        assert!(CoreError::StoreUnavailable("timeout".into()).is_retryable());
        assert!(!CoreError::Conflict("member".into()).is_retryable());
        assert!(!CoreError::InvalidInput("bad".into()).is_retryable());
    }

    #[test]
    fn not_found_formats_entity_and_id() {
        let id = Uuid::nil();
        let err = CoreError::not_found("Organization", id);
        assert_eq!(
            err.to_string(),
            format!("Entity not found: Organization with id {id}")
        );
    }
}
