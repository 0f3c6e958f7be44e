/// Unified error type covering all failure modes across the tanna pipeline.
///
/// Every variant includes an actionable message guiding the consumer toward
/// resolution. Planning and quote extraction are pure and never fail; errors
/// only arise at the seams — the lexical store and the general-QA
/// collaborator. Neither is retried here: retry policy belongs to the
/// backend implementations.
#[derive(Debug, thiserror::Error)]
pub enum TannaError {
    /// A lexical-store operation failed (connection lost, corrupt index,
    /// malformed match expression, ...).
    #[error("lexical store failed during {op}: {source}. Check the store backend; the core does not retry.")]
    Store {
        /// Which store operation was in flight (e.g., "find_term").
        op: &'static str,
        /// The underlying backend error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The general-QA collaborator failed while answering a fallback query.
    #[error("general-QA collaborator failed: {source}. The query was valid; retry against the collaborator.")]
    Collaborator {
        /// The underlying collaborator error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration value is invalid.
    #[error("invalid config: {field} = \"{value}\" — {reason}")]
    InvalidConfig {
        /// Which config field.
        field: String,
        /// The invalid value.
        value: String,
        /// Why it is invalid.
        reason: String,
    },
}

impl TannaError {
    /// Wrap a backend error as a store failure for the named operation.
    pub fn store(
        op: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            op,
            source: Box::new(source),
        }
    }
}

/// Convenience alias used throughout the tanna crate hierarchy.
pub type TannaResult<T> = Result<T, TannaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TannaError>();
    }

    #[test]
    fn store_error_names_operation_and_source() {
        let inner = std::io::Error::other("db locked");
        let err = TannaError::store("find_term", inner);
        let msg = err.to_string();
        assert!(msg.contains("find_term"));
        assert!(msg.contains("db locked"));
        assert!(err.source().is_some());
    }

    #[test]
    fn collaborator_error_preserves_source() {
        let inner = std::io::Error::other("llm timeout");
        let err = TannaError::Collaborator {
            source: Box::new(inner),
        };
        assert!(err.to_string().contains("llm timeout"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_config_display() {
        let err = TannaError::InvalidConfig {
            field: "min_score".into(),
            value: "-1.0".into(),
            reason: "must be between 0.0 and 1.0".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("min_score"));
        assert!(msg.contains("-1.0"));
        assert!(msg.contains("must be between"));
    }

    #[test]
    fn result_alias_works() {
        let ok: TannaResult<u32> = Ok(42);
        assert!(ok.is_ok());
    }
}
