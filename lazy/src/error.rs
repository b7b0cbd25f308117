use thiserror::Error;

/// Raised while assembling a strategy, before any value is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("service key name for {type_name} cannot be empty")]
  EmptyKeyName { type_name: &'static str },

  #[error("service key name '{name}' for {type_name} must not contain whitespace")]
  InvalidKeyName {
    type_name: &'static str,
    name: String,
  },
}

/// A ready-made error type for [`Resolver`](crate::Resolver) implementations.
///
/// `LazyValue` never wraps or inspects it; whatever a resolver returns is
/// handed back to the caller of `get_instance` as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("no provider registered for {key}")]
  NotFound { key: String },

  #[error("failed to construct {key}: {reason}")]
  Construction { key: String, reason: String },

  #[error("circular dependency detected while resolving {key}")]
  Cycle { key: String },
}

impl ResolveError {
  pub fn not_found(key: impl ToString) -> Self {
    ResolveError::NotFound {
      key: key.to_string(),
    }
  }

  pub fn construction(key: impl ToString, reason: impl Into<String>) -> Self {
    ResolveError::Construction {
      key: key.to_string(),
      reason: reason.into(),
    }
  }
}
