//! Typed lookup keys for resolver-backed strategies.

use crate::error::ConfigError;
use std::any::{Any, TypeId};
use std::fmt;

/// Identifies a value a resolver knows how to produce.
///
/// A key is the requested type plus an optional name, so two named
/// registrations of the same type stay distinct. Equality and hashing ignore
/// the type name, which is only kept for display.
#[derive(Clone)]
pub struct ServiceKey {
  type_id: TypeId,
  type_name: &'static str,
  name: Option<String>,
}

impl ServiceKey {
  /// The unnamed key for `T`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      name: None,
    }
  }

  /// A named key for `T`.
  ///
  /// Fails with [`ConfigError`] if `name` is empty or contains whitespace.
  pub fn named<T: ?Sized + Any>(name: &str) -> Result<Self, ConfigError> {
    let type_name = std::any::type_name::<T>();
    if name.is_empty() {
      return Err(ConfigError::EmptyKeyName { type_name });
    }
    if name.chars().any(char::is_whitespace) {
      return Err(ConfigError::InvalidKeyName {
        type_name,
        name: name.to_owned(),
      });
    }
    Ok(Self {
      type_id: TypeId::of::<T>(),
      type_name,
      name: Some(name.to_owned()),
    })
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

impl PartialEq for ServiceKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id && self.name == other.name
  }
}

impl Eq for ServiceKey {}

impl std::hash::Hash for ServiceKey {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
    self.name.hash(state);
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "Key({}, Name({}))", self.type_name, name),
      None => write!(f, "Key({})", self.type_name),
    }
  }
}

impl fmt::Display for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "{} '{}'", self.type_name, name),
      None => f.write_str(self.type_name),
    }
  }
}
