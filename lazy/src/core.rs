//! Core, non-public building blocks shared by the lazy cells.

use crate::resolver::Resolver;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

thread_local! {
  // Addresses of the cells whose strategy is currently running on this thread.
  static INITIALIZING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// An RAII guard that turns re-entrant initialization into a panic.
///
/// A strategy that reaches back into the cell it is initializing would
/// otherwise block forever on the sync cell, or recurse without bound on the
/// local one. The guard is per thread, so concurrent first accesses from
/// different threads never trip it.
pub(crate) struct InitGuard {
  addr: usize,
}

impl InitGuard {
  pub(crate) fn enter(addr: usize, type_name: &'static str) -> Self {
    INITIALIZING.with(|set| {
      if !set.borrow_mut().insert(addr) {
        panic!(
          "Recursive initialization detected while initializing lazy value: {}",
          type_name
        );
      }
    });
    Self { addr }
  }
}

impl Drop for InitGuard {
  fn drop(&mut self) {
    INITIALIZING.with(|set| {
      set.borrow_mut().remove(&self.addr);
    });
  }
}

/// How a lazy value produces its content, decided when it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
  /// A zero-argument factory.
  Factory,
  /// A key handed to an external resolver.
  Key,
}

impl fmt::Display for StrategyKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StrategyKind::Factory => f.write_str("factory"),
      StrategyKind::Key => f.write_str("key"),
    }
  }
}

/// A key bound to the resolver that understands it.
pub(crate) trait KeyedSource<T, E> {
  fn produce(&self) -> Result<T, E>;
  fn key(&self) -> &dyn fmt::Debug;
}

pub(crate) struct Keyed<K, R> {
  pub(crate) key: K,
  pub(crate) resolver: R,
}

impl<K, T, R> KeyedSource<T, R::Error> for Keyed<K, R>
where
  K: fmt::Debug,
  R: Resolver<K, T>,
{
  fn produce(&self) -> Result<T, R::Error> {
    self.resolver.resolve(&self.key)
  }

  fn key(&self) -> &dyn fmt::Debug {
    &self.key
  }
}

/// Thread-safe strategy storage used by `LazyValue`.
pub(crate) enum Strategy<T, E> {
  Factory(Box<dyn Fn() -> Result<T, E> + Send + Sync>),
  Key(Box<dyn KeyedSource<T, E> + Send + Sync>),
}

impl<T, E> Strategy<T, E> {
  pub(crate) fn invoke(&self) -> Result<T, E> {
    match self {
      Strategy::Factory(factory) => factory(),
      Strategy::Key(source) => source.produce(),
    }
  }

  pub(crate) fn kind(&self) -> StrategyKind {
    match self {
      Strategy::Factory(_) => StrategyKind::Factory,
      Strategy::Key(_) => StrategyKind::Key,
    }
  }
}

impl<T, E> fmt::Debug for Strategy<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Strategy::Factory(_) => f.write_str("Factory"),
      Strategy::Key(source) => f.debug_tuple("Key").field(source.key()).finish(),
    }
  }
}
