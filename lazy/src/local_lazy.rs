// lazy/src/local_lazy.rs

//! A single-threaded, non-thread-safe lazy value.

use crate::core::{InitGuard, Keyed, KeyedSource, StrategyKind};
use crate::resolver::Resolver;
use once_cell::unsync::OnceCell;
use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;

// A local version of the strategy enum, without the `Send + Sync` bounds.
enum LocalStrategy<T, E> {
  Factory(Box<dyn Fn() -> Result<T, E>>),
  Key(Box<dyn KeyedSource<T, E>>),
}

impl<T, E> LocalStrategy<T, E> {
  fn invoke(&self) -> Result<T, E> {
    match self {
      LocalStrategy::Factory(factory) => factory(),
      LocalStrategy::Key(source) => source.produce(),
    }
  }

  fn kind(&self) -> StrategyKind {
    match self {
      LocalStrategy::Factory(_) => StrategyKind::Factory,
      LocalStrategy::Key(_) => StrategyKind::Key,
    }
  }
}

/// A single-threaded counterpart of [`LazyValue`](crate::LazyValue).
///
/// The contract is the same: deferred, memoized, retried after a failure.
/// The factory, key, resolver and value do not need to be `Send` or `Sync`,
/// so `Rc`-based resolvers and values such as `RefCell` work here. In exchange
/// a `LocalLazyValue` cannot be shared between threads.
pub struct LocalLazyValue<T, E = Infallible> {
  cell: OnceCell<T>,
  strategy: LocalStrategy<T, E>,
}

impl<T> LocalLazyValue<T, Infallible> {
  pub fn new(factory: impl Fn() -> T + 'static) -> Self {
    Self::from_strategy(LocalStrategy::Factory(Box::new(move || Ok(factory()))))
  }

  pub fn get(&self) -> &T {
    match self.get_instance() {
      Ok(value) => value,
      Err(never) => match never {},
    }
  }
}

impl<T, E> LocalLazyValue<T, E> {
  fn from_strategy(strategy: LocalStrategy<T, E>) -> Self {
    Self {
      cell: OnceCell::new(),
      strategy,
    }
  }

  pub fn try_new(factory: impl Fn() -> Result<T, E> + 'static) -> Self {
    Self::from_strategy(LocalStrategy::Factory(Box::new(factory)))
  }

  pub fn from_key<K, R>(key: K, resolver: R) -> Self
  where
    K: fmt::Debug + 'static,
    R: Resolver<K, T, Error = E> + 'static,
  {
    Self::from_strategy(LocalStrategy::Key(Box::new(Keyed { key, resolver })))
  }

  /// Returns the cached value, producing it first if necessary.
  ///
  /// Errors and panics behave as in [`LazyValue::get_instance`](crate::LazyValue::get_instance).
  pub fn get_instance(&self) -> Result<&T, E> {
    if let Some(value) = self.cell.get() {
      return Ok(value);
    }

    let _guard = InitGuard::enter(self as *const Self as usize, std::any::type_name::<T>());

    self.cell.get_or_try_init(|| {
      tracing::trace!(
        target: "fibre_lazy",
        strategy = %self.strategy.kind(),
        value_type = std::any::type_name::<T>(),
        "initializing local lazy value"
      );
      let result = self.strategy.invoke();
      if result.is_err() {
        tracing::debug!(
          target: "fibre_lazy",
          strategy = %self.strategy.kind(),
          value_type = std::any::type_name::<T>(),
          "local lazy value initialization failed, will retry on next access"
        );
      }
      result
    })
  }

  pub fn get_if_initialized(&self) -> Option<&T> {
    self.cell.get()
  }

  pub fn is_initialized(&self) -> bool {
    self.cell.get().is_some()
  }

  pub fn strategy_kind(&self) -> StrategyKind {
    self.strategy.kind()
  }

  pub fn into_inner(self) -> Option<T> {
    self.cell.into_inner()
  }
}

impl<T> Deref for LocalLazyValue<T, Infallible> {
  type Target = T;

  fn deref(&self) -> &T {
    self.get()
  }
}

impl<T: fmt::Debug, E> fmt::Debug for LocalLazyValue<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut d = f.debug_struct("LocalLazyValue");
    match &self.strategy {
      LocalStrategy::Factory(_) => d.field("strategy", &format_args!("Factory")),
      LocalStrategy::Key(source) => d.field("strategy", &format_args!("Key({:?})", source.key())),
    };
    match self.cell.get() {
      Some(value) => d.field("value", value),
      None => d.field("value", &format_args!("<uninit>")),
    };
    d.finish()
  }
}
