//! The thread-safe `LazyValue`.

use crate::core::{InitGuard, Keyed, Strategy, StrategyKind};
use crate::resolver::Resolver;
use once_cell::sync::OnceCell;
use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;

/// A value produced on first access and cached for every access after it.
///
/// The value comes from a strategy chosen at construction: a zero-argument
/// factory, or a key handed to a [`Resolver`]. Nothing runs until
/// [`get_instance`](Self::get_instance) is called.
///
/// # Failure and retry
///
/// If the strategy fails, its error is returned unchanged and the value stays
/// uninitialized, so the next call runs the strategy again. Once a call
/// succeeds, the strategy is never invoked again.
///
/// # Concurrency
///
/// Concurrent first accesses block while one of them runs the strategy. On
/// success all of them observe the same value. On failure the caller that ran
/// the strategy gets the error and one of the waiting callers makes its own
/// attempt.
///
/// # Examples
///
/// ```
/// use fibre_lazy::LazyValue;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// static CALLS: AtomicUsize = AtomicUsize::new(0);
///
/// let answer = LazyValue::new(|| {
///   CALLS.fetch_add(1, Ordering::SeqCst);
///   42
/// });
/// assert_eq!(CALLS.load(Ordering::SeqCst), 0);
///
/// assert_eq!(*answer.get(), 42);
/// assert_eq!(*answer.get(), 42);
/// assert_eq!(CALLS.load(Ordering::SeqCst), 1);
/// ```
pub struct LazyValue<T, E = Infallible> {
  cell: OnceCell<T>,
  strategy: Strategy<T, E>,
}

impl<T> LazyValue<T, Infallible> {
  /// Creates a lazy value from an infallible factory.
  pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
    Self::from_strategy(Strategy::Factory(Box::new(move || Ok(factory()))))
  }

  /// Returns the value, running the factory if this is the first access.
  pub fn get(&self) -> &T {
    match self.get_instance() {
      Ok(value) => value,
      Err(never) => match never {},
    }
  }
}

impl<T, E> LazyValue<T, E> {
  fn from_strategy(strategy: Strategy<T, E>) -> Self {
    Self {
      cell: OnceCell::new(),
      strategy,
    }
  }

  /// Creates a lazy value from a factory that may fail.
  pub fn try_new(factory: impl Fn() -> Result<T, E> + Send + Sync + 'static) -> Self {
    Self::from_strategy(Strategy::Factory(Box::new(factory)))
  }

  /// Creates a lazy value that asks `resolver` for `key` on first access.
  ///
  /// The resolver is not touched here.
  pub fn from_key<K, R>(key: K, resolver: R) -> Self
  where
    K: fmt::Debug + Send + Sync + 'static,
    R: Resolver<K, T, Error = E> + Send + Sync + 'static,
  {
    Self::from_strategy(Strategy::Key(Box::new(Keyed { key, resolver })))
  }

  /// Returns the cached value, producing it first if necessary.
  ///
  /// # Errors
  ///
  /// Returns the strategy's error unchanged if it fails. The value is left
  /// uninitialized and a later call will try again.
  ///
  /// # Panics
  ///
  /// Panics if the strategy calls back into this same value while it is being
  /// initialized, and propagates any panic raised by the strategy.
  pub fn get_instance(&self) -> Result<&T, E> {
    if let Some(value) = self.cell.get() {
      return Ok(value);
    }

    // Must be held before touching the cell: a nested `get_or_try_init` on the
    // same cell blocks instead of failing.
    let _guard = InitGuard::enter(self as *const Self as usize, std::any::type_name::<T>());

    self.cell.get_or_try_init(|| {
      tracing::trace!(
        target: "fibre_lazy",
        strategy = %self.strategy.kind(),
        value_type = std::any::type_name::<T>(),
        "initializing lazy value"
      );
      match self.strategy.invoke() {
        Ok(value) => {
          tracing::trace!(target: "fibre_lazy", value_type = std::any::type_name::<T>(), "lazy value initialized");
          Ok(value)
        }
        Err(err) => {
          tracing::debug!(
            target: "fibre_lazy",
            strategy = %self.strategy.kind(),
            value_type = std::any::type_name::<T>(),
            "lazy value initialization failed, will retry on next access"
          );
          Err(err)
        }
      }
    })
  }

  /// Returns the value if it has already been produced. Never runs the strategy.
  pub fn get_if_initialized(&self) -> Option<&T> {
    self.cell.get()
  }

  pub fn is_initialized(&self) -> bool {
    self.cell.get().is_some()
  }

  pub fn strategy_kind(&self) -> StrategyKind {
    self.strategy.kind()
  }

  /// Consumes the lazy value, returning the cached value if there is one.
  pub fn into_inner(self) -> Option<T> {
    self.cell.into_inner()
  }
}

impl<T> Deref for LazyValue<T, Infallible> {
  type Target = T;

  fn deref(&self) -> &T {
    self.get()
  }
}

impl<T: fmt::Debug, E> fmt::Debug for LazyValue<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut d = f.debug_struct("LazyValue");
    d.field("strategy", &self.strategy);
    match self.cell.get() {
      Some(value) => d.field("value", value),
      None => d.field("value", &format_args!("<uninit>")),
    };
    d.finish()
  }
}
