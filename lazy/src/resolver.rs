//! The interface a keyed strategy consumes from the outside world.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

/// Produces a `T` from a key.
///
/// This is typically implemented by a dependency-injection container or a
/// registry owned by the application. A `LazyValue` built with
/// [`LazyValue::from_key`](crate::LazyValue::from_key) calls `resolve` only on
/// first access, and returns its error to the caller untouched.
pub trait Resolver<K: ?Sized, T> {
  type Error;

  fn resolve(&self, key: &K) -> Result<T, Self::Error>;
}

impl<K: ?Sized, T, R: Resolver<K, T> + ?Sized> Resolver<K, T> for &R {
  type Error = R::Error;

  fn resolve(&self, key: &K) -> Result<T, Self::Error> {
    (**self).resolve(key)
  }
}

impl<K: ?Sized, T, R: Resolver<K, T> + ?Sized> Resolver<K, T> for Box<R> {
  type Error = R::Error;

  fn resolve(&self, key: &K) -> Result<T, Self::Error> {
    (**self).resolve(key)
  }
}

impl<K: ?Sized, T, R: Resolver<K, T> + ?Sized> Resolver<K, T> for Arc<R> {
  type Error = R::Error;

  fn resolve(&self, key: &K) -> Result<T, Self::Error> {
    (**self).resolve(key)
  }
}

impl<K: ?Sized, T, R: Resolver<K, T> + ?Sized> Resolver<K, T> for Rc<R> {
  type Error = R::Error;

  fn resolve(&self, key: &K) -> Result<T, Self::Error> {
    (**self).resolve(key)
  }
}

/// Adapts a closure into a [`Resolver`]. Built by [`resolver_fn`].
pub struct FnResolver<F, K: ?Sized> {
  f: F,
  _key: PhantomData<fn(&K)>,
}

/// Wraps `f` so it can be passed wherever a [`Resolver`] is expected.
///
/// ```
/// use fibre_lazy::{resolver_fn, LazyValue, ResolveError};
///
/// let resolver = resolver_fn(|key: &&str| match *key {
///   "port" => Ok(8080_u16),
///   other => Err(ResolveError::not_found(other)),
/// });
///
/// let port = LazyValue::from_key("port", resolver);
/// assert_eq!(port.get_instance(), Ok(&8080));
/// ```
pub fn resolver_fn<K, T, E, F>(f: F) -> FnResolver<F, K>
where
  K: ?Sized,
  F: Fn(&K) -> Result<T, E>,
{
  FnResolver {
    f,
    _key: PhantomData,
  }
}

impl<K: ?Sized, T, E, F> Resolver<K, T> for FnResolver<F, K>
where
  F: Fn(&K) -> Result<T, E>,
{
  type Error = E;

  fn resolve(&self, key: &K) -> Result<T, E> {
    (self.f)(key)
  }
}

impl<F, K: ?Sized> fmt::Debug for FnResolver<F, K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FnResolver").finish_non_exhaustive()
  }
}
