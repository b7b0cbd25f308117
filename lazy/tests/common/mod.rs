#![allow(dead_code)]

use dashmap::DashMap;
use fibre_lazy::{ResolveError, Resolver, ServiceKey};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Factory = Box<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, ResolveError> + Send + Sync>;

/// A minimal thread-safe registry standing in for a dependency-injection
/// container. It counts every `resolve` call so tests can see when the
/// resolver is touched.
#[derive(Default)]
pub struct Registry {
  factories: DashMap<ServiceKey, Factory>,
  resolve_calls: AtomicUsize,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register<T: Any + Send + Sync>(
    &self,
    key: ServiceKey,
    factory: impl Fn() -> Result<T, ResolveError> + Send + Sync + 'static,
  ) {
    self.factories.insert(
      key,
      Box::new(move || factory().map(|value| Arc::new(value) as Arc<dyn Any + Send + Sync>)),
    );
  }

  pub fn resolve_calls(&self) -> usize {
    self.resolve_calls.load(Ordering::SeqCst)
  }
}

impl<T: Any + Send + Sync> Resolver<ServiceKey, Arc<T>> for Registry {
  type Error = ResolveError;

  fn resolve(&self, key: &ServiceKey) -> Result<Arc<T>, ResolveError> {
    self.resolve_calls.fetch_add(1, Ordering::SeqCst);

    let factory = self
      .factories
      .get(key)
      .ok_or_else(|| ResolveError::not_found(key))?;
    let instance = (factory.value())()?;
    instance
      .downcast::<T>()
      .map_err(|_| ResolveError::construction(key, "registered factory produced the wrong type"))
  }
}
