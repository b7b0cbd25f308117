//! # Fibre Lazy
//!
//! Deferred, memoized, thread-safe initialization of expensive values.
//!
//! A [`LazyValue`] holds a construction strategy and runs it on first access.
//! The result is cached, and every later access returns the very same value
//! without running the strategy again. It is meant to sit next to a
//! dependency-injection container: a service that is costly to build can be
//! handed out as a `LazyValue` and only pays for construction when used.
//!
//! ## Core Concepts
//!
//! - **Strategy**: what produces the value. Either a zero-argument factory, or
//!   a key passed to a [`Resolver`]. The choice is made at construction.
//! - **Resolver**: an external collaborator that produces a value from a key,
//!   such as a container or registry. It is passed in explicitly, never looked
//!   up globally.
//! - **Memoization**: only a successful result is cached. A failing strategy
//!   returns its error unchanged and is retried on the next access.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_lazy::{resolver_fn, LazyValue, ResolveError, StrategyKind};
//!
//! struct Database {
//!   url: String,
//! }
//!
//! // A factory strategy.
//! let db = LazyValue::new(|| Database {
//!   url: String::from("postgres://localhost/app"),
//! });
//! assert!(!db.is_initialized());
//! assert_eq!(db.get().url, "postgres://localhost/app");
//!
//! // A keyed strategy, resolved by an injected resolver.
//! let resolver = resolver_fn(|key: &&str| match *key {
//!   "db_url" => Ok(String::from("postgres://localhost/app")),
//!   other => Err(ResolveError::not_found(other)),
//! });
//! let url = LazyValue::from_key("db_url", resolver);
//! assert_eq!(url.strategy_kind(), StrategyKind::Key);
//! assert_eq!(url.get_instance().map(String::as_str), Ok("postgres://localhost/app"));
//! ```
//!
//! ## Features
//!
//! - `local`: enables [`LocalLazyValue`], a single-threaded variant without
//!   `Send`/`Sync` requirements.

mod core;
mod error;
mod key;
mod lazy;
#[cfg(feature = "local")]
mod local_lazy;
mod macros;
mod resolver;

pub use crate::core::StrategyKind;
pub use error::{ConfigError, ResolveError};
pub use key::ServiceKey;
pub use lazy::LazyValue;
#[cfg(feature = "local")]
pub use local_lazy::LocalLazyValue;
pub use resolver::{resolver_fn, FnResolver, Resolver};
