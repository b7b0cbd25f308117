//! Public macros for building lazy values with less ceremony.

/// Builds a [`LazyValue`](crate::LazyValue) from an expression or a key.
///
/// The expression is moved into a `move` closure and is not evaluated until
/// the first access.
///
/// # Examples
///
/// ```
/// use fibre_lazy::lazy;
///
/// // An infallible expression.
/// let greeting = lazy!(String::from("hello"));
/// assert_eq!(*greeting.get(), "hello");
///
/// // A fallible expression, which must evaluate to a `Result`.
/// let port = lazy!(try "8080".parse::<u16>());
/// assert_eq!(port.get_instance(), Ok(&8080));
/// ```
///
/// ```
/// use fibre_lazy::{lazy, resolver_fn, ResolveError};
///
/// let resolver = resolver_fn(|key: &&str| match *key {
///   "answer" => Ok(42_u32),
///   other => Err(ResolveError::not_found(other)),
/// });
///
/// // A key resolved through a resolver.
/// let answer = lazy!("answer" => resolver);
/// assert_eq!(answer.get_instance(), Ok(&42));
/// ```
#[macro_export]
macro_rules! lazy {
    // Arm for a fallible expression: lazy!(try expr)
    (try $init:expr) => {
        $crate::LazyValue::try_new(move || $init)
    };

    // Arm for a keyed strategy: lazy!(key => resolver)
    ($key:expr => $resolver:expr) => {
        $crate::LazyValue::from_key($key, $resolver)
    };

    // Arm for an infallible expression: lazy!(expr)
    ($init:expr) => {
        $crate::LazyValue::new(move || $init)
    };
}
