mod common;

use common::Registry;
use fibre_lazy::{LazyValue, ResolveError, ServiceKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

struct ConcurrentService {
  id: usize,
}

#[test]
fn test_factory_is_called_only_once_under_concurrency() {
  // An atomic counter to track how many times the factory is executed.
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = calls.clone();
  let lazy = LazyValue::new(move || {
    let id = counter.fetch_add(1, Ordering::SeqCst);
    // Simulate some work to widen the window for a race.
    thread::sleep(Duration::from_millis(50));
    ConcurrentService { id }
  });

  // All threads start their first access at the same moment.
  let barrier = Barrier::new(THREADS);
  let observed: Vec<usize> = thread::scope(|s| {
    let handles: Vec<_> = (0..THREADS)
      .map(|_| {
        s.spawn(|| {
          barrier.wait();
          lazy.get() as *const ConcurrentService as usize
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  assert_eq!(calls.load(Ordering::SeqCst), 1);
  assert_eq!(lazy.get().id, 0);

  // Every thread saw the same instance.
  let first = observed[0];
  assert!(observed.iter().all(|&addr| addr == first));
}

#[test]
fn test_resolver_is_called_only_once_under_concurrency() {
  let registry = Arc::new(Registry::new());
  let built = Arc::new(AtomicUsize::new(0));
  let counter = built.clone();
  registry.register(ServiceKey::of::<ConcurrentService>(), move || {
    thread::sleep(Duration::from_millis(20));
    Ok(ConcurrentService {
      id: counter.fetch_add(1, Ordering::SeqCst),
    })
  });

  let lazy: LazyValue<Arc<ConcurrentService>, ResolveError> =
    LazyValue::from_key(ServiceKey::of::<ConcurrentService>(), registry.clone());

  let barrier = Barrier::new(THREADS);
  let instances: Vec<Arc<ConcurrentService>> = thread::scope(|s| {
    let handles: Vec<_> = (0..THREADS)
      .map(|_| {
        s.spawn(|| {
          barrier.wait();
          lazy.get_instance().unwrap().clone()
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  assert_eq!(registry.resolve_calls(), 1);
  assert_eq!(built.load(Ordering::SeqCst), 1);
  assert!(instances.iter().all(|i| Arc::ptr_eq(i, &instances[0])));
}

#[test]
fn test_concurrent_callers_retry_after_failure() {
  // The first attempt fails. Waiting callers must not see a half-initialized
  // value; one of them retries and everyone who succeeds sees the same value.
  #[derive(Debug)]
  struct Unavailable;

  let calls = Arc::new(AtomicUsize::new(0));
  let counter = calls.clone();
  let lazy = LazyValue::try_new(move || {
    let attempt = counter.fetch_add(1, Ordering::SeqCst);
    thread::sleep(Duration::from_millis(20));
    if attempt == 0 {
      Err(Unavailable)
    } else {
      Ok(attempt)
    }
  });

  let barrier = Barrier::new(THREADS);
  let results: Vec<Result<usize, ()>> = thread::scope(|s| {
    let handles: Vec<_> = (0..THREADS)
      .map(|_| {
        s.spawn(|| {
          barrier.wait();
          lazy.get_instance().map(|v| *v).map_err(|_| ())
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  let failures = results.iter().filter(|r| r.is_err()).count();
  let successes: Vec<usize> = results.iter().filter_map(|r| r.ok()).collect();

  // Exactly one attempt failed and exactly one succeeded.
  assert_eq!(calls.load(Ordering::SeqCst), 2);
  assert_eq!(failures, 1);
  assert!(successes.iter().all(|&v| v == 1));
  assert_eq!(lazy.get_instance().map(|v| *v).ok(), Some(1));
}

#[test]
fn test_shared_across_threads_via_arc() {
  let lazy = Arc::new(LazyValue::new(|| String::from("shared")));

  let handles: Vec<_> = (0..4)
    .map(|_| {
      let lazy = lazy.clone();
      thread::spawn(move || lazy.get().clone())
    })
    .collect();

  for handle in handles {
    assert_eq!(handle.join().unwrap(), "shared");
  }
}
