use fibre_lazy::LazyValue;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// A service that is costly to build.
struct ReportRenderer {
  templates: Vec<String>,
}

// Counts how many renderers were ever built.
static BUILD_COUNT: AtomicUsize = AtomicUsize::new(0);

fn main() {
  // Nothing is built here.
  let renderer = Arc::new(LazyValue::new(|| {
    println!("Building ReportRenderer...");
    BUILD_COUNT.fetch_add(1, Ordering::SeqCst);
    ReportRenderer {
      templates: vec!["daily".to_string(), "weekly".to_string()],
    }
  }));
  println!("Renderer initialized yet? {}", renderer.is_initialized());

  // --- First Use From Several Threads ---
  let handles: Vec<_> = (0..4)
    .map(|i| {
      let renderer = renderer.clone();
      thread::spawn(move || {
        println!("Thread {} sees {} templates", i, renderer.get().templates.len());
      })
    })
    .collect();
  for handle in handles {
    handle.join().unwrap();
  }

  println!("Renderer initialized yet? {}", renderer.is_initialized());
  assert_eq!(
    BUILD_COUNT.load(Ordering::SeqCst),
    1,
    "The renderer should be built exactly once"
  );
  println!("Renderer was built exactly once, as expected.");
}
