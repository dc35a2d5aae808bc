use std::cell::Cell;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};

static INIT_RUNS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    // Set once the extensions context exists on this thread.
    static CONTEXT_READY: Cell<bool> = const { Cell::new(false) };
}

/// Entry point the host resolves as `super_native_extensions_init`.
#[no_mangle]
pub extern "C" fn super_native_extensions_init() {
    let result = panic::catch_unwind(|| {
        let _ = env_logger::try_init();

        CONTEXT_READY.with(|ready| {
            if !ready.replace(true) {
                log::debug!("Created native extensions context");
            }
        });
        INIT_RUNS.fetch_add(1, Ordering::SeqCst);
    });
    if result.is_err() {
        log::error!("super_native_extensions_init panicked");
    }
}

pub fn init_count() -> usize {
    INIT_RUNS.load(Ordering::SeqCst)
}

pub fn has_context() -> bool {
    CONTEXT_READY.with(Cell::get)
}
