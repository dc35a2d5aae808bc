//! Native side of the plugin: the exported initializer and the per-thread
//! context it prepares.
use std::cell::RefCell;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ThreadId};

static INIT_RUNS: AtomicUsize = AtomicUsize::new(0);

/// State the data transfer engine keeps for the thread that initialized it.
#[derive(Debug)]
pub struct DataTransferContext {
    thread: ThreadId,
}

impl DataTransferContext {
    pub fn thread(&self) -> ThreadId {
        self.thread
    }
}

thread_local! {
    static CONTEXT: RefCell<Option<DataTransferContext>> = const { RefCell::new(None) };
}

/// Entry point the host resolves as `super_data_transfer_init`.
#[no_mangle]
pub extern "C" fn super_data_transfer_init() {
    // Panics must not cross the FFI boundary.
    let result = panic::catch_unwind(|| {
        // Another logger may already be installed by the host.
        let _ = env_logger::try_init();

        CONTEXT.with(|context| {
            let mut context = context.borrow_mut();
            if context.is_none() {
                *context = Some(DataTransferContext {
                    thread: thread::current().id(),
                });
                log::debug!("Created data transfer context on {:?}", thread::current().id());
            }
        });
        INIT_RUNS.fetch_add(1, Ordering::SeqCst);
    });
    if result.is_err() {
        log::error!("super_data_transfer_init panicked");
    }
}

/// How many times the initializer ran in this process.
pub fn init_count() -> usize {
    INIT_RUNS.load(Ordering::SeqCst)
}

/// Whether the calling thread has a context.
pub fn has_context() -> bool {
    CONTEXT.with(|context| context.borrow().is_some())
}
