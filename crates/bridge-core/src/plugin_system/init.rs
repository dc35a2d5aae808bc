use std::fmt;
use std::sync::Once;

/// Zero-argument entry point that sets up the native side of a plugin.
pub trait NativeInitializer: Send + Sync {
    /// Label used in log messages.
    fn name(&self) -> &str;

    /// Runs the entry point. Failures inside it are not observable here.
    fn initialize(&self);
}

/// Initializer backed by an exported `extern "C" fn()`.
#[derive(Clone, Copy)]
pub struct ExternInitializer {
    name: &'static str,
    entry: extern "C" fn(),
}

impl ExternInitializer {
    pub const fn new(name: &'static str, entry: extern "C" fn()) -> Self {
        Self { name, entry }
    }
}

impl NativeInitializer for ExternInitializer {
    fn name(&self) -> &str {
        self.name
    }

    fn initialize(&self) {
        (self.entry)()
    }
}

impl fmt::Debug for ExternInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternInitializer").field("name", &self.name).finish()
    }
}

/// When a variant runs its native initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPolicy {
    /// First registration in the process only.
    OncePerProcess,
    /// Every registration, with no guard.
    EveryRegistration,
}

impl fmt::Display for InitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitPolicy::OncePerProcess => write!(f, "once-per-process"),
            InitPolicy::EveryRegistration => write!(f, "every-registration"),
        }
    }
}

/// Observable state of an [`InitGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Initialized,
}

/// Process-wide at-most-once gate for a native initializer.
///
/// Usable as a `static`. Concurrent callers block until the first run has
/// finished, so no caller proceeds against a half-initialized library.
pub struct InitGuard {
    once: Once,
}

impl InitGuard {
    pub const fn new() -> Self {
        Self { once: Once::new() }
    }

    /// Runs `initializer` if this guard has never run one. Returns whether it ran.
    pub fn run(&self, initializer: &dyn NativeInitializer) -> bool {
        let mut ran = false;
        self.once.call_once(|| {
            initializer.initialize();
            ran = true;
        });
        ran
    }

    pub fn state(&self) -> InitState {
        if self.once.is_completed() {
            InitState::Initialized
        } else {
            InitState::Uninitialized
        }
    }
}

impl Default for InitGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InitGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitGuard").field("state", &self.state()).finish()
    }
}

/// Applies `policy` to `initializer`. Returns whether the initializer ran.
pub fn run_initializer(policy: InitPolicy, guard: &InitGuard, initializer: &dyn NativeInitializer) -> bool {
    let ran = match policy {
        InitPolicy::OncePerProcess => guard.run(initializer),
        InitPolicy::EveryRegistration => {
            initializer.initialize();
            true
        }
    };
    if ran {
        log::info!("Ran native initializer '{}' ({})", initializer.name(), policy);
    } else {
        log::debug!("Native initializer '{}' already ran, skipping", initializer.name());
    }
    ran
}
