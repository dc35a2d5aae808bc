use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-owning identity of a native view or window.
///
/// The host owns the underlying window; the bridge only ever reports the
/// numeric identity back across the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewHandle(u64);

impl ViewHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Identity as carried on the wire. Handles are pointer-sized, so the
    /// bit pattern is preserved even above `i64::MAX`.
    pub const fn as_wire_id(self) -> i64 {
        self.0 as i64
    }
}

impl From<u64> for ViewHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
