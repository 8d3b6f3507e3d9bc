use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing `LayerId::next`.
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// A lightweight identifier for layers in a registry.
/// 8 bytes, Copy, Eq, Hash in O(1). Never reused within a process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(u64);

impl LayerId {
    /// Allocate a fresh, unique id.
    pub fn next() -> Self {
        LayerId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value (used for default layer names).
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
