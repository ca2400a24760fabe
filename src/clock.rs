// Wall clock abstraction for the scroll-suppression deadline.
// Browser builds read Date.now(); tests drive a manual clock.

use std::cell::Cell;
use std::rc::Rc;

use crate::types::Timestamp;

/// Source of "now" in milliseconds. Only differences between readings matter.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Clock backed by `Date.now()` in the browser, system time elsewhere.
///
/// Both are wall clocks and can step backward. The scroll quiet window treats a
/// reading earlier than its arming time as expired, so a backward step ends
/// suppression early rather than extending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Timestamp {
        Timestamp::from_millis_f64(js_sys::Date::now())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Timestamp {
        let elapsed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp::from_millis(elapsed.as_millis() as u64)
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        ManualClock {
            now_ms: Rc::new(Cell::new(start.as_millis())),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now_ms.set(now.as_millis());
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now_ms.get())
    }
}
