// Centering math for the lyrics viewport.
// The engine decides *which* line to center; the view measures pixels and applies the offset.

use crate::types::{ScrollAlign, ScrollBehavior, ViewInstruction};

/// Measured layout of one lyric line inside its scroll container (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineGeometry {
    /// Line's offset from the top of the scrollable content.
    pub line_top: f64,
    pub line_height: f64,
    /// Visible height of the container.
    pub container_height: f64,
}

impl LineGeometry {
    pub fn new(line_top: f64, line_height: f64, container_height: f64) -> Self {
        LineGeometry {
            line_top,
            line_height,
            container_height,
        }
    }

    /// Scroll offset that puts the line's midpoint on the container's midpoint.
    /// Never negative; lines near the top simply sit above center.
    pub fn center_offset(&self) -> f64 {
        let offset = self.line_top - self.container_height / 2.0 + self.line_height / 2.0;
        if offset.is_finite() {
            offset.max(0.0)
        } else {
            0.0
        }
    }
}

/// Centered scroll-into-view for `index`. Smooth requests carry an instant fallback
/// to the same offset.
pub fn center_on(index: usize, smooth: bool) -> ViewInstruction {
    let behavior = if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    };

    ViewInstruction::ScrollIntoView {
        index,
        align: ScrollAlign::Center,
        behavior,
        fallback: ScrollBehavior::Instant,
    }
}
