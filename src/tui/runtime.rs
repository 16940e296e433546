//! Chart viewer state: the evaluated curve and a sample cursor.

use crate::sweep::{BillCurve, CurvePoint};

/// Samples skipped by a page jump.
pub const PAGE_STEP: usize = 10;

/// State for the bill chart viewer.
pub struct App {
    /// Curve being displayed.
    pub curve: BillCurve,
    /// Index of the highlighted sample.
    pub cursor: usize,
    /// Set when the user asks to exit.
    pub quit: bool,
}

impl App {
    /// Opens the viewer with the cursor on the first sample.
    pub fn new(curve: BillCurve) -> Self {
        Self {
            curve,
            cursor: 0,
            quit: false,
        }
    }

    /// Sample under the cursor, if the curve is non-empty.
    pub fn selected(&self) -> Option<&CurvePoint> {
        self.curve.points.get(self.cursor)
    }

    /// Moves the cursor by `delta` samples, clamped to the curve.
    pub fn move_by(&mut self, delta: isize) {
        let Some(last) = self.curve.len().checked_sub(1) else {
            return;
        };
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.curve.len().saturating_sub(1);
    }
}
