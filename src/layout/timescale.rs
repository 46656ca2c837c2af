// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::present::DisplayWindow;

use super::LayoutError;

/// Linear map between minutes since midnight and vertical coordinates.
///
/// Values outside the display window still map linearly; callers clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    window: DisplayWindow,
    y_top: f64,
    y_bottom: f64,
}

impl TimeScale {
    pub fn new(window: DisplayWindow, y_top: f64, y_bottom: f64) -> Result<Self, LayoutError> {
        if !(y_bottom > y_top) {
            return Err(LayoutError::EmptyBand { y_top, y_bottom });
        }
        Ok(Self {
            window,
            y_top,
            y_bottom,
        })
    }

    pub fn window(&self) -> DisplayWindow {
        self.window
    }

    pub fn y_top(&self) -> f64 {
        self.y_top
    }

    pub fn y_bottom(&self) -> f64 {
        self.y_bottom
    }

    pub fn minute_to_y(&self, minute: f64) -> f64 {
        let start = f64::from(self.window.start_min());
        let span = f64::from(self.window.span());
        self.y_top + (minute - start) / span * (self.y_bottom - self.y_top)
    }

    pub fn y_to_minute(&self, y: f64) -> f64 {
        let start = f64::from(self.window.start_min());
        let span = f64::from(self.window.span());
        start + (y - self.y_top) / (self.y_bottom - self.y_top) * span
    }
}
