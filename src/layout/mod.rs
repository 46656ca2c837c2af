// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout engine.
//!
//! Maps minutes to rows, packs overlapping sessions of a day into side-by-side lanes and
//! computes the cell rectangle of every block.

use std::fmt;

pub mod lanes;
pub mod timescale;
pub mod week;

pub use lanes::{assign_lanes, LaneAssignment, MinuteSpan};
pub use timescale::TimeScale;
pub use week::{
    layout_week, BlockPlacement, CellRect, DayColumn, GridMetrics, Surface, SurfaceError,
    WeekLayout,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    EmptyBand { y_top: f64, y_bottom: f64 },
    NoRoomForDays { width: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBand { y_top, y_bottom } => {
                write!(f, "time band {y_top}..{y_bottom} has no height")
            }
            Self::NoRoomForDays { width } => {
                write!(f, "surface width {width} leaves no room for day columns")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
