// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Schedule model.
//!
//! A timetable owns subjects, subjects own their weekly sessions. Everything is validated on
//! construction and read-only afterwards.

pub mod fixtures;
pub mod ids;
pub mod time;
pub mod timetable;

pub use ids::{Id, IdError, RenderId, SessionCode, SubjectCode, ID_SEPARATOR};
pub use time::{format_minutes, DaySlot, Time, TimeRange, TimeRangeError};
pub use timetable::{MalformedTimeRange, Session, Subject, Timetable, TimetableError};
