// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Timetable source formats.
//!
//! Currently this module reads the comma-separated subject table.

pub mod csv;

pub use self::csv::{load_timetable_csv, parse_timetable_csv, read_timetable_csv, TimetableCsvError};
