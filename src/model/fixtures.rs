// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in timetables for `--demo`, tests and benchmarks.

use super::ids::{SessionCode, SubjectCode};
use super::timetable::{MalformedTimeRange, Subject, Timetable, TimetableError};

/// `(name, code, credits, [(session code, time)])`
pub type SubjectRow<'a> = (&'a str, &'a str, u32, &'a [(&'a str, &'a str)]);

const DEMO_ROWS: &[SubjectRow<'static>] = &[
    (
        "Analysis I",
        "MAT101",
        6,
        &[("E1", "H:08:15-10:00"), ("G1", "SZE:10:15-12:00"), ("G2", "CS:10:15-12:00")],
    ),
    (
        "Programming Basics",
        "INF102",
        5,
        &[("E1", "K:10:15-12:00"), ("L1", "CS:10:30-12:30"), ("L2", "P:12:15-14:00")],
    ),
    (
        "Discrete Mathematics",
        "MAT110",
        4,
        &[("E1", "H:10:15-12:00"), ("G1", "CS:11:00-12:00"), ("G2", "K:14:15-16:00")],
    ),
    (
        "Computer Architecture",
        "INF120",
        4,
        &[("E1", "SZE:08:15-10:00"), ("L1", "P:08:00-09:30"), ("L2", "P:09:00-10:30")],
    ),
    (
        "Technical English",
        "LAN105",
        2,
        &[("S1", "K:16:15-17:45"), ("S2", "CS:16:15-17:45")],
    ),
];

const PAIR_ROWS: &[SubjectRow<'static>] = &[
    ("First", "A", 3, &[("L1", "CS:10:00-11:00")]),
    ("Second", "B", 3, &[("L1", "CS:10:30-11:30")]),
];

#[derive(Debug)]
pub enum FixtureError {
    Code(super::ids::IdError),
    Session(MalformedTimeRange),
    Timetable(TimetableError),
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(err) => write!(f, "fixture code: {err}"),
            Self::Session(err) => write!(f, "fixture session: {err}"),
            Self::Timetable(err) => write!(f, "fixture timetable: {err}"),
        }
    }
}

impl std::error::Error for FixtureError {}

/// Builds a timetable from `(name, code, credits, sessions)` rows.
pub fn timetable_from_rows(rows: &[SubjectRow<'_>]) -> Result<Timetable, FixtureError> {
    let mut timetable = Timetable::new();
    for (name, code, credits, sessions) in rows {
        let code = SubjectCode::new(*code).map_err(FixtureError::Code)?;
        let mut subject = Subject::new(*name, code, *credits);
        for (session_code, time) in sessions.iter() {
            let session_code = SessionCode::new(*session_code).map_err(FixtureError::Code)?;
            subject
                .add_session(session_code, time)
                .map_err(FixtureError::Session)?;
        }
        timetable.add_subject(subject).map_err(FixtureError::Timetable)?;
    }
    Ok(timetable)
}

/// A small first-year week with deliberate overlaps on CS and P.
pub fn demo_timetable() -> Result<Timetable, FixtureError> {
    timetable_from_rows(DEMO_ROWS)
}

/// Two subjects with one session each on CS: `10:00-11:00` and `10:30-11:30`.
pub fn overlapping_pair() -> Result<Timetable, FixtureError> {
    timetable_from_rows(PAIR_ROWS)
}
