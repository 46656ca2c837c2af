// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Comma-separated subject table.
//!
//! One subject per row:
//!
//! ```text
//! <name>,<code>,<credits>,<session code 1>,<session time 1>,<session code 2>,<session time 2>,...
//! ```
//!
//! A session time looks like `CS:10:15-12:00`. Blank rows are skipped, as are session pairs with
//! a blank code or time and a trailing code without a time.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::model::{
    IdError, MalformedTimeRange, SessionCode, Subject, SubjectCode, Timetable, TimetableError,
};

const BOM: char = '\u{feff}';
const FIXED_COLUMNS: usize = 3;

#[derive(Debug)]
pub enum TimetableCsvError {
    Open { path: PathBuf, source: io::Error },
    Csv(::csv::Error),
    MissingColumns { row: u64, found: usize },
    InvalidCredits { row: u64, value: String },
    InvalidCode { row: u64, value: String, source: IdError },
    MalformedTimeRange { row: u64, source: MalformedTimeRange },
    Timetable { row: u64, source: TimetableError },
}

impl TimetableCsvError {
    /// 1-based row of the offending record, when the error is tied to one.
    pub fn row(&self) -> Option<u64> {
        match self {
            Self::MissingColumns { row, .. }
            | Self::InvalidCredits { row, .. }
            | Self::InvalidCode { row, .. }
            | Self::MalformedTimeRange { row, .. }
            | Self::Timetable { row, .. } => Some(*row),
            Self::Csv(err) => err.position().map(|pos| pos.line()),
            Self::Open { .. } => None,
        }
    }
}

impl fmt::Display for TimetableCsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => write!(f, "cannot open {}: {source}", path.display()),
            Self::Csv(err) => write!(f, "csv error: {err}"),
            Self::MissingColumns { row, found } => write!(
                f,
                "row {row}: expected at least {FIXED_COLUMNS} columns (name, code, credits), found {found}"
            ),
            Self::InvalidCredits { row, value } => {
                write!(f, "row {row}: invalid credits '{value}'")
            }
            Self::InvalidCode { row, value, source } => {
                write!(f, "row {row}: invalid code '{value}': {source}")
            }
            Self::MalformedTimeRange { row, source } => write!(f, "row {row}: {source}"),
            Self::Timetable { row, source } => write!(f, "row {row}: {source}"),
        }
    }
}

impl std::error::Error for TimetableCsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
            Self::InvalidCode { source, .. } => Some(source),
            Self::MalformedTimeRange { source, .. } => Some(source),
            Self::Timetable { source, .. } => Some(source),
            Self::MissingColumns { .. } | Self::InvalidCredits { .. } => None,
        }
    }
}

impl From<::csv::Error> for TimetableCsvError {
    fn from(value: ::csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub fn load_timetable_csv(path: &Path) -> Result<Timetable, TimetableCsvError> {
    let file = File::open(path).map_err(|source| TimetableCsvError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let timetable = read_timetable_csv(file)?;
    info!(
        path = %path.display(),
        subjects = timetable.subjects().len(),
        sessions = timetable.session_count(),
        "loaded timetable"
    );
    Ok(timetable)
}

pub fn parse_timetable_csv(input: &str) -> Result<Timetable, TimetableCsvError> {
    read_timetable_csv(input.as_bytes())
}

pub fn read_timetable_csv<R: io::Read>(reader: R) -> Result<Timetable, TimetableCsvError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut timetable = Timetable::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(idx as u64 + 1);
        let cells = record
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                if idx == 0 && col == 0 {
                    cell.trim_start_matches(BOM)
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>();

        if cells.iter().all(|cell| cell.trim().is_empty()) {
            debug!(row, "skipping blank row");
            continue;
        }

        let subject = parse_subject_row(row, &cells)?;
        timetable
            .add_subject(subject)
            .map_err(|source| TimetableCsvError::Timetable { row, source })?;
    }

    Ok(timetable)
}

fn parse_subject_row(row: u64, cells: &[&str]) -> Result<Subject, TimetableCsvError> {
    if cells.len() < FIXED_COLUMNS {
        return Err(TimetableCsvError::MissingColumns {
            row,
            found: cells.len(),
        });
    }

    let name = cells[0].trim();
    let code = parse_code::<SubjectCode>(row, cells[1])?;
    let credits = cells[2]
        .trim()
        .parse::<u32>()
        .map_err(|_| TimetableCsvError::InvalidCredits {
            row,
            value: cells[2].to_owned(),
        })?;

    let mut subject = Subject::new(name, code, credits);
    for pair in cells[FIXED_COLUMNS..].chunks(2) {
        let [session_code, time] = pair else {
            debug!(row, code = pair[0], "ignoring session code without time");
            break;
        };
        if session_code.trim().is_empty() || time.trim().is_empty() {
            continue;
        }
        let session_code = parse_code::<SessionCode>(row, session_code)?;
        subject
            .add_session(session_code, time.trim())
            .map_err(|source| TimetableCsvError::MalformedTimeRange { row, source })?;
    }

    Ok(subject)
}

fn parse_code<C>(row: u64, raw: &str) -> Result<C, TimetableCsvError>
where
    C: std::str::FromStr<Err = IdError>,
{
    raw.trim()
        .parse::<C>()
        .map_err(|source| TimetableCsvError::InvalidCode {
            row,
            value: raw.to_owned(),
            source,
        })
}
