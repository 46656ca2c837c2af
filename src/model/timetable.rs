// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{SessionCode, SubjectCode};
use super::time::{TimeRange, TimeRangeError};

/// One weekly class occurrence of a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    code: SessionCode,
    range: TimeRange,
}

impl Session {
    pub fn new(code: SessionCode, range: TimeRange) -> Self {
        Self { code, range }
    }

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    name: String,
    code: SubjectCode,
    credits: u32,
    sessions: Vec<Session>,
}

impl Subject {
    pub fn new(name: impl Into<String>, code: SubjectCode, credits: u32) -> Self {
        Self {
            name: name.into(),
            code,
            credits,
            sessions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &SubjectCode {
        &self.code
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Sessions in insertion order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Parses `raw` (`DAY:HH:MM-HH:MM`) and appends the session.
    pub fn add_session(
        &mut self,
        code: SessionCode,
        raw: &str,
    ) -> Result<&Session, MalformedTimeRange> {
        let range = raw.parse::<TimeRange>().map_err(|reason| MalformedTimeRange {
            subject_code: self.code.clone(),
            session_code: code.clone(),
            raw: raw.to_owned(),
            reason,
        })?;
        self.sessions.push(Session::new(code, range));
        Ok(&self.sessions[self.sessions.len() - 1])
    }
}

/// A session time that could not be turned into a valid [`TimeRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTimeRange {
    pub subject_code: SubjectCode,
    pub session_code: SessionCode,
    pub raw: String,
    pub reason: TimeRangeError,
}

impl fmt::Display for MalformedTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed time range '{}' for {} / {}: {}",
            self.raw, self.subject_code, self.session_code, self.reason
        )
    }
}

impl std::error::Error for MalformedTimeRange {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Root aggregate: subjects in load order, unique by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    subjects: Vec<Subject>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.code().as_str() == code)
    }

    pub fn add_subject(&mut self, subject: Subject) -> Result<(), TimetableError> {
        if self.subject(subject.code().as_str()).is_some() {
            return Err(TimetableError::DuplicateSubject(subject.code().clone()));
        }
        self.subjects.push(subject);
        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.subjects.iter().map(|s| s.sessions().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    DuplicateSubject(SubjectCode),
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSubject(code) => write!(f, "duplicate subject code {code}"),
        }
    }
}

impl std::error::Error for TimetableError {}
