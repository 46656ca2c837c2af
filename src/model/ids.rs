// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Separator used when composing render ids from subject and session codes.
pub const ID_SEPARATOR: &str = "__";

/// A typed code or identifier used across the model and the presentation layer.
///
/// The value must not be blank, must not contain [`ID_SEPARATOR`] and must not start or end
/// with `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_code(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSeparator,
    UnderscoreEdge,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("code must not be empty"),
            Self::ContainsSeparator => write!(f, "code must not contain '{ID_SEPARATOR}'"),
            Self::UnderscoreEdge => f.write_str("code must not start or end with '_'"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_code(value: &str) -> Result<(), IdError> {
    if value.trim().is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains(ID_SEPARATOR) {
        return Err(IdError::ContainsSeparator);
    }
    // A code touching the separator would merge with it when composed.
    if value.starts_with('_') || value.ends_with('_') {
        return Err(IdError::UnderscoreEdge);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubjectCodeTag {}
pub type SubjectCode = Id<SubjectCodeTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionCodeTag {}
pub type SessionCode = Id<SessionCodeTag>;

/// Identifier of one flattened render session: `<subject>__<session>__<occurrence>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderId(String);

impl RenderId {
    pub fn compose(subject: &SubjectCode, session: &SessionCode, occurrence: usize) -> Self {
        Self(format!(
            "{subject}{ID_SEPARATOR}{session}{ID_SEPARATOR}{occurrence}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RenderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
