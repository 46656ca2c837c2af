// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// A wall-clock time of day, `00:00..=23:59`.
///
/// Ordering is by minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time {
    hour: u8,
    minute: u8,
}

impl Time {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        let hour = u8::try_from(minutes / 60).ok()?;
        Self::new(hour, (minutes % 60) as u8)
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn to_minutes(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Formats minutes since midnight as `HH:MM` without range checks.
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The fixed set of weekday columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DaySlot {
    H,
    K,
    Sze,
    Cs,
    P,
}

impl DaySlot {
    pub const ALL: [DaySlot; 5] = [Self::H, Self::K, Self::Sze, Self::Cs, Self::P];

    pub fn code(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::K => "K",
            Self::Sze => "SZE",
            Self::Cs => "CS",
            Self::P => "P",
        }
    }

    pub fn label(self) -> &'static str {
        self.code()
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.code() == code)
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated `(day, start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    day: DaySlot,
    start: Time,
    end: Time,
}

impl TimeRange {
    pub fn new(day: DaySlot, start: Time, end: Time) -> Result<Self, TimeRangeError> {
        if start >= end {
            return Err(TimeRangeError::NotIncreasing { start, end });
        }
        Ok(Self { day, start, end })
    }

    pub fn day(&self) -> DaySlot {
        self.day
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.day, self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = TimeRangeError;

    /// Parses `DAY:HH:MM-HH:MM`, e.g. `CS:10:15-12:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day_part, hours_part) = s
            .split_once(':')
            .ok_or_else(|| TimeRangeError::MissingDay(s.to_owned()))?;
        let day_part = day_part.trim();
        let day = DaySlot::from_code(day_part)
            .ok_or_else(|| TimeRangeError::UnknownDay(day_part.to_owned()))?;

        let (start, end) = hours_part
            .split_once('-')
            .ok_or_else(|| TimeRangeError::MissingEnd(hours_part.to_owned()))?;
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        Self::new(day, start, end)
    }
}

fn parse_time(value: &str) -> Result<Time, TimeRangeError> {
    let value = value.trim();
    let invalid = || TimeRangeError::InvalidTime(value.to_owned());
    let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
    let hour = hour.trim().parse::<u8>().map_err(|_| invalid())?;
    let minute = minute.trim().parse::<u8>().map_err(|_| invalid())?;
    Time::new(hour, minute).ok_or_else(invalid)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    MissingDay(String),
    UnknownDay(String),
    MissingEnd(String),
    InvalidTime(String),
    NotIncreasing { start: Time, end: Time },
}

impl fmt::Display for TimeRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDay(value) => write!(f, "missing day prefix in '{value}'"),
            Self::UnknownDay(day) => write!(f, "unknown day '{day}'"),
            Self::MissingEnd(value) => write!(f, "expected 'start-end' in '{value}'"),
            Self::InvalidTime(value) => write!(f, "invalid time '{value}'"),
            Self::NotIncreasing { start, end } => {
                write!(f, "start {start} must be before end {end}")
            }
        }
    }
}

impl std::error::Error for TimeRangeError {}

#[cfg(test)]
mod tests {
    use super::{format_minutes, DaySlot, Time, TimeRange, TimeRangeError};
    use rstest::rstest;

    #[test]
    fn time_orders_by_minutes() {
        let a = Time::new(9, 59).expect("time");
        let b = Time::new(10, 0).expect("time");
        assert!(a < b);
        assert_eq!(b.to_minutes(), 600);
        assert_eq!(Time::from_minutes(615), Time::new(10, 15));
        assert_eq!(Time::new(24, 0), None);
    }

    #[test]
    fn day_slot_order_matches_columns() {
        let codes = DaySlot::ALL.iter().map(|d| d.code()).collect::<Vec<_>>();
        assert_eq!(codes, vec!["H", "K", "SZE", "CS", "P"]);
        assert!(DaySlot::H < DaySlot::P);
        assert_eq!(DaySlot::Cs.ordinal(), 3);
    }

    #[test]
    fn parses_source_format() {
        let range: TimeRange = "CS:10:15-12:00".parse().expect("range");
        assert_eq!(range.day(), DaySlot::Cs);
        assert_eq!(range.start().to_minutes(), 615);
        assert_eq!(range.end().to_minutes(), 720);
        assert_eq!(range.to_string(), "CS:10:15-12:00");
    }

    #[rstest]
    #[case("X:10:00-11:00", TimeRangeError::UnknownDay("X".to_owned()))]
    #[case("CS", TimeRangeError::MissingDay("CS".to_owned()))]
    #[case("CS:10:00", TimeRangeError::MissingEnd("10:00".to_owned()))]
    #[case("CS:10-11:00", TimeRangeError::InvalidTime("10".to_owned()))]
    #[case("CS:25:00-26:00", TimeRangeError::InvalidTime("25:00".to_owned()))]
    fn rejects_malformed_ranges(#[case] input: &str, #[case] expected: TimeRangeError) {
        assert_eq!(input.parse::<TimeRange>(), Err(expected));
    }

    #[test]
    fn rejects_non_increasing_ranges() {
        let err = "H:11:00-11:00".parse::<TimeRange>().unwrap_err();
        assert!(matches!(err, TimeRangeError::NotIncreasing { .. }));
        let err = "H:12:00-11:00".parse::<TimeRange>().unwrap_err();
        assert!(matches!(err, TimeRangeError::NotIncreasing { .. }));
    }

    #[test]
    fn format_minutes_pads() {
        assert_eq!(format_minutes(485), "08:05");
    }
}
