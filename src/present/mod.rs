// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation builder.
//!
//! Projects a [`Timetable`] into a flat, sorted, denormalized [`RenderModel`] that layout,
//! rendering and interaction work against. The model is rebuilt from scratch whenever the source
//! data changes and is never mutated afterwards.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{format_minutes, DaySlot, RenderId, SessionCode, SubjectCode, Timetable};

pub mod palette;
pub mod snapshot;

pub use palette::{Palette, PaletteError, Rgb, PALETTE_ENV};
pub use snapshot::{
    snapshot_json_schema, CourseSnapshot, DaySnapshot, RenderSnapshot, SnapshotMeta,
    SubjectSnapshot,
};

/// Window shown when the timetable has no sessions.
pub const FALLBACK_WINDOW: DisplayWindow = DisplayWindow {
    start_min: 8 * 60,
    end_min: 20 * 60,
};

/// Hard bounds any computed window is clamped into.
pub const WINDOW_BOUNDS: DisplayWindow = DisplayWindow {
    start_min: 6 * 60,
    end_min: 22 * 60,
};

/// Vertical time span of the grid in minutes since midnight; always `start_min < end_min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    start_min: u16,
    end_min: u16,
}

impl DisplayWindow {
    pub fn start_min(self) -> u16 {
        self.start_min
    }

    pub fn end_min(self) -> u16 {
        self.end_min
    }

    pub fn span(self) -> u16 {
        self.end_min - self.start_min
    }

    /// Whether `[start, end)` shares at least one minute with the window.
    pub fn overlaps(self, start: u16, end: u16) -> bool {
        start < self.end_min && end > self.start_min
    }

    /// Whole-hour window covering every `(start, end)`, clamped into [`WINDOW_BOUNDS`].
    pub fn covering(spans: impl IntoIterator<Item = (u16, u16)>) -> Self {
        let mut bounds = None::<(u16, u16)>;
        for (start, end) in spans {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(start), hi.max(end)),
                None => (start, end),
            });
        }
        let Some((earliest, latest)) = bounds else {
            return FALLBACK_WINDOW;
        };

        let start_min = (earliest / 60 * 60).max(WINDOW_BOUNDS.start_min);
        let mut end_min = ((latest + 59) / 60 * 60).min(WINDOW_BOUNDS.end_min);
        if end_min <= start_min {
            end_min = start_min + 60;
        }
        Self { start_min, end_min }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectInfo {
    code: SubjectCode,
    name: String,
    credits: u32,
    color: Rgb,
}

impl SubjectInfo {
    pub fn code(&self) -> &SubjectCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// One session, flattened with its subject's display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSession {
    id: RenderId,
    subject_code: SubjectCode,
    subject_name: String,
    subject_credits: u32,
    session_code: SessionCode,
    occurrence: usize,
    day: DaySlot,
    start_min: u16,
    end_min: u16,
    time_label: String,
}

impl RenderSession {
    pub fn id(&self) -> &RenderId {
        &self.id
    }

    pub fn subject_code(&self) -> &SubjectCode {
        &self.subject_code
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn subject_credits(&self) -> u32 {
        self.subject_credits
    }

    pub fn session_code(&self) -> &SessionCode {
        &self.session_code
    }

    pub fn day(&self) -> DaySlot {
        self.day
    }

    pub fn start_min(&self) -> u16 {
        self.start_min
    }

    pub fn end_min(&self) -> u16 {
        self.end_min
    }

    /// Source notation, e.g. `CS:10:15-12:00`.
    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    /// `HH:MM–HH:MM` as drawn inside blocks.
    pub fn clock_range(&self) -> String {
        format!("{}–{}", format_minutes(self.start_min), format_minutes(self.end_min))
    }

    pub fn overlaps(&self, other: &RenderSession) -> bool {
        self.day == other.day && self.start_min < other.end_min && other.start_min < self.end_min
    }

    fn draw_order_key(&self) -> (usize, u16, u16, &str, &str, usize) {
        (
            self.day.ordinal(),
            self.start_min,
            self.end_min,
            self.subject_code.as_str(),
            self.session_code.as_str(),
            self.occurrence,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    source: Option<String>,
    window: DisplayWindow,
    subjects: Vec<SubjectInfo>,
    sessions: Vec<RenderSession>,
    session_index: BTreeMap<RenderId, usize>,
}

impl RenderModel {
    pub fn window(&self) -> DisplayWindow {
        self.window
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Subjects in load order.
    pub fn subjects(&self) -> &[SubjectInfo] {
        &self.subjects
    }

    pub fn subject(&self, code: &str) -> Option<&SubjectInfo> {
        self.subjects.iter().find(|s| s.code.as_str() == code)
    }

    /// Sessions in draw order.
    pub fn sessions(&self) -> &[RenderSession] {
        &self.sessions
    }

    pub fn session(&self, id: &str) -> Option<&RenderSession> {
        self.session_index.get(id).map(|&idx| &self.sessions[idx])
    }

    pub fn contains_session(&self, id: &str) -> bool {
        self.session_index.contains_key(id)
    }

    pub fn color_of(&self, subject_code: &str) -> Option<Rgb> {
        self.subject(subject_code).map(SubjectInfo::color)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            meta: SnapshotMeta {
                source: self.source.clone(),
                start_min: self.window.start_min,
                end_min: self.window.end_min,
                days: DaySlot::ALL
                    .iter()
                    .map(|day| DaySnapshot {
                        key: day.code().to_owned(),
                        label: day.label().to_owned(),
                    })
                    .collect(),
            },
            subjects: self
                .subjects
                .iter()
                .map(|s| {
                    (
                        s.code.to_string(),
                        SubjectSnapshot {
                            code: s.code.to_string(),
                            name: s.name.clone(),
                            credits: s.credits,
                            color: s.color.hex(),
                        },
                    )
                })
                .collect(),
            courses: self
                .sessions
                .iter()
                .map(|c| CourseSnapshot {
                    id: c.id.to_string(),
                    subject_code: c.subject_code.to_string(),
                    subject_name: c.subject_name.clone(),
                    subject_credits: c.subject_credits,
                    course_code: c.session_code.to_string(),
                    day: c.day.code().to_owned(),
                    start_min: c.start_min,
                    end_min: c.end_min,
                    time_str: c.time_label.clone(),
                })
                .collect(),
        }
    }
}

/// Builds the render model with the default palette.
pub fn build_render_model(timetable: &Timetable) -> RenderModel {
    build_render_model_with_palette(timetable, &Palette::default())
}

pub fn build_render_model_with_palette(timetable: &Timetable, palette: &Palette) -> RenderModel {
    let subjects = timetable
        .subjects()
        .iter()
        .enumerate()
        .map(|(idx, subject)| SubjectInfo {
            code: subject.code().clone(),
            name: subject.name().to_owned(),
            credits: subject.credits(),
            color: palette.color_for(idx),
        })
        .collect::<Vec<_>>();

    let mut sessions = Vec::with_capacity(timetable.session_count());
    for subject in timetable.subjects() {
        for (occurrence, session) in subject.sessions().iter().enumerate() {
            let range = session.range();
            sessions.push(RenderSession {
                id: RenderId::compose(subject.code(), session.code(), occurrence),
                subject_code: subject.code().clone(),
                subject_name: subject.name().to_owned(),
                subject_credits: subject.credits(),
                session_code: session.code().clone(),
                occurrence,
                day: range.day(),
                start_min: range.start().to_minutes(),
                end_min: range.end().to_minutes(),
                time_label: range.to_string(),
            });
        }
    }
    sessions.sort_by(|a, b| a.draw_order_key().cmp(&b.draw_order_key()));

    let session_index = sessions
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.id.clone(), idx))
        .collect::<BTreeMap<_, _>>();
    let window = DisplayWindow::covering(sessions.iter().map(|s| (s.start_min, s.end_min)));

    debug!(
        subjects = subjects.len(),
        sessions = sessions.len(),
        start_min = window.start_min,
        end_min = window.end_min,
        "built render model"
    );

    RenderModel {
        source: None,
        window,
        subjects,
        sessions,
        session_index,
    }
}
