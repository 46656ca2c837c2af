// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::time::Duration;

use criterion::Criterion;
use timegrid::interact::Controller;
use timegrid::layout::{GridMetrics, Surface};
use timegrid::model::fixtures::demo_timetable;
use timegrid::model::{DaySlot, SessionCode, Subject, SubjectCode, Timetable};
use timegrid::present::{build_render_model, RenderModel};

pub const WIDTH: usize = 160;
pub const HEIGHT: usize = 60;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// The built-in demo week.
    Demo,
    /// 40 subjects, 3 sessions each, spread over the week.
    Spread,
    /// 60 sessions piled onto one day, most of them overlapping.
    Crowded,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Spread => "spread",
            Self::Crowded => "crowded",
        }
    }

    pub const ALL: [Case; 3] = [Case::Demo, Case::Spread, Case::Crowded];
}

fn hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn generated(subjects: usize, sessions_per_subject: usize, days: &[DaySlot]) -> Timetable {
    let mut timetable = Timetable::new();
    for s in 0..subjects {
        let code = SubjectCode::new(format!("SUB{s:03}")).expect("subject code");
        let mut subject = Subject::new(format!("Subject {s}"), code, (s % 6) as u32 + 1);
        for k in 0..sessions_per_subject {
            let idx = s * sessions_per_subject + k;
            let day = days[idx % days.len()];
            let start = 8 * 60 + ((idx * 35) % (10 * 60)) as u16;
            let end = start + 45 + ((idx % 4) as u16) * 30;
            let raw = format!("{}:{}-{}", day.code(), hhmm(start), hhmm(end));
            let session = SessionCode::new(format!("S{k}")).expect("session code");
            subject.add_session(session, &raw).expect("session");
        }
        timetable.add_subject(subject).expect("subject");
    }
    timetable
}

pub fn timetable(case: Case) -> Timetable {
    match case {
        Case::Demo => demo_timetable().expect("demo"),
        Case::Spread => generated(40, 3, &DaySlot::ALL),
        Case::Crowded => generated(60, 1, &[DaySlot::Cs]),
    }
}

pub fn model(case: Case) -> RenderModel {
    build_render_model(&timetable(case))
}

pub fn controller(case: Case) -> Controller {
    let metrics = GridMetrics::default();
    let surface = Surface::new(WIDTH, HEIGHT, &metrics).expect("surface");
    Controller::new(model(case), surface, metrics).expect("controller")
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<usize>().ok()).unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<u64>().ok()).unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let sample_size = env_usize("BENCH_SAMPLE_SIZE", 60).clamp(10, 200);
    let warmup_secs = env_u64("BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs = env_u64("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
}
