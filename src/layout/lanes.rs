// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

/// A half-open `[start, end)` interval in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinuteSpan {
    pub start: u16,
    pub end: u16,
}

impl MinuteSpan {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn overlaps(self, other: MinuteSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Lane per input span (same indexing as the input) plus the number of lanes opened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaneAssignment {
    lanes: Vec<usize>,
    lane_count: usize,
}

impl LaneAssignment {
    pub fn lane_of(&self, idx: usize) -> Option<usize> {
        self.lanes.get(idx).copied()
    }

    pub fn lanes(&self) -> &[usize] {
        &self.lanes
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
}

/// First-fit interval partitioning.
///
/// Spans are visited in `(start, end)` order (ties keep input order); each goes into the lowest
/// lane whose last end is `<= start`, or opens a new lane. Two spans sharing a lane never
/// overlap. The lane count is not guaranteed minimal.
pub fn assign_lanes(spans: &[MinuteSpan]) -> LaneAssignment {
    let mut order = (0..spans.len()).collect::<Vec<_>>();
    order.sort_by_key(|&idx| (spans[idx].start, spans[idx].end));

    let mut lane_ends = SmallVec::<[u16; 8]>::new();
    let mut lanes = vec![0usize; spans.len()];

    for idx in order {
        let span = spans[idx];
        let lane = match lane_ends.iter().position(|&end| end <= span.start) {
            Some(lane) => {
                lane_ends[lane] = span.end;
                lane
            }
            None => {
                lane_ends.push(span.end);
                lane_ends.len() - 1
            }
        };
        lanes[idx] = lane;
    }

    LaneAssignment {
        lanes,
        lane_count: lane_ends.len(),
    }
}
