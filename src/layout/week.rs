// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{DaySlot, RenderId};
use crate::present::{RenderModel, RenderSession};

use super::lanes::{assign_lanes, MinuteSpan};
use super::timescale::TimeScale;
use super::LayoutError;

/// Fixed spacing of the week grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub pad: usize,
    pub header_height: usize,
    pub time_col_width: usize,
    pub block_pad: usize,
    pub lane_gap: usize,
    /// Minutes between horizontal grid lines.
    pub grid_step_min: u16,
    pub min_block_width: usize,
    pub min_block_height: usize,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            pad: 1,
            header_height: 2,
            time_col_width: 7,
            block_pad: 1,
            lane_gap: 1,
            grid_step_min: 30,
            min_block_width: 3,
            min_block_height: 1,
        }
    }
}

impl GridMetrics {
    /// Smallest surface that still leaves one cell per day column and a non-empty time band.
    pub fn min_surface(&self) -> (usize, usize) {
        let days = DaySlot::ALL.len();
        let width = self.pad * 2 + self.time_col_width + days * (self.block_pad * 2 + 1);
        let height = self.pad * 2 + self.header_height + 2;
        (width, height)
    }
}

/// Size of a rendering target in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    width: usize,
    height: usize,
}

impl Surface {
    pub fn new(width: usize, height: usize, metrics: &GridMetrics) -> Result<Self, SurfaceError> {
        let (min_width, min_height) = metrics.min_surface();
        if width < min_width || height < min_height {
            return Err(SurfaceError::TooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    TooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall {
                width,
                height,
                min_width,
                min_height,
            } => write!(
                f,
                "surface {width}x{height} is smaller than the minimum {min_width}x{min_height}"
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// An axis-aligned rectangle of cells, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CellRect {
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    pub day: DaySlot,
    pub x: usize,
    pub width: usize,
}

/// Where one session block goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPlacement {
    pub id: RenderId,
    /// Index into [`RenderModel::sessions`].
    pub session_idx: usize,
    pub day: DaySlot,
    pub lane: usize,
    pub lane_count: usize,
    pub rect: CellRect,
}

/// Geometry of a full week render: grid columns, time scale and blocks in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    surface: Surface,
    metrics: GridMetrics,
    scale: TimeScale,
    columns: Vec<DayColumn>,
    blocks: Vec<BlockPlacement>,
}

impl WeekLayout {
    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    pub fn columns(&self) -> &[DayColumn] {
        &self.columns
    }

    /// Blocks by day column, then in model draw order within a day.
    pub fn blocks(&self) -> &[BlockPlacement] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&BlockPlacement> {
        self.blocks.iter().find(|b| b.id.as_str() == id)
    }

    /// Lane count of `day` (0 when nothing is placed there).
    pub fn lane_count(&self, day: DaySlot) -> usize {
        self.blocks
            .iter()
            .find(|b| b.day == day)
            .map(|b| b.lane_count)
            .unwrap_or(0)
    }

    /// First cell right of the time column.
    pub fn grid_left(&self) -> usize {
        self.metrics.pad + self.metrics.time_col_width
    }

    pub fn grid_right(&self) -> usize {
        self.surface.width - self.metrics.pad
    }

    pub fn grid_top(&self) -> usize {
        self.metrics.pad + self.metrics.header_height
    }

    pub fn grid_bottom(&self) -> usize {
        self.surface.height - self.metrics.pad
    }
}

/// Lays out every session `include` accepts that overlaps the display window.
///
/// Lanes are computed per day among included sessions only, so changing what is included
/// (hiding a subject, export filtering) can change lane counts for the rest.
pub fn layout_week(
    model: &RenderModel,
    surface: Surface,
    metrics: &GridMetrics,
    include: impl Fn(&RenderSession) -> bool,
) -> Result<WeekLayout, LayoutError> {
    let grid_left = metrics.pad + metrics.time_col_width;
    let grid_top = metrics.pad + metrics.header_height;
    let grid_bottom = surface.height.saturating_sub(metrics.pad);
    let usable_width = surface
        .width
        .saturating_sub(metrics.pad)
        .saturating_sub(grid_left);
    let day_width = usable_width / DaySlot::ALL.len();
    if day_width == 0 {
        return Err(LayoutError::NoRoomForDays {
            width: surface.width,
        });
    }

    let scale = TimeScale::new(model.window(), grid_top as f64, grid_bottom as f64)?;

    let columns = DaySlot::ALL
        .iter()
        .enumerate()
        .map(|(idx, &day)| DayColumn {
            day,
            x: grid_left + idx * day_width,
            width: day_width,
        })
        .collect::<Vec<_>>();

    let window = model.window();
    let mut blocks = Vec::new();
    for column in &columns {
        let day_sessions = model
            .sessions()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.day() == column.day && include(s))
            .filter(|(_, s)| window.overlaps(s.start_min(), s.end_min()))
            .collect::<Vec<_>>();
        let spans = day_sessions
            .iter()
            .map(|(_, s)| MinuteSpan::new(s.start_min(), s.end_min()))
            .collect::<Vec<_>>();
        let assignment = assign_lanes(&spans);
        let lane_count = assignment.lane_count();

        for (pos, &(session_idx, session)) in day_sessions.iter().enumerate() {
            let lane = assignment.lane_of(pos).unwrap_or(0);
            let rect = block_rect(
                column,
                lane,
                lane_count,
                session,
                &scale,
                metrics,
                (grid_top, grid_bottom),
            );
            blocks.push(BlockPlacement {
                id: session.id().clone(),
                session_idx,
                day: column.day,
                lane,
                lane_count,
                rect,
            });
        }
    }

    Ok(WeekLayout {
        surface,
        metrics: *metrics,
        scale,
        columns,
        blocks,
    })
}

fn block_rect(
    column: &DayColumn,
    lane: usize,
    lane_count: usize,
    session: &RenderSession,
    scale: &TimeScale,
    metrics: &GridMetrics,
    (grid_top, grid_bottom): (usize, usize),
) -> CellRect {
    let lanes = lane_count.max(1) as f64;
    let gap = metrics.lane_gap as f64;
    let usable = column.width as f64 - 2.0 * metrics.block_pad as f64;
    let lane_width = (usable - gap * (lanes - 1.0)) / lanes;
    let x = column.x as f64 + metrics.block_pad as f64 + lane as f64 * (lane_width + gap);

    let left = x.round().max(0.0) as usize;
    let right = (x + lane_width).round().max(0.0) as usize;
    let width = right.saturating_sub(left).max(metrics.min_block_width);

    let y_start = scale.minute_to_y(f64::from(session.start_min()));
    let y_end = scale.minute_to_y(f64::from(session.end_min()));
    // Clipped to the grid band; parts outside the window are not drawn.
    let top = (y_start.round().max(grid_top as f64) as usize).min(grid_bottom.saturating_sub(1));
    let bottom = (y_end.round().max(0.0) as usize).min(grid_bottom);
    let height = bottom
        .saturating_sub(top)
        .max(metrics.min_block_height)
        .min(grid_bottom.saturating_sub(grid_top));
    let top = top.min(grid_bottom.saturating_sub(height)).max(grid_top);

    CellRect {
        x: left,
        y: top,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::{layout_week, CellRect, GridMetrics, Surface, SurfaceError};
    use crate::model::fixtures::{demo_timetable, overlapping_pair, timetable_from_rows};
    use crate::model::DaySlot;
    use crate::present::build_render_model;

    fn surface() -> Surface {
        Surface::new(110, 44, &GridMetrics::default()).expect("surface")
    }

    #[test]
    fn surface_rejects_tiny_sizes() {
        let metrics = GridMetrics::default();
        let (min_w, min_h) = metrics.min_surface();
        assert!(Surface::new(min_w, min_h, &metrics).is_ok());
        assert_eq!(
            Surface::new(min_w - 1, min_h, &metrics),
            Err(SurfaceError::TooSmall {
                width: min_w - 1,
                height: min_h,
                min_width: min_w,
                min_height: min_h
            })
        );
    }

    #[test]
    fn columns_split_width_evenly_in_day_order() {
        let model = build_render_model(&demo_timetable().expect("demo"));
        let layout =
            layout_week(&model, surface(), &GridMetrics::default(), |_| true).expect("layout");
        let days = layout.columns().iter().map(|c| c.day).collect::<Vec<_>>();
        assert_eq!(days, DaySlot::ALL.to_vec());
        // (110 - 1 - 8) / 5 = 20
        assert!(layout.columns().iter().all(|c| c.width == 20));
        assert_eq!(layout.columns()[0].x, 8);
        assert_eq!(layout.columns()[4].x, 88);
    }

    #[test]
    fn overlapping_sessions_are_placed_side_by_side() {
        let model = build_render_model(&overlapping_pair().expect("pair"));
        let layout =
            layout_week(&model, surface(), &GridMetrics::default(), |_| true).expect("layout");
        assert_eq!(layout.blocks().len(), 2);
        assert_eq!(layout.lane_count(DaySlot::Cs), 2);
        let a = layout.blocks()[0].rect;
        let b = layout.blocks()[1].rect;
        assert!(a.right() <= b.x, "{a:?} vs {b:?}");
        assert_eq!(layout.blocks()[0].lane, 0);
        assert_eq!(layout.blocks()[1].lane, 1);
    }

    #[test]
    fn excluded_sessions_free_their_lane() {
        let model = build_render_model(&overlapping_pair().expect("pair"));
        let layout = layout_week(&model, surface(), &GridMetrics::default(), |s| {
            s.subject_code().as_str() != "B"
        })
        .expect("layout");
        assert_eq!(layout.blocks().len(), 1);
        assert_eq!(layout.lane_count(DaySlot::Cs), 1);
        let cs = layout.columns()[DaySlot::Cs.ordinal()];
        let rect = layout.blocks()[0].rect;
        assert_eq!(rect.x, cs.x + 1);
        assert_eq!(rect.width, cs.width - 2);
    }

    #[test]
    fn block_rows_follow_the_time_scale() {
        let model = build_render_model(&overlapping_pair().expect("pair"));
        let layout =
            layout_week(&model, surface(), &GridMetrics::default(), |_| true).expect("layout");
        // window 10:00-12:00 over rows 3..43
        assert_eq!(layout.blocks()[0].rect.y, 3);
        assert_eq!(layout.blocks()[0].rect.height, 20);
        assert_eq!(layout.blocks()[1].rect.y, 13);
        assert_eq!(layout.blocks()[1].rect.bottom(), 33);
    }

    #[test]
    fn blocks_stay_inside_the_grid_band() {
        let sessions: &[(&str, &str)] = &[("X", "K:00:10-01:00"), ("Y", "K:05:30-07:00")];
        let timetable = timetable_from_rows(&[("Early", "E", 1, sessions)]).expect("rows");
        let model = build_render_model(&timetable);
        // window clamps to 06:00-07:00 over rows 3..43
        assert_eq!(
            (model.window().start_min(), model.window().end_min()),
            (6 * 60, 7 * 60)
        );

        let layout =
            layout_week(&model, surface(), &GridMetrics::default(), |_| true).expect("layout");
        let ids = layout.blocks().iter().map(|b| b.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["E__Y__1"]);
        assert_eq!(layout.lane_count(DaySlot::K), 1);
        let rect = layout.blocks()[0].rect;
        assert_eq!(rect.y, layout.grid_top());
        assert_eq!(rect.bottom(), layout.grid_bottom());
    }

    #[test]
    fn layout_is_deterministic() {
        let model = build_render_model(&demo_timetable().expect("demo"));
        let a = layout_week(&model, surface(), &GridMetrics::default(), |_| true).expect("a");
        let b = layout_week(&model, surface(), &GridMetrics::default(), |_| true).expect("b");
        assert_eq!(a, b);
    }

    #[test]
    fn cell_rect_contains_is_half_open() {
        let rect = CellRect {
            x: 2,
            y: 3,
            width: 4,
            height: 2,
        };
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 4));
        assert!(!rect.contains(6, 4));
        assert!(!rect.contains(5, 5));
    }
}
