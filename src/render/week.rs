// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::layout::{BlockPlacement, CellRect, WeekLayout};
use crate::model::{format_minutes, RenderId};
use crate::present::{RenderModel, RenderSession, Rgb};
use crate::ui::ViewState;

use super::text::{text_len, truncate_with_ellipsis};
use super::{Canvas, CanvasError, CellStyle};

const SELECTED_FILL_ALPHA: f32 = 0.95;
const UNSELECTED_FILL_ALPHA: f32 = 0.28;
const SELECTED_BORDER_ALPHA: f32 = 0.85;
const UNSELECTED_BORDER_ALPHA: f32 = 0.25;
const SELECTED_TEXT_ALPHA: f32 = 0.92 * 0.85;
const UNSELECTED_TEXT_ALPHA: f32 = 0.92 * 0.65;

const SOLID_BORDER: BorderGlyphs = BorderGlyphs {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    horizontal: '─',
    vertical: '│',
};

const DASHED_BORDER: BorderGlyphs = BorderGlyphs {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    horizontal: '┄',
    vertical: '┆',
};

const HALF_HOUR_GLYPH: char = '┈';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Every visible session, selection shown by style; hit boxes are produced.
    Interactive,
    /// Only visible selected sessions, all drawn as selected; no hit boxes.
    Export,
}

/// Screen rectangle of one drawn block, in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitBox {
    pub id: RenderId,
    pub rect: CellRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub block_text: Rgb,
    pub line: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::from_u32(0x0B0E14),
            text: Rgb::from_u32(0xE5E7EB),
            muted: Rgb::from_u32(0x9CA3AF),
            block_text: Rgb::from_u32(0x111827),
            line: Rgb::from_u32(0xFFFFFF),
        }
    }
}

impl Theme {
    fn base(&self) -> CellStyle {
        CellStyle::default().fg(self.text).bg(self.background)
    }

    fn header_bg(&self) -> Rgb {
        self.line.over(self.background, 0.03)
    }

    fn line_style(&self, alpha: f32, bg: Rgb) -> CellStyle {
        CellStyle::default().fg(self.line.over(bg, alpha)).bg(bg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    SizeMismatch {
        canvas_width: usize,
        canvas_height: usize,
        surface_width: usize,
        surface_height: usize,
    },
    UnknownSession {
        id: RenderId,
    },
    Canvas(CanvasError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch {
                canvas_width,
                canvas_height,
                surface_width,
                surface_height,
            } => write!(
                f,
                "canvas {canvas_width}x{canvas_height} does not match laid out surface {surface_width}x{surface_height}"
            ),
            Self::UnknownSession { id } => write!(f, "layout references unknown session {id}"),
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CanvasError> for RenderError {
    fn from(value: CanvasError) -> Self {
        Self::Canvas(value)
    }
}

/// Renders the week grid with the default theme.
pub fn render_week(
    model: &RenderModel,
    view: &ViewState,
    layout: &WeekLayout,
    mode: RenderMode,
    canvas: &mut Canvas,
) -> Result<Vec<HitBox>, RenderError> {
    render_week_with_theme(model, view, layout, mode, &Theme::default(), canvas)
}

/// Draws background, header, time grid, day separators and then every block of `layout` in
/// order, so later blocks cover earlier ones. The canvas is fully repainted.
///
/// Returns the hit boxes of the drawn blocks in draw order ([`RenderMode::Interactive`] only).
pub fn render_week_with_theme(
    model: &RenderModel,
    view: &ViewState,
    layout: &WeekLayout,
    mode: RenderMode,
    theme: &Theme,
    canvas: &mut Canvas,
) -> Result<Vec<HitBox>, RenderError> {
    let surface = layout.surface();
    if canvas.width() != surface.width() || canvas.height() != surface.height() {
        return Err(RenderError::SizeMismatch {
            canvas_width: canvas.width(),
            canvas_height: canvas.height(),
            surface_width: surface.width(),
            surface_height: surface.height(),
        });
    }

    canvas.fill(' ', theme.base());
    draw_header(layout, theme, canvas)?;
    draw_time_grid(model, layout, theme, canvas)?;
    draw_day_separators(layout, theme, canvas)?;

    let mut hit_boxes = Vec::new();
    for block in layout.blocks() {
        let session = model
            .sessions()
            .get(block.session_idx)
            .filter(|s| s.id() == &block.id)
            .ok_or_else(|| RenderError::UnknownSession {
                id: block.id.clone(),
            })?;
        if !view.is_session_visible(session) {
            continue;
        }

        let selected = match mode {
            RenderMode::Interactive => view.is_selected(session.id().as_str()),
            RenderMode::Export => {
                if !view.is_selected(session.id().as_str()) {
                    continue;
                }
                true
            }
        };

        let color = model
            .color_of(session.subject_code().as_str())
            .unwrap_or(theme.muted);
        draw_block(canvas, theme, block, session, color, selected, mode)?;

        if mode == RenderMode::Interactive {
            hit_boxes.push(HitBox {
                id: block.id.clone(),
                rect: block.rect,
            });
        }
    }

    Ok(hit_boxes)
}

fn draw_header(layout: &WeekLayout, theme: &Theme, canvas: &mut Canvas) -> Result<(), RenderError> {
    let metrics = layout.metrics();
    let header_bg = theme.header_bg();
    let left = metrics.pad;
    let right = layout.grid_right().min(canvas.width());
    canvas.fill_rect(
        left,
        metrics.pad,
        right.saturating_sub(left),
        metrics.header_height,
        ' ',
        CellStyle::default().bg(header_bg),
    );

    let label_row = metrics.pad + metrics.header_height.saturating_sub(1) / 2;
    let label_style = CellStyle::default().fg(theme.text).bg(header_bg).bold();
    for column in layout.columns() {
        let label = truncate_with_ellipsis(column.day.label(), column.width.saturating_sub(3));
        let x = column.x + 2;
        if x < canvas.width() && label_row < canvas.height() {
            canvas.write_str(x, label_row, &label, label_style)?;
        }
    }
    Ok(())
}

fn draw_time_grid(
    model: &RenderModel,
    layout: &WeekLayout,
    theme: &Theme,
    canvas: &mut Canvas,
) -> Result<(), RenderError> {
    let metrics = layout.metrics();
    let window = model.window();
    let step = metrics.grid_step_min.max(1);
    let left = metrics.pad;
    let right = grid_end_x(layout, canvas);
    let max_row = canvas.height().saturating_sub(1);

    let hour_style = theme.line_style(0.12, theme.background);
    let half_style = theme.line_style(0.06, theme.background);
    let label_style = CellStyle::default().fg(theme.muted).bg(theme.background);

    let mut minute = (window.start_min() + step - 1) / step * step;
    while minute <= window.end_min() {
        let y = layout.scale().minute_to_y(f64::from(minute)).round().max(0.0) as usize;
        let y = y.min(max_row);
        if minute % 60 == 0 {
            canvas.draw_hline(left, right, y, hour_style)?;
            let label = format_minutes(minute);
            let end = layout.grid_left().saturating_sub(1);
            let x = end.saturating_sub(text_len(&label)).max(left);
            canvas.write_str(x, y, &label, label_style)?;
        } else {
            for x in layout.grid_left()..=right {
                canvas.set(x, y, HALF_HOUR_GLYPH, half_style)?;
            }
        }
        minute += step;
    }
    Ok(())
}

fn draw_day_separators(
    layout: &WeekLayout,
    theme: &Theme,
    canvas: &mut Canvas,
) -> Result<(), RenderError> {
    let metrics = layout.metrics();
    let header_style = theme.line_style(0.10, theme.header_bg());
    let grid_style = theme.line_style(0.10, theme.background);
    let header_top = metrics.pad;
    let header_bottom = layout.grid_top().saturating_sub(1);
    let bottom = layout.grid_bottom().min(canvas.height().saturating_sub(1));

    let xs = layout
        .columns()
        .iter()
        .map(|c| c.x)
        .chain(std::iter::once(grid_end_x(layout, canvas)));
    for x in xs {
        if header_bottom >= header_top {
            canvas.draw_vline(x, header_top, header_bottom, header_style)?;
        }
        if bottom >= layout.grid_top() {
            canvas.draw_vline(x, layout.grid_top(), bottom, grid_style)?;
        }
    }
    Ok(())
}

/// Column of the right border: end of the last day column.
fn grid_end_x(layout: &WeekLayout, canvas: &Canvas) -> usize {
    layout
        .columns()
        .last()
        .map(|c| c.x + c.width)
        .unwrap_or_else(|| layout.grid_right())
        .min(canvas.width().saturating_sub(1))
}

struct BorderGlyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

fn draw_block(
    canvas: &mut Canvas,
    theme: &Theme,
    block: &BlockPlacement,
    session: &RenderSession,
    color: Rgb,
    selected: bool,
    mode: RenderMode,
) -> Result<(), RenderError> {
    let rect = block.rect;
    let fill = color.over(
        theme.background,
        if selected {
            SELECTED_FILL_ALPHA
        } else {
            UNSELECTED_FILL_ALPHA
        },
    );
    let fill_style = CellStyle::default().bg(fill);
    canvas.fill_rect(rect.x, rect.y, rect.width, rect.height, ' ', fill_style);

    let bordered = rect.width >= 3 && rect.height >= 3;
    if bordered {
        let border_alpha = if selected {
            SELECTED_BORDER_ALPHA
        } else {
            UNSELECTED_BORDER_ALPHA
        };
        let glyphs = if selected || mode == RenderMode::Export {
            &SOLID_BORDER
        } else {
            &DASHED_BORDER
        };
        let style = CellStyle::default().fg(theme.line.over(fill, border_alpha)).bg(fill);
        draw_border(canvas, rect, glyphs, style)?;
    }

    let inner = if bordered {
        CellRect {
            x: rect.x + 1,
            y: rect.y + 1,
            width: rect.width - 2,
            height: rect.height - 2,
        }
    } else {
        rect
    };
    let text_alpha = if selected {
        SELECTED_TEXT_ALPHA
    } else {
        UNSELECTED_TEXT_ALPHA
    };
    let text_style = CellStyle::default()
        .fg(theme.block_text.over(fill, text_alpha))
        .bg(fill);
    for (row, (line, bold)) in block_lines(session, inner).into_iter().enumerate() {
        let style = if bold { text_style.bold() } else { text_style };
        put_text_clipped(canvas, inner.x, inner.y + row, &line, style)?;
    }
    Ok(())
}

fn draw_border(
    canvas: &mut Canvas,
    rect: CellRect,
    glyphs: &BorderGlyphs,
    style: CellStyle,
) -> Result<(), RenderError> {
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    for x in rect.x..=right {
        let (top, low) = if x == rect.x {
            (glyphs.top_left, glyphs.bottom_left)
        } else if x == right {
            (glyphs.top_right, glyphs.bottom_right)
        } else {
            (glyphs.horizontal, glyphs.horizontal)
        };
        put_clipped(canvas, x, rect.y, top, style)?;
        put_clipped(canvas, x, bottom, low, style)?;
    }
    for y in (rect.y + 1)..bottom {
        put_clipped(canvas, rect.x, y, glyphs.vertical, style)?;
        put_clipped(canvas, right, y, glyphs.vertical, style)?;
    }
    Ok(())
}

/// Text rows for a block: `(course) subject`, `(subject code)` and the time range.
///
/// Every line is truncated to the inner width. The time range moves to two lines (start, end)
/// only when it does not fit on one and the block has room for both.
fn block_lines(session: &RenderSession, inner: CellRect) -> Vec<(String, bool)> {
    let width = inner.width;
    let mut lines = vec![
        (
            truncate_with_ellipsis(
                &format!("({}) {}", session.session_code(), session.subject_name()),
                width,
            ),
            true,
        ),
        (
            truncate_with_ellipsis(&format!("({})", session.subject_code()), width),
            false,
        ),
    ];

    let range = session.clock_range();
    let can_split = inner.height >= lines.len() + 2;
    if text_len(&range) <= width || !can_split {
        lines.push((truncate_with_ellipsis(&range, width), false));
    } else {
        lines.push((format_minutes(session.start_min()), false));
        lines.push((format_minutes(session.end_min()), false));
    }

    lines.truncate(inner.height);
    lines
}

fn put_clipped(
    canvas: &mut Canvas,
    x: usize,
    y: usize,
    ch: char,
    style: CellStyle,
) -> Result<(), RenderError> {
    if canvas.in_bounds(x, y) {
        canvas.put(x, y, ch, style)?;
    }
    Ok(())
}

fn put_text_clipped(
    canvas: &mut Canvas,
    x: usize,
    y: usize,
    text: &str,
    style: CellStyle,
) -> Result<(), RenderError> {
    if x < canvas.width() && y < canvas.height() {
        canvas.write_str(x, y, text, style)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
