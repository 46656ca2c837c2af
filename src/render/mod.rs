// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering of the week grid.
//!
//! The renderer draws into a caller-supplied [`Canvas`] (a styled cell raster) and, for
//! interactive renders, returns the hit boxes of every block it drew in draw order.

use std::fmt;

use crate::present::Rgb;

pub mod export;
mod text;
pub mod week;

pub use export::ExportImage;
pub use text::canvas_to_string_trimmed;
pub use week::{render_week, HitBox, RenderError, RenderMode, Theme};

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoxEdges(u8);

impl BoxEdges {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1 << 0);
    const RIGHT: Self = Self(1 << 1);
    const UP: Self = Self(1 << 2);
    const DOWN: Self = Self(1 << 3);

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

fn box_edges_from_char(ch: char) -> Option<BoxEdges> {
    match ch {
        UNICODE_BOX_HORIZONTAL => Some(BoxEdges::LEFT.union(BoxEdges::RIGHT)),
        UNICODE_BOX_VERTICAL => Some(BoxEdges::UP.union(BoxEdges::DOWN)),
        UNICODE_BOX_TOP_LEFT => Some(BoxEdges::RIGHT.union(BoxEdges::DOWN)),
        UNICODE_BOX_TOP_RIGHT => Some(BoxEdges::LEFT.union(BoxEdges::DOWN)),
        UNICODE_BOX_BOTTOM_LEFT => Some(BoxEdges::RIGHT.union(BoxEdges::UP)),
        UNICODE_BOX_BOTTOM_RIGHT => Some(BoxEdges::LEFT.union(BoxEdges::UP)),
        UNICODE_BOX_TEE_RIGHT => Some(BoxEdges::UP.union(BoxEdges::DOWN).union(BoxEdges::RIGHT)),
        UNICODE_BOX_TEE_LEFT => Some(BoxEdges::UP.union(BoxEdges::DOWN).union(BoxEdges::LEFT)),
        UNICODE_BOX_TEE_DOWN => Some(BoxEdges::LEFT.union(BoxEdges::RIGHT).union(BoxEdges::DOWN)),
        UNICODE_BOX_TEE_UP => Some(BoxEdges::LEFT.union(BoxEdges::RIGHT).union(BoxEdges::UP)),
        UNICODE_BOX_CROSS => Some(
            BoxEdges::LEFT
                .union(BoxEdges::RIGHT)
                .union(BoxEdges::UP)
                .union(BoxEdges::DOWN),
        ),
        _ => None,
    }
}

fn box_char_from_edges(edges: BoxEdges) -> char {
    match edges.0 {
        0 => ' ',
        // Straight segments (including endpoints).
        1..=3 => UNICODE_BOX_HORIZONTAL,
        4 | 8 | 12 => UNICODE_BOX_VERTICAL,
        // Corners.
        10 => UNICODE_BOX_TOP_LEFT,
        9 => UNICODE_BOX_TOP_RIGHT,
        6 => UNICODE_BOX_BOTTOM_LEFT,
        5 => UNICODE_BOX_BOTTOM_RIGHT,
        // Tees.
        14 => UNICODE_BOX_TEE_RIGHT,
        13 => UNICODE_BOX_TEE_LEFT,
        11 => UNICODE_BOX_TEE_DOWN,
        7 => UNICODE_BOX_TEE_UP,
        _ => UNICODE_BOX_CROSS,
    }
}

/// Colors and attributes of a single cell. `None` colors mean "terminal default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

/// A fixed-size, bounds-checked raster of styled character cells.
///
/// Collision behavior is deterministic:
/// - [`Canvas::set`] merges Unicode box-drawing characters into junctions (`┼`, `├`, ...) and
///   overwrites anything else (last writer wins)
/// - [`Canvas::put`] always overwrites, box characters included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    box_edges: Vec<BoxEdges>,
    styles: Vec<CellStyle>,
}

impl Canvas {
    /// Creates a new canvas filled with unstyled spaces.
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        Self::new_filled(width, height, ' ', CellStyle::default())
    }

    pub fn new_filled(
        width: usize,
        height: usize,
        fill: char,
        style: CellStyle,
    ) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
            box_edges: vec![BoxEdges::NONE; len],
            styles: vec![style; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Returns the glyph at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.glyph_at(idx))
    }

    pub fn style_at(&self, x: usize, y: usize) -> Result<CellStyle, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.styles[idx])
    }

    /// Sets the glyph and style at `(x, y)`, merging box-drawing glyphs.
    pub fn set(
        &mut self,
        x: usize,
        y: usize,
        ch: char,
        style: CellStyle,
    ) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        if let Some(edges) = box_edges_from_char(ch) {
            self.box_edges[idx] = self.box_edges[idx].union(edges);
        } else {
            self.cells[idx] = ch;
            self.box_edges[idx] = BoxEdges::NONE;
        }
        self.styles[idx] = style;
        Ok(())
    }

    /// Sets the glyph and style at `(x, y)` without junction merging.
    pub fn put(
        &mut self,
        x: usize,
        y: usize,
        ch: char,
        style: CellStyle,
    ) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = ch;
        self.box_edges[idx] = BoxEdges::NONE;
        self.styles[idx] = style;
        Ok(())
    }

    /// Fills the entire canvas.
    pub fn fill(&mut self, ch: char, style: CellStyle) {
        self.cells.fill(ch);
        self.box_edges.fill(BoxEdges::NONE);
        self.styles.fill(style);
    }

    /// Fills the part of `[x, x+width) x [y, y+height)` that lies on the canvas.
    pub fn fill_rect(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        ch: char,
        style: CellStyle,
    ) {
        let x1 = x.saturating_add(width).min(self.width);
        let y1 = y.saturating_add(height).min(self.height);
        for yy in y..y1 {
            for xx in x..x1 {
                let idx = (yy * self.width) + xx;
                self.cells[idx] = ch;
                self.box_edges[idx] = BoxEdges::NONE;
                self.styles[idx] = style;
            }
        }
    }

    /// Writes `text` left-to-right starting at `(x, y)`.
    ///
    /// Behavior:
    /// - If `y` is out of bounds: returns an error.
    /// - If `text` exceeds the row: clips at the right edge.
    pub fn write_str(
        &mut self,
        x: usize,
        y: usize,
        text: &str,
        style: CellStyle,
    ) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let mut x = x;
        for ch in text.chars() {
            if x >= self.width {
                break;
            }
            self.put(x, y, ch, style)?;
            x += 1;
        }

        Ok(())
    }

    /// Draws a merging horizontal line from `x0..=x1` at `y`.
    pub fn draw_hline(
        &mut self,
        x0: usize,
        x1: usize,
        y: usize,
        style: CellStyle,
    ) -> Result<(), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.check_span(max_x, y)?;
        for x in min_x..=max_x {
            self.set(x, y, UNICODE_BOX_HORIZONTAL, style)?;
        }
        Ok(())
    }

    /// Draws a merging vertical line from `y0..=y1` at `x`.
    pub fn draw_vline(
        &mut self,
        x: usize,
        y0: usize,
        y1: usize,
        style: CellStyle,
    ) -> Result<(), CanvasError> {
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.check_span(x, max_y)?;
        for y in min_y..=max_y {
            self.set(x, y, UNICODE_BOX_VERTICAL, style)?;
        }
        Ok(())
    }

    /// Iterates `(glyph, style)` per row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Vec<(char, CellStyle)>> + '_ {
        (0..self.height).map(move |y| {
            (0..self.width)
                .map(|x| {
                    let idx = (y * self.width) + x;
                    (self.glyph_at(idx), self.styles[idx])
                })
                .collect()
        })
    }

    fn check_span(&self, x: usize, y: usize) -> Result<(), CanvasError> {
        if self.in_bounds(x, y) {
            Ok(())
        } else {
            Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        self.check_span(x, y)?;
        Ok((y * self.width) + x)
    }

    fn glyph_at(&self, idx: usize) -> char {
        let edges = self.box_edges[idx];
        if edges.is_empty() {
            return self.cells[idx];
        }
        box_char_from_edges(edges)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = (y * self.width) + x;
                f.write_char(self.glyph_at(idx))?;
            }

            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}
