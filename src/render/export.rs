// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::present::Rgb;

use super::{canvas_to_string_trimmed, Canvas, CellStyle};

pub const DATA_URI_PREFIX: &str = "data:text/plain;charset=utf-8;base64,";

/// The export-mode render of a selection, detached from the interactive surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportImage {
    canvas: Canvas,
}

impl ExportImage {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn width(&self) -> usize {
        self.canvas.width()
    }

    pub fn height(&self) -> usize {
        self.canvas.height()
    }

    pub fn to_plain_text(&self) -> String {
        canvas_to_string_trimmed(&self.canvas)
    }

    /// 24-bit ANSI encoding; every row ends with an attribute reset and a newline.
    pub fn to_ansi(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.canvas.width() * self.canvas.height() * 4);
        for row in self.canvas.rows() {
            let mut current = None::<CellStyle>;
            for (ch, style) in row {
                if current != Some(style) {
                    write_style(&mut out, style)?;
                    current = Some(style);
                }
                queue!(out, Print(ch))?;
            }
            queue!(out, SetAttribute(Attribute::Reset), Print('\n'))?;
        }
        out.flush()?;
        Ok(out)
    }

    /// `data:` URI of the ANSI encoding, base64 encoded.
    pub fn to_data_uri(&self) -> io::Result<String> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let ansi = self.to_ansi()?;
        Ok(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(ansi)))
    }
}

fn write_style(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(to_color(fg)))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(to_color(bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
