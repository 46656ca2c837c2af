// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::present::Rgb;
use crate::render::{Canvas, CellStyle};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TuiTheme {
    pub(crate) bg: Color,
    pub(crate) fg: Color,
    pub(crate) muted: Color,
    pub(crate) focus: Color,
    pub(crate) danger: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            bg: rgb_color(Rgb::from_u32(0x0B0E14)),
            fg: rgb_color(Rgb::from_u32(0xE5E7EB)),
            muted: rgb_color(Rgb::from_u32(0x9CA3AF)),
            focus: Color::LightGreen,
            danger: Color::LightRed,
        }
    }
}

impl TuiTheme {
    pub(crate) fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.muted)
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.focus)
        } else {
            self.muted_style()
        }
    }

    pub(crate) fn cursor_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn status_style(&self, is_error: bool) -> Style {
        if is_error {
            self.base_style().fg(self.danger).add_modifier(Modifier::BOLD)
        } else {
            self.base_style()
        }
    }
}

pub(crate) fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub(crate) fn cell_style(style: CellStyle) -> Style {
    let mut out = Style::default();
    if let Some(fg) = style.fg {
        out = out.fg(rgb_color(fg));
    }
    if let Some(bg) = style.bg {
        out = out.bg(rgb_color(bg));
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.dim {
        out = out.add_modifier(Modifier::DIM);
    }
    out
}

/// Converts a canvas into styled lines, one span per run of equally styled cells.
pub(crate) fn canvas_text(canvas: &Canvas) -> Text<'static> {
    let mut out = Text::default();
    for row in canvas.rows() {
        let mut spans = Vec::<Span<'static>>::new();
        let mut buf = String::new();
        let mut current = None::<CellStyle>;
        for (ch, style) in row {
            if current != Some(style) {
                if let Some(prev) = current {
                    spans.push(Span::styled(std::mem::take(&mut buf), cell_style(prev)));
                }
                current = Some(style);
            }
            buf.push(ch);
        }
        if let Some(prev) = current {
            spans.push(Span::styled(buf, cell_style(prev)));
        }
        out.lines.push(Line::from(spans));
    }
    out
}
