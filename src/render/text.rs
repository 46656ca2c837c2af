// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Canvas;

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text_len(text) <= max_len {
        return text.to_owned();
    }
    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out = text.chars().take(max_len - 1).collect::<String>();
    out.push('…');
    out
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Plain glyphs of `canvas`, with trailing spaces and trailing blank lines removed.
pub fn canvas_to_string_trimmed(canvas: &Canvas) -> String {
    let mut lines = canvas
        .rows()
        .map(|row| {
            let line = row.into_iter().map(|(ch, _)| ch).collect::<String>();
            line.trim_end_matches(' ').to_owned()
        })
        .collect::<Vec<_>>();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{canvas_to_string_trimmed, text_len, truncate_with_ellipsis};
    use crate::render::{Canvas, CellStyle};

    #[test]
    fn truncate_with_ellipsis_handles_small_widths() {
        assert_eq!(truncate_with_ellipsis("MAT101", 0), "");
        assert_eq!(truncate_with_ellipsis("MAT101", 1), "…");
        assert_eq!(truncate_with_ellipsis("M", 1), "M");
        assert_eq!(truncate_with_ellipsis("MAT101", 4), "MAT…");
        assert_eq!(truncate_with_ellipsis("MAT101", 6), "MAT101");
    }

    #[test]
    fn truncate_with_ellipsis_counts_chars_not_bytes() {
        assert_eq!(text_len("Ökológia"), 8);
        assert_eq!(truncate_with_ellipsis("Ökológia", 3), "Ök…");
    }

    #[test]
    fn canvas_to_string_trimmed_removes_trailing_spaces_and_empty_lines() {
        let mut canvas = Canvas::new(3, 3).expect("canvas");
        canvas.put(0, 0, 'A', CellStyle::default()).expect("put");
        canvas.put(1, 1, 'B', CellStyle::default()).expect("put");
        assert_eq!(canvas_to_string_trimmed(&canvas), "A\n B");
    }
}
