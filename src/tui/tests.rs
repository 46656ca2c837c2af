// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, Terminal};

use super::{draw, App};
use crate::interact::{Controller, MSG_CLEARED, MSG_NOTHING_TO_EXPORT};
use crate::layout::{GridMetrics, Surface};
use crate::model::fixtures::overlapping_pair;
use crate::present::build_render_model;

fn pair_app(export_dir: PathBuf) -> App {
    let metrics = GridMetrics::default();
    let surface = Surface::new(110, 44, &metrics).expect("surface");
    let model = build_render_model(&overlapping_pair().expect("pair")).with_source("pair.csv");
    App::new(Controller::new(model, surface, metrics).expect("controller"), export_dir)
}

fn draw_app(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| (0..width).map(|x| buffer.get(x, y).symbol()).collect::<String>())
        .collect()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Screen position of the middle of the `idx`-th drawn block.
fn block_center(app: &App, idx: usize) -> (u16, u16) {
    let (x0, y0) = app.grid_origin.expect("grid drawn");
    let rect = app.controller.geometry()[idx].rect;
    let x = u16::try_from(rect.x + rect.width / 2).expect("x");
    let y = u16::try_from(rect.y + rect.height / 2).expect("y");
    (x0 + x, y0 + y)
}

fn temp_export_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "timegrid-tui-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("create temp export dir");
    dir
}

#[test]
fn draw_fits_the_grid_to_the_panel_and_lists_subjects() {
    let mut app = pair_app(std::env::temp_dir());
    let rows = draw_app(&mut app, 140, 40);

    // Grid panel starts after the sidebar, inside its border.
    assert_eq!(app.grid_origin, Some((33, 1)));
    assert_eq!(app.controller.surface().width(), 140 - 32 - 2);
    assert_eq!(app.controller.surface().height(), 40 - 1 - 2);
    assert_eq!(app.controller.geometry().len(), 2);

    let screen = rows.join("\n");
    assert!(screen.contains("[x] First"), "{screen}");
    assert!(screen.contains("[x] Second"), "{screen}");
    assert!(screen.contains("pair.csv · 10:00–12:00"), "{screen}");
    assert!(rows[39].contains("Selected classes: 0."), "{}", rows[39]);
}

#[test]
fn clicking_a_block_toggles_its_selection() {
    let mut app = pair_app(std::env::temp_dir());
    draw_app(&mut app, 140, 40);

    let (column, row) = block_center(&app, 1);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    assert!(app.controller.view().is_selected("B__L1__0"));
    let toast = app.toast.clone().expect("toast");
    assert_eq!(toast.message, "Selected B / L1.");
    assert!(!toast.is_error);

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    assert!(!app.controller.view().is_selected("B__L1__0"));
    assert_eq!(app.toast.expect("toast").message, "Deselected B / L1.");
}

#[test]
fn clicks_outside_the_grid_are_ignored() {
    let mut app = pair_app(std::env::temp_dir());
    draw_app(&mut app, 140, 40);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 34, 2));
    assert_eq!(app.controller.view().selection_len(), 0);
    assert!(app.toast.is_none());
}

#[test]
fn hover_feeds_the_inspector() {
    let mut app = pair_app(std::env::temp_dir());
    draw_app(&mut app, 140, 40);

    let (column, row) = block_center(&app, 0);
    app.handle_mouse(mouse(MouseEventKind::Moved, column, row));
    assert_eq!(app.hover.as_ref().map(|id| id.as_str()), Some("A__L1__0"));
    let screen = draw_app(&mut app, 140, 40).join("\n");
    assert!(screen.contains("(L1) First"), "{screen}");
    assert!(screen.contains("(A) · 3 credits"), "{screen}");

    app.handle_mouse(mouse(MouseEventKind::Moved, 0, 0));
    assert!(app.hover.is_none());
    let screen = draw_app(&mut app, 140, 40).join("\n");
    assert!(screen.contains("Hover a class for details."), "{screen}");
}

#[test]
fn space_toggles_the_subject_under_the_cursor() {
    let mut app = pair_app(std::env::temp_dir());
    app.handle_key_code(KeyCode::Down);
    app.handle_key_code(KeyCode::Char(' '));
    assert!(!app.controller.view().is_subject_visible("B"));
    assert!(app.controller.view().is_subject_visible("A"));
    assert_eq!(app.toast.clone().expect("toast").message, "Hiding B.");

    let screen = draw_app(&mut app, 140, 40).join("\n");
    assert!(screen.contains("[ ] Second"), "{screen}");
    assert_eq!(app.controller.geometry().len(), 1);

    app.handle_key_code(KeyCode::Enter);
    assert!(app.controller.view().is_subject_visible("B"));
}

#[test]
fn cursor_stays_within_the_subject_list() {
    let mut app = pair_app(std::env::temp_dir());
    app.handle_key_code(KeyCode::Char('k'));
    assert_eq!(app.subjects_state.selected(), Some(0));
    for _ in 0..5 {
        app.handle_key_code(KeyCode::Char('j'));
    }
    assert_eq!(app.subjects_state.selected(), Some(1));
}

#[test]
fn clear_key_empties_the_selection() {
    let mut app = pair_app(std::env::temp_dir());
    app.controller.select_all();
    app.handle_key_code(KeyCode::Char('c'));
    assert_eq!(app.controller.view().selection_len(), 0);
    assert_eq!(app.toast.expect("toast").message, MSG_CLEARED);
}

#[test]
fn export_without_selection_reports_an_error() {
    let dir = temp_export_dir("empty");
    let mut app = pair_app(dir.clone());
    app.handle_key_code(KeyCode::Char('e'));
    let toast = app.toast.clone().expect("toast");
    assert_eq!(toast.message, MSG_NOTHING_TO_EXPORT);
    assert!(toast.is_error);
    assert_eq!(std::fs::read_dir(&dir).expect("read dir").count(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn export_writes_an_ansi_file_named_after_the_source() {
    let dir = temp_export_dir("export");
    let mut app = pair_app(dir.clone());
    app.controller.select_all();
    app.handle_key_code(KeyCode::Char('e'));

    let path = dir.join("timetable_pair_csv.ans");
    let bytes = std::fs::read(&path).expect("export file");
    assert_eq!(bytes.first(), Some(&0x1b));
    let toast = app.toast.clone().expect("toast");
    assert!(!toast.is_error, "{}", toast.message);
    assert_eq!(toast.message, format!("Exported {}.", path.display()));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn tiny_terminal_shows_a_message_instead_of_the_grid() {
    let mut app = pair_app(std::env::temp_dir());
    let screen = draw_app(&mut app, 50, 8).join("\n");
    assert!(app.grid_origin.is_none());
    assert!(screen.contains("Terminal"), "{screen}");
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 35, 3));
    assert_eq!(app.controller.view().selection_len(), 0);
}

#[test]
fn quit_keys() {
    for code in [KeyCode::Char('q'), KeyCode::Esc] {
        let mut app = pair_app(std::env::temp_dir());
        app.handle_key_code(code);
        assert!(app.should_quit);
    }
}
