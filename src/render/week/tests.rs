// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{block_lines, render_week, RenderError, RenderMode, Theme};
use crate::layout::{layout_week, CellRect, GridMetrics, Surface, WeekLayout};
use crate::model::fixtures::overlapping_pair;
use crate::model::SubjectCode;
use crate::present::{build_render_model, RenderModel};
use crate::render::Canvas;
use crate::ui::ViewState;

const WIDTH: usize = 110;
const HEIGHT: usize = 44;

struct Scene {
    model: RenderModel,
    view: ViewState,
    layout: WeekLayout,
}

#[fixture]
fn scene() -> Scene {
    let model = build_render_model(&overlapping_pair().expect("pair"));
    let view = ViewState::for_model(&model);
    let surface = Surface::new(WIDTH, HEIGHT, &GridMetrics::default()).expect("surface");
    let layout = layout_week(&model, surface, &GridMetrics::default(), |_| true).expect("layout");
    Scene {
        model,
        view,
        layout,
    }
}

fn canvas() -> Canvas {
    Canvas::new(WIDTH, HEIGHT).expect("canvas")
}

fn row_text(canvas: &Canvas, x: usize, y: usize, len: usize) -> String {
    (x..x + len)
        .map(|xx| canvas.get(xx, y).expect("in bounds"))
        .collect()
}

fn select(scene: &mut Scene, id: &str) {
    let id = scene.model.session(id).expect("session").id().clone();
    scene.view.toggle_selected(&id);
}

#[rstest]
fn rejects_canvas_of_a_different_size(scene: Scene) {
    let mut small = Canvas::new(WIDTH - 1, HEIGHT).expect("canvas");
    let err = render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut small,
    )
    .unwrap_err();
    assert!(matches!(err, RenderError::SizeMismatch { canvas_width: 109, .. }));
}

#[rstest]
fn interactive_render_returns_hit_boxes_in_draw_order(scene: Scene) {
    let mut canvas = canvas();
    let hits = render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut canvas,
    )
    .expect("render");
    let ids = hits.iter().map(|h| h.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["A__L1__0", "B__L1__0"]);
    assert_eq!(hits[0].rect, scene.layout.blocks()[0].rect);
    assert_eq!(
        hits[1].rect,
        CellRect {
            x: 79,
            y: 13,
            width: 8,
            height: 20
        }
    );
}

#[rstest]
fn export_render_produces_no_hit_boxes(mut scene: Scene) {
    select(&mut scene, "A__L1__0");
    let mut canvas = canvas();
    let hits = render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Export,
        &mut canvas,
    )
    .expect("render");
    assert!(hits.is_empty());
}

#[rstest]
fn selected_blocks_get_solid_borders_and_unselected_dashed(mut scene: Scene) {
    select(&mut scene, "A__L1__0");
    let mut canvas = canvas();
    render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut canvas,
    )
    .expect("render");

    // A: x 69..78, y 3..23
    assert_eq!(row_text(&canvas, 69, 3, 3), "╭──");
    assert_eq!(canvas.get(69, 10).unwrap(), '│');
    assert_eq!(canvas.get(77, 22).unwrap(), '╯');
    // B: x 79..87, y 13..33
    assert_eq!(row_text(&canvas, 79, 13, 3), "╭┄┄");
    assert_eq!(canvas.get(79, 20).unwrap(), '┆');
}

#[rstest]
fn selection_changes_fill_opacity(mut scene: Scene) {
    let theme = Theme::default();
    let color_a = scene.model.color_of("A").expect("color");

    let mut before = canvas();
    render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut before,
    )
    .expect("render");
    assert_eq!(
        before.style_at(72, 15).unwrap().bg,
        Some(color_a.over(theme.background, 0.28))
    );

    select(&mut scene, "A__L1__0");
    let mut after = canvas();
    render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut after,
    )
    .expect("render");
    assert_eq!(
        after.style_at(72, 15).unwrap().bg,
        Some(color_a.over(theme.background, 0.95))
    );
}

#[rstest]
fn block_text_is_truncated_and_time_split_when_narrow(scene: Scene) {
    let mut canvas = canvas();
    render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut canvas,
    )
    .expect("render");

    // inner area of A starts at (70, 4) and is 7 cells wide
    assert_eq!(row_text(&canvas, 70, 4, 7), "(L1) F…");
    assert_eq!(row_text(&canvas, 70, 5, 3), "(A)");
    assert_eq!(row_text(&canvas, 70, 6, 5), "10:00");
    assert_eq!(row_text(&canvas, 70, 7, 5), "11:00");
    assert!(canvas.style_at(70, 4).unwrap().bold);
}

#[rstest]
fn grid_lines_merge_and_carry_hour_labels(scene: Scene) {
    let mut canvas = canvas();
    render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut canvas,
    )
    .expect("render");

    // 11:00 sits at row 23; the time separator is x = 8
    assert_eq!(row_text(&canvas, 2, 23, 5), "11:00");
    assert_eq!(canvas.get(8, 23).unwrap(), '┼');
    assert_eq!(canvas.get(28, 23).unwrap(), '┼');
    // 10:30 is a half-hour line
    assert_eq!(canvas.get(10, 13).unwrap(), '┈');
    assert_eq!(canvas.get(48, 13).unwrap(), '│');
    // day labels in the header
    assert_eq!(row_text(&canvas, 70, 1, 2), "CS");
    assert_eq!(row_text(&canvas, 10, 1, 1), "H");
}

#[rstest]
fn export_draws_only_selected_sessions(mut scene: Scene) {
    let theme = Theme::default();
    select(&mut scene, "A__L1__0");
    let mut canvas = canvas();
    render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Export,
        &mut canvas,
    )
    .expect("render");

    assert_eq!(row_text(&canvas, 69, 3, 2), "╭─");
    // B's area stays background
    assert_eq!(canvas.style_at(82, 20).unwrap().bg, Some(theme.background));
    assert_eq!(canvas.get(82, 20).unwrap(), ' ');
}

#[rstest]
fn hidden_subjects_are_not_drawn(mut scene: Scene) {
    let b = SubjectCode::new("B").expect("code");
    scene.view.toggle_subject(&b);
    let mut canvas = canvas();
    let hits = render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut canvas,
    )
    .expect("render");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id.as_str(), "A__L1__0");
}

#[rstest]
fn repeated_renders_are_identical(scene: Scene) {
    let mut first = canvas();
    let mut second = canvas();
    let a = render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut first,
    )
    .expect("render");
    let b = render_week(
        &scene.model,
        &scene.view,
        &scene.layout,
        RenderMode::Interactive,
        &mut second,
    )
    .expect("render");
    assert_eq!(a, b);
    assert_eq!(first, second);
}

#[rstest]
#[case(20, 3, vec!["(L1) First", "(A)", "10:00–11:00"])]
#[case(7, 3, vec!["(L1) F…", "(A)", "10:00–…"])]
#[case(7, 4, vec!["(L1) F…", "(A)", "10:00", "11:00"])]
#[case(7, 2, vec!["(L1) F…", "(A)"])]
#[case(7, 0, vec![])]
fn block_lines_degrade_with_space(
    scene: Scene,
    #[case] width: usize,
    #[case] height: usize,
    #[case] expected: Vec<&str>,
) {
    let session = &scene.model.sessions()[0];
    let inner = CellRect {
        x: 0,
        y: 0,
        width,
        height,
    };
    let lines = block_lines(session, inner)
        .into_iter()
        .map(|(line, _)| line)
        .collect::<Vec<_>>();
    assert_eq!(lines, expected);
}
