// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction controller.
//!
//! Owns the view state and the geometry of the last interactive render. Every transition
//! happens synchronously on the caller's thread; the hit-box list is replaced wholesale once a
//! render has completed, never patched in place.

use std::fmt;

use tracing::{debug, info, warn};

use crate::layout::{layout_week, GridMetrics, LayoutError, Surface, SurfaceError, WeekLayout};
use crate::model::RenderId;
use crate::present::{RenderModel, RenderSession};
use crate::render::{render_week, Canvas, CanvasError, ExportImage, HitBox, RenderError, RenderMode};
use crate::ui::ViewState;

pub const MSG_CLEARED: &str = "Cleared selection.";
pub const MSG_NOTHING_TO_EXPORT: &str = "Nothing selected to export.";

#[derive(Debug, Clone, PartialEq)]
pub enum InteractError {
    /// Export was requested with an empty selection.
    EmptySelectionExport,
    /// An id that does not belong to the render model, usually from stale geometry.
    UnknownHitId { id: String },
    Surface(SurfaceError),
    Layout(LayoutError),
    Render(RenderError),
}

impl fmt::Display for InteractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelectionExport => f.write_str(MSG_NOTHING_TO_EXPORT),
            Self::UnknownHitId { id } => write!(f, "unknown session id: {id}"),
            Self::Surface(err) => write!(f, "surface error: {err}"),
            Self::Layout(err) => write!(f, "layout error: {err}"),
            Self::Render(err) => write!(f, "render error: {err}"),
        }
    }
}

impl std::error::Error for InteractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurfaceError> for InteractError {
    fn from(value: SurfaceError) -> Self {
        Self::Surface(value)
    }
}

impl From<LayoutError> for InteractError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<RenderError> for InteractError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<CanvasError> for InteractError {
    fn from(value: CanvasError) -> Self {
        Self::Render(RenderError::Canvas(value))
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    model: RenderModel,
    view: ViewState,
    metrics: GridMetrics,
    surface: Surface,
    layout: WeekLayout,
    geometry: Vec<HitBox>,
}

impl Controller {
    pub fn new(
        model: RenderModel,
        surface: Surface,
        metrics: GridMetrics,
    ) -> Result<Self, InteractError> {
        let view = ViewState::for_model(&model);
        let layout = layout_week(&model, surface, &metrics, |s| view.is_session_visible(s))?;
        Ok(Self {
            model,
            view,
            metrics,
            surface,
            layout,
            geometry: Vec::new(),
        })
    }

    pub fn model(&self) -> &RenderModel {
        &self.model
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn layout(&self) -> &WeekLayout {
        &self.layout
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Hit boxes of the last interactive render, in draw order.
    pub fn geometry(&self) -> &[HitBox] {
        &self.geometry
    }

    /// Flips visibility of a subject and re-lays out the week. The geometry cache is dropped
    /// until the next render.
    ///
    /// Returns the new visibility, or `None` for a code the model does not know (nothing
    /// changes in that case).
    pub fn toggle_subject_visibility(&mut self, code: &str) -> Result<Option<bool>, InteractError> {
        let Some(subject) = self.model.subject(code) else {
            warn!(subject = code, "visibility toggle for unknown subject ignored");
            return Ok(None);
        };
        let code = subject.code().clone();

        let mut view = self.view.clone();
        let visible = view.toggle_subject(&code);
        let layout = layout_week(&self.model, self.surface, &self.metrics, |s| {
            view.is_session_visible(s)
        })?;
        self.view = view;
        self.layout = layout;
        self.geometry.clear();

        debug!(subject = %code, visible, "toggled subject visibility");
        Ok(Some(visible))
    }

    /// Repaints `canvas` and replaces the geometry cache with the blocks just drawn.
    pub fn render(&mut self, canvas: &mut Canvas) -> Result<(), InteractError> {
        let geometry = render_week(
            &self.model,
            &self.view,
            &self.layout,
            RenderMode::Interactive,
            canvas,
        )?;
        self.geometry = geometry;
        Ok(())
    }

    /// Topmost block under `(x, y)`: the geometry is scanned from the last drawn block back.
    pub fn hit_test(&self, x: usize, y: usize) -> Option<&RenderId> {
        self.geometry
            .iter()
            .rev()
            .find(|hit| hit.rect.contains(x, y))
            .map(|hit| &hit.id)
    }

    /// Session under `(x, y)`, for inspectors and tooltips.
    pub fn session_at(&self, x: usize, y: usize) -> Option<&RenderSession> {
        self.hit_test(x, y).and_then(|id| self.model.session(id.as_str()))
    }

    /// Adds or removes `id` from the selection; returns whether it is selected afterwards.
    ///
    /// Unknown ids leave the state untouched.
    pub fn toggle_selection(&mut self, id: &str) -> Result<bool, InteractError> {
        let Some(session) = self.model.session(id) else {
            warn!(id, "selection toggle for unknown session ignored");
            return Err(InteractError::UnknownHitId { id: id.to_owned() });
        };
        let id = session.id().clone();
        let selected = self.view.toggle_selected(&id);
        debug!(%id, selected, total = self.view.selection_len(), "toggled selection");
        Ok(selected)
    }

    /// Toggles the selection of the block under `(x, y)`, if any.
    pub fn click(&mut self, x: usize, y: usize) -> Result<Option<(RenderId, bool)>, InteractError> {
        let Some(id) = self.hit_test(x, y).cloned() else {
            return Ok(None);
        };
        let selected = self.toggle_selection(id.as_str())?;
        Ok(Some((id, selected)))
    }

    pub fn clear_selection(&mut self) {
        let cleared = self.view.selection_len();
        self.view.clear_selection();
        debug!(cleared, "cleared selection");
    }

    /// Selects every session of the model, visible or not.
    pub fn select_all(&mut self) {
        for session in self.model.sessions() {
            self.view.select(session.id().clone());
        }
    }

    /// Rebuilds the layout for a new surface size. The geometry cache is dropped until the next
    /// render.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), InteractError> {
        let surface = Surface::new(width, height, &self.metrics)?;
        let view = &self.view;
        let layout = layout_week(&self.model, surface, &self.metrics, |s| {
            view.is_session_visible(s)
        })?;
        self.surface = surface;
        self.layout = layout;
        self.geometry.clear();
        debug!(width, height, "resized surface");
        Ok(())
    }

    /// Renders the visible selected sessions onto a fresh canvas the size of the interactive
    /// surface. Lanes are recomputed among the exported sessions only.
    ///
    /// Interactive state, the geometry cache included, is not touched.
    pub fn export_selection(&self) -> Result<ExportImage, InteractError> {
        if self.view.selection_len() == 0 {
            info!("export requested with empty selection");
            return Err(InteractError::EmptySelectionExport);
        }

        let view = &self.view;
        let layout = layout_week(&self.model, self.surface, &self.metrics, |s| {
            view.is_session_visible(s) && view.is_selected(s.id().as_str())
        })?;
        let mut canvas = Canvas::new(self.surface.width(), self.surface.height())?;
        render_week(&self.model, view, &layout, RenderMode::Export, &mut canvas)?;

        info!(
            sessions = layout.blocks().len(),
            width = canvas.width(),
            height = canvas.height(),
            "exported selection"
        );
        Ok(ExportImage::new(canvas))
    }

    /// `Selected X / Y.` or `Deselected X / Y.` for a toggled session.
    pub fn selection_message(&self, id: &str, selected: bool) -> Option<String> {
        let session = self.model.session(id)?;
        let verb = if selected { "Selected" } else { "Deselected" };
        Some(format!(
            "{verb} {} / {}.",
            session.subject_code(),
            session.session_code()
        ))
    }

    /// `Selected classes: N.`
    pub fn summary_message(&self) -> String {
        format!("Selected classes: {}.", self.view.selection_len())
    }

    /// Three-line description of a session as shown by the hover inspector.
    pub fn describe(&self, id: &str) -> Option<[String; 3]> {
        let session = self.model.session(id)?;
        let credits = self
            .model
            .subject(session.subject_code().as_str())
            .map(|s| format!(" · {} credits", s.credits()))
            .unwrap_or_default();
        Some([
            format!("({}) {}", session.session_code(), session.subject_name()),
            format!("({}){credits}", session.subject_code()),
            session.clock_range(),
        ])
    }
}

/// `timetable_<source>` with every run of characters outside `[A-Za-z0-9_-]` replaced by `_`.
pub fn export_file_stem(source: &str) -> String {
    let mut out = String::from("timetable_");
    let mut in_run = false;
    for ch in source.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}
