// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Timegrid: weekly timetable grid (model, lane layout, cell renderer, interaction, TUI).
//!
//! Data flows one way: a [`model::Timetable`] becomes a [`present::RenderModel`], which the
//! [`layout`] engine places on a [`layout::Surface`]; [`render`] paints it onto a
//! [`render::Canvas`] and [`interact::Controller`] owns the view state in between.

pub mod format;
pub mod interact;
pub mod layout;
pub mod model;
pub mod present;
pub mod render;
pub mod tui;
pub mod ui;
