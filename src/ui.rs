// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! View state shared between the controller, the renderer and the terminal UI.
//!
//! Holds which subjects are shown and which sessions are selected. Selections are independent
//! of visibility: hiding a subject keeps its sessions selected until they are toggled or the
//! selection is cleared.

use std::collections::BTreeSet;

use crate::model::{RenderId, SubjectCode};
use crate::present::{RenderModel, RenderSession};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    rev: u64,
    visible_subjects: BTreeSet<SubjectCode>,
    selected: BTreeSet<RenderId>,
}

impl ViewState {
    /// Every subject of `model` visible, nothing selected.
    pub fn for_model(model: &RenderModel) -> Self {
        Self {
            rev: 0,
            visible_subjects: model.subjects().iter().map(|s| s.code().clone()).collect(),
            selected: BTreeSet::new(),
        }
    }

    /// Bumped on every change that affects what gets drawn.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn visible_subjects(&self) -> &BTreeSet<SubjectCode> {
        &self.visible_subjects
    }

    pub fn selected(&self) -> &BTreeSet<RenderId> {
        &self.selected
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_subject_visible(&self, code: &str) -> bool {
        self.visible_subjects.contains(code)
    }

    pub fn is_session_visible(&self, session: &RenderSession) -> bool {
        self.is_subject_visible(session.subject_code().as_str())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Flips visibility of `code`; returns whether it is visible afterwards.
    pub fn toggle_subject(&mut self, code: &SubjectCode) -> bool {
        let visible = if self.visible_subjects.remove(code.as_str()) {
            false
        } else {
            self.visible_subjects.insert(code.clone());
            true
        };
        self.bump();
        visible
    }

    /// Flips selection of `id`; returns whether it is selected afterwards.
    pub fn toggle_selected(&mut self, id: &RenderId) -> bool {
        let selected = if self.selected.remove(id.as_str()) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        };
        self.bump();
        selected
    }

    pub fn select(&mut self, id: RenderId) {
        if self.selected.insert(id) {
            self.bump();
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.bump();
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::ViewState;
    use crate::model::fixtures::overlapping_pair;
    use crate::model::{RenderId, SessionCode, SubjectCode};
    use crate::present::build_render_model;

    fn first_a() -> RenderId {
        let subject = SubjectCode::new("A").expect("code");
        let session = SessionCode::new("L1").expect("code");
        RenderId::compose(&subject, &session, 0)
    }

    fn state() -> ViewState {
        ViewState::for_model(&build_render_model(&overlapping_pair().expect("pair")))
    }

    #[test]
    fn starts_with_everything_visible_and_nothing_selected() {
        let state = state();
        assert!(state.is_subject_visible("A"));
        assert!(state.is_subject_visible("B"));
        assert_eq!(state.selection_len(), 0);
        assert_eq!(state.rev(), 0);
    }

    #[test]
    fn toggles_report_new_membership_and_bump_rev() {
        let mut state = state();
        let b = SubjectCode::new("B").expect("code");
        assert!(!state.toggle_subject(&b));
        assert!(!state.is_subject_visible("B"));
        assert!(state.toggle_subject(&b));
        assert_eq!(state.rev(), 2);

        let id = first_a();
        assert!(state.toggle_selected(&id));
        assert!(state.is_selected("A__L1__0"));
        assert!(!state.toggle_selected(&id));
        assert_eq!(state.rev(), 4);
    }

    #[test]
    fn clearing_an_empty_selection_is_not_a_change() {
        let mut state = state();
        state.clear_selection();
        assert_eq!(state.rev(), 0);
        state.select(first_a());
        state.clear_selection();
        assert_eq!(state.selection_len(), 0);
        assert_eq!(state.rev(), 2);
    }
}
