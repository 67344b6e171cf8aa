// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Anti-hijack lock for the decision TUI (§4.3.3, §9 "Cyclic graphs / mutable
//! UI model"). The lock is a property of the client session, never the
//! store, and lives here as a pure reducer so it's testable without a
//! terminal: `update(state, event) -> state`.

use gt_core::DecisionId;

/// Text-entry mode of the decision list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Rationale,
    /// Free-text is specified but disabled; the UI shows a notice (§4.8).
    FreeTextDisabled,
}

/// State for a single client session's decision list, including the
/// anti-hijack lock.
#[derive(Debug, Clone, Default)]
pub struct DecisionListState {
    ids: Vec<DecisionId>,
    cursor: usize,
    locked: Option<DecisionId>,
    selection: Option<usize>,
    rationale: String,
    input_mode: InputMode,
}

impl DecisionListState {
    pub fn new(ids: Vec<DecisionId>) -> Self {
        Self {
            ids,
            ..Default::default()
        }
    }

    pub fn locked_id(&self) -> Option<&DecisionId> {
        self.locked.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> Option<&DecisionId> {
        self.ids.get(self.cursor)
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Move the cursor by `delta` (clamped to the list bounds). Navigating
    /// clears any active lock (§4.3.3).
    pub fn navigate(&mut self, delta: isize) {
        if self.ids.is_empty() {
            return;
        }
        let len = self.ids.len() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len - 1);
        self.cursor = next as usize;
        self.locked = None;
        self.selection = None;
        self.rationale.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Select an option number for the currently highlighted decision: sets
    /// the lock to that decision and enters rationale entry (§4.3.3).
    pub fn select_option(&mut self, choice: usize) {
        if let Some(id) = self.highlighted().cloned() {
            self.locked = Some(id);
            self.selection = Some(choice);
            self.input_mode = InputMode::Rationale;
        }
    }

    pub fn type_rationale_char(&mut self, c: char) {
        if self.input_mode == InputMode::Rationale {
            self.rationale.push(c);
        }
    }

    pub fn backspace_rationale(&mut self) {
        if self.input_mode == InputMode::Rationale {
            self.rationale.pop();
        }
    }

    /// Refresh the list with a fresh id ordering. If the locked decision
    /// still exists, the cursor is repositioned to it regardless of new
    /// order; otherwise the lock, selection, rationale, and input mode are
    /// all cleared (§4.3.3).
    pub fn refresh(&mut self, ids: Vec<DecisionId>) {
        self.ids = ids;
        match &self.locked {
            Some(locked) => match self.ids.iter().position(|id| id == locked) {
                Some(pos) => self.cursor = pos,
                None => self.clear_lock(),
            },
            None => {
                self.cursor = self.cursor.min(self.ids.len().saturating_sub(1));
            }
        }
    }

    fn clear_lock(&mut self) {
        self.locked = None;
        self.selection = None;
        self.rationale.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Attempt to confirm the pending response. Returns `Some((choice,
    /// rationale))` only when the locked id still matches the currently
    /// highlighted one; otherwise refuses and clears the lock (§4.3.3).
    pub fn confirm(&mut self) -> Option<(usize, Option<String>)> {
        let locked = self.locked.clone()?;
        let choice = self.selection?;
        let highlighted = self.highlighted().cloned();
        if highlighted.as_ref() != Some(&locked) {
            self.clear_lock();
            return None;
        }
        let rationale = if self.rationale.is_empty() {
            None
        } else {
            Some(self.rationale.clone())
        };
        self.clear_lock();
        Some((choice, rationale))
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
