//! Report panel visibility state machine.
//!
//! The panel state is global session UI state. It is recomputed on every
//! assistant selection and every completed response round; nothing about it
//! is remembered per assistant.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PanelState {
    #[default]
    Hidden,
    Visible,
}

impl PanelState {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Holds the current [`PanelState`] and applies the transition rules.
///
/// Every transition method returns `true` when the state changed.
#[derive(Debug, Clone, Default)]
pub struct PanelVisibility {
    state: PanelState,
}

impl PanelVisibility {
    pub fn new(state: PanelState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Hard reset on selection: visible iff the reporting assistant was chosen.
    pub fn on_assistant_selected(&mut self, is_reporting: bool) -> bool {
        let next = if is_reporting {
            PanelState::Visible
        } else {
            PanelState::Hidden
        };
        self.set(next)
    }

    /// A round without the directive leaves the panel as it is.
    pub fn on_round_completed(&mut self, panel_requested: bool) -> bool {
        if panel_requested {
            self.set(PanelState::Visible)
        } else {
            false
        }
    }

    pub fn discard(&mut self) -> bool {
        self.set(PanelState::Hidden)
    }

    fn set(&mut self, next: PanelState) -> bool {
        let changed = self.state != next;
        self.state = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_resets_visibility() {
        let mut panel = PanelVisibility::default();
        assert!(panel.on_assistant_selected(true));
        assert_eq!(panel.state(), PanelState::Visible);

        assert!(panel.on_assistant_selected(false));
        assert_eq!(panel.state(), PanelState::Hidden);
    }

    #[test]
    fn test_directive_shows_panel_from_any_state() {
        let mut panel = PanelVisibility::new(PanelState::Hidden);
        assert!(panel.on_round_completed(true));
        assert!(!panel.on_round_completed(true));
        assert_eq!(panel.state(), PanelState::Visible);
    }

    #[test]
    fn test_round_without_directive_changes_nothing() {
        let mut visible = PanelVisibility::new(PanelState::Visible);
        assert!(!visible.on_round_completed(false));
        assert_eq!(visible.state(), PanelState::Visible);

        let mut hidden = PanelVisibility::new(PanelState::Hidden);
        assert!(!hidden.on_round_completed(false));
        assert_eq!(hidden.state(), PanelState::Hidden);
    }

    #[test]
    fn test_discard_hides_unconditionally() {
        let mut panel = PanelVisibility::new(PanelState::Visible);
        assert!(panel.discard());
        assert!(!panel.discard());
        assert_eq!(panel.state(), PanelState::Hidden);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PanelState::Visible.to_string(), "visible");
        assert_eq!("hidden".parse::<PanelState>().unwrap(), PanelState::Hidden);
    }
}
