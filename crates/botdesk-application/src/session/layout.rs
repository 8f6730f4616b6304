//! Responsive layout rules.
//!
//! On desktop the report sits beside the conversation and the drawer opens
//! from a hover strip at the screen edge. On mobile there is no hover strip;
//! the report becomes a full-screen overlay that starts minimized behind a
//! trigger card and must be expanded explicitly.

use botdesk_core::config::LayoutMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    mode: LayoutMode,
    report_minimized: bool,
}

impl LayoutState {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            report_minimized: true,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn hover_enabled(&self) -> bool {
        self.mode == LayoutMode::Desktop
    }

    /// Switches layout. The mobile overlay starts minimized again.
    pub fn set_mode(&mut self, mode: LayoutMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.report_minimized = true;
        true
    }

    /// Expands the mobile report overlay. Only possible on mobile while the
    /// panel is visible.
    pub fn expand_report(&mut self, panel_visible: bool) -> bool {
        if self.mode != LayoutMode::Mobile || !panel_visible || !self.report_minimized {
            return false;
        }
        self.report_minimized = false;
        true
    }

    pub fn minimize_report(&mut self) -> bool {
        if self.report_minimized {
            return false;
        }
        self.report_minimized = true;
        true
    }

    /// Whether the report covers the screen (mobile, expanded, panel shown).
    pub fn report_expanded(&self, panel_visible: bool) -> bool {
        panel_visible && self.mode == LayoutMode::Mobile && !self.report_minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_only_on_desktop() {
        assert!(LayoutState::new(LayoutMode::Desktop).hover_enabled());
        assert!(!LayoutState::new(LayoutMode::Mobile).hover_enabled());
    }

    #[test]
    fn test_expand_requires_mobile_and_visible_panel() {
        let mut desktop = LayoutState::new(LayoutMode::Desktop);
        assert!(!desktop.expand_report(true));

        let mut mobile = LayoutState::new(LayoutMode::Mobile);
        assert!(!mobile.expand_report(false));
        assert!(mobile.expand_report(true));
        assert!(mobile.report_expanded(true));
        assert!(!mobile.report_expanded(false));

        assert!(mobile.minimize_report());
        assert!(!mobile.report_expanded(true));
    }

    #[test]
    fn test_switching_mode_minimizes_overlay() {
        let mut layout = LayoutState::new(LayoutMode::Mobile);
        layout.expand_report(true);
        assert!(layout.set_mode(LayoutMode::Desktop));
        assert!(!layout.set_mode(LayoutMode::Desktop));
        layout.set_mode(LayoutMode::Mobile);
        assert!(!layout.report_expanded(true));
    }
}
