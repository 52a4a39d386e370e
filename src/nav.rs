//! Navigation bar: mobile menu, scroll state and active section.

use serde::{Deserialize, Serialize};

use crate::settings::SiteSettings;

/// Mobile menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close the menu. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Navbar appearance derived from the scroll position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavbarState {
    /// Compact style once the page has scrolled past the threshold.
    pub scrolled: bool,
    /// Slid out of view while scrolling down past the hide threshold.
    pub hidden: bool,
    last_scroll_top: f64,
}

impl NavbarState {
    pub fn on_scroll(&mut self, scroll_top: f64, settings: &SiteSettings) {
        self.scrolled = scroll_top > settings.navbar_scrolled_threshold;
        self.hidden = scroll_top > self.last_scroll_top && scroll_top > settings.navbar_hide_threshold;
        self.last_scroll_top = scroll_top;
    }
}

/// A page section that a nav link can point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub offset_top: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, offset_top: f64) -> Self {
        Self {
            id: id.into(),
            offset_top,
        }
    }
}

/// The section the reader is in: the last one, in document order, whose
/// top minus `activation_offset` has been scrolled past.
pub fn active_section(sections: &[Section], scroll_y: f64, activation_offset: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| scroll_y >= s.offset_top - activation_offset)
        .map(|s| s.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_close() {
        let mut nav = NavState::default();
        nav.toggle();
        assert!(nav.is_open());
        assert!(nav.close());
        assert!(!nav.is_open());
        assert!(!nav.close());
    }

    #[test]
    fn test_navbar_scroll_states() {
        let settings = SiteSettings::default();
        let mut navbar = NavbarState::default();

        navbar.on_scroll(50.0, &settings);
        assert!(!navbar.scrolled);
        assert!(!navbar.hidden);

        navbar.on_scroll(150.0, &settings);
        assert!(navbar.scrolled);
        assert!(!navbar.hidden, "below hide threshold");

        navbar.on_scroll(400.0, &settings);
        assert!(navbar.hidden, "scrolling down past 200");

        navbar.on_scroll(350.0, &settings);
        assert!(!navbar.hidden, "scrolling up shows the navbar");
        assert!(navbar.scrolled);
    }

    #[test]
    fn test_active_section() {
        let sections = vec![
            Section::new("inicio", 0.0),
            Section::new("servicos", 800.0),
            Section::new("contato", 1600.0),
        ];

        assert_eq!(active_section(&sections, 0.0, 200.0), Some("inicio"));
        assert_eq!(active_section(&sections, 599.0, 200.0), Some("inicio"));
        assert_eq!(active_section(&sections, 600.0, 200.0), Some("servicos"));
        assert_eq!(active_section(&sections, 5000.0, 200.0), Some("contato"));
        assert_eq!(active_section(&[], 10.0, 200.0), None);
    }
}
