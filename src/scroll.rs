//! Scroll-driven effects: parallax, reading progress, reveal-on-scroll and
//! anchor scrolling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nav::Section;

/// Layout measurements taken by the shell on every scroll event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
    /// Sections with an id, in document order.
    pub sections: Vec<Section>,
}

/// Hero translation for the parallax effect.
pub fn parallax_offset(scroll_top: f64, rate: f64) -> f64 {
    scroll_top * rate
}

/// How far through the page the reader is, in percent.
///
/// A page that does not scroll reads as 0 %.
pub fn reading_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Which class an element gains when it first becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealKind {
    /// Service and benefit cards, about features.
    Reveal,
    /// `[data-aos]` elements when no animation library is present.
    AnimateIn,
}

impl RevealKind {
    pub fn class(&self) -> &'static str {
        match self {
            RevealKind::Reveal => "revealed",
            RevealKind::AnimateIn => "animate-in",
        }
    }
}

/// Elements that have been revealed. Revealing is one-way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSet {
    revealed: BTreeMap<String, RevealKind>,
}

impl RevealSet {
    /// Record an intersection. Returns `true` the first time only.
    pub fn reveal(&mut self, target: &str, kind: RevealKind) -> bool {
        if self.revealed.contains_key(target) {
            return false;
        }
        self.revealed.insert(target.to_string(), kind);
        true
    }

    pub fn is_revealed(&self, target: &str) -> bool {
        self.revealed.contains_key(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RevealKind)> {
        self.revealed.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// The element id an in-page anchor points at (`"#contato"` -> `"contato"`).
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position that puts an element just below the fixed header.
pub fn scroll_target(element_offset_top: f64, header_offset: f64) -> f64 {
    element_offset_top - header_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax() {
        assert_eq!(parallax_offset(0.0, -0.5), 0.0);
        assert_eq!(parallax_offset(300.0, -0.5), -150.0);
    }

    #[test]
    fn test_reading_progress() {
        assert_eq!(reading_progress(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(reading_progress(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(reading_progress(1000.0, 2000.0, 1000.0), 100.0);
        assert_eq!(reading_progress(1200.0, 2000.0, 1000.0), 100.0);
        assert_eq!(reading_progress(0.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn test_reveal_once() {
        let mut set = RevealSet::default();
        assert!(set.reveal("card-0", RevealKind::Reveal));
        assert!(!set.reveal("card-0", RevealKind::Reveal));
        assert!(set.is_revealed("card-0"));
        assert!(!set.is_revealed("card-1"));
        assert_eq!(RevealKind::AnimateIn.class(), "animate-in");
    }

    #[test]
    fn test_anchor_targets() {
        assert_eq!(anchor_id("#contato"), Some("contato"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("/sobre"), None);
        assert_eq!(scroll_target(1000.0, 80.0), 920.0);
    }
}
