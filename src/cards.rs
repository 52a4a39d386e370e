//! Service card hover and keyboard behavior.

pub const HOVER_TRANSFORM: &str = "translateY(-8px) scale(1.02)";
pub const FEATURED_TRANSFORM: &str = "scale(1.05)";
pub const REST_TRANSFORM: &str = "translateY(0) scale(1)";

/// Transform of a card after the pointer enters or leaves it.
///
/// Featured cards rest slightly enlarged.
pub fn hover_transform(entered: bool, featured: bool) -> &'static str {
    match (entered, featured) {
        (true, _) => HOVER_TRANSFORM,
        (false, true) => FEATURED_TRANSFORM,
        (false, false) => REST_TRANSFORM,
    }
}

/// Whether a key press on a focused card follows its service link.
pub fn activates(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_transform() {
        assert_eq!(hover_transform(true, false), HOVER_TRANSFORM);
        assert_eq!(hover_transform(true, true), HOVER_TRANSFORM);
        assert_eq!(hover_transform(false, true), "scale(1.05)");
        assert_eq!(hover_transform(false, false), "translateY(0) scale(1)");
    }

    #[test]
    fn test_activation_keys() {
        assert!(activates("Enter"));
        assert!(activates(" "));
        assert!(!activates("Tab"));
        assert!(!activates("Escape"));
    }
}
