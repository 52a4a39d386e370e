//! Animated statistic counters.

/// One `.stat-number` counting up from zero to the integer it displays.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    original: String,
    target: f64,
    increment: f64,
    current: f64,
    suffix: &'static str,
    done: bool,
}

impl Counter {
    /// Prepare a counter for `text`, reaching the target in `steps` ticks.
    ///
    /// Returns `None` when the text does not start with an integer.
    pub fn parse(text: &str, steps: u32) -> Option<Self> {
        let target = leading_integer(text)? as f64;
        let suffix = match (text.contains('+'), text.contains('%')) {
            (true, true) => "+%",
            (true, false) => "+",
            (false, true) => "%",
            (false, false) => "",
        };

        Some(Self {
            original: text.to_string(),
            target,
            increment: target / f64::from(steps.max(1)),
            current: 0.0,
            suffix,
            done: false,
        })
    }

    /// Advance one step. Returns `true` while more ticks are needed.
    pub fn tick(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.current += self.increment;
        if self.current >= self.target {
            self.done = true;
        }
        !self.done
    }

    /// Text to display now. Once finished this is the original text.
    pub fn text(&self) -> String {
        if self.done {
            self.original.clone()
        } else {
            format!("{}{}", self.current.floor(), self.suffix)
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

/// The integer at the start of `text`: optional leading whitespace, an
/// optional sign, then decimal digits. Anything after the digits is ignored.
pub fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("500+"), Some(500));
        assert_eq!(leading_integer("  98%"), Some(98));
        assert_eq!(leading_integer("-3 anos"), Some(-3));
        assert_eq!(leading_integer("24/7"), Some(24));
        assert_eq!(leading_integer("ISO 14001"), None);
        assert_eq!(leading_integer(""), None);
        assert_eq!(leading_integer("+"), None);
    }

    #[test]
    fn test_counter_counts_to_original_text() {
        let mut counter = Counter::parse("500+", 50).unwrap();
        assert_eq!(counter.text(), "0+");

        assert!(counter.tick());
        assert_eq!(counter.text(), "10+");

        let mut ticks = 1;
        while counter.tick() {
            ticks += 1;
        }
        assert_eq!(ticks + 1, 50);
        assert!(counter.is_done());
        assert_eq!(counter.text(), "500+");
        assert!(!counter.tick());
    }

    #[test]
    fn test_counter_suffixes() {
        let mut counter = Counter::parse("98%", 50).unwrap();
        counter.tick();
        assert_eq!(counter.text(), "1%");

        let mut both = Counter::parse("10+%", 2).unwrap();
        both.tick();
        assert_eq!(both.text(), "5+%");
    }

    #[test]
    fn test_zero_finishes_on_first_tick() {
        let mut counter = Counter::parse("0", 50).unwrap();
        assert!(!counter.tick());
        assert_eq!(counter.text(), "0");
    }

    #[test]
    fn test_negative_finishes_on_first_tick() {
        let mut counter = Counter::parse("-30 dias", 50).unwrap();
        assert!(!counter.tick());
        assert!(counter.is_done());
        assert_eq!(counter.text(), "-30 dias");
    }

    #[test]
    fn test_non_numeric_is_skipped() {
        assert!(Counter::parse("Certificado", 50).is_none());
    }
}
