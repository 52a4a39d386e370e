//! Typewriter effect for the hero title.
//!
//! The title's markup is split into steps: one character per step, except
//! that a whole tag (`<...>`) is a single step so partially typed markup is
//! never produced.

/// Border shown as a caret while typing.
pub const CARET: &str = "2px solid #ffd700";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingEffect {
    steps: Vec<String>,
    position: usize,
    typed: String,
}

impl TypingEffect {
    /// Prepare to retype `html` from scratch.
    pub fn new(html: &str) -> Self {
        Self {
            steps: split_steps(html).into_iter().map(str::to_string).collect(),
            position: 0,
            typed: String::new(),
        }
    }

    /// Type the next step. Returns `true` if more steps remain.
    pub fn advance(&mut self) -> bool {
        if let Some(step) = self.steps.get(self.position) {
            self.typed.push_str(step);
            self.position += 1;
        }
        !self.is_done()
    }

    /// Markup typed so far.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_done(&self) -> bool {
        self.position >= self.steps.len()
    }

    /// Value of the title's `border-right` style.
    pub fn caret(&self) -> &'static str {
        if self.is_done() {
            "none"
        } else {
            CARET
        }
    }
}

/// Split markup into typing steps.
///
/// An unterminated `<` swallows the rest of the input as one step.
pub fn split_steps(html: &str) -> Vec<&str> {
    let mut steps = Vec::new();
    let mut rest = html;

    while let Some(c) = rest.chars().next() {
        let len = if c == '<' {
            rest.find('>').map(|end| end + 1).unwrap_or(rest.len())
        } else {
            c.len_utf8()
        };
        let (step, tail) = rest.split_at(len);
        steps.push(step);
        rest = tail;
    }

    steps
}
