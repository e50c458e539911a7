//! Prompt to appearance mapping.
//!
//! Both lookups are plain substring tests over the lowercased prompt, so the
//! same text always yields the same face.

use tracing::debug;

use crate::error::{EmojiError, Result};
use crate::types::{Appearance, Colour, Expression};

/// Colour keywords, checked in order; the first hit wins.
const COLOUR_RULES: [(&str, Colour); 4] = [
    ("pink", Colour::PINK),
    ("green", Colour::LIGHT_GREEN),
    ("blue", Colour::SKY_BLUE),
    ("brown", Colour::TAN),
];

/// One step of the expression override chain.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionOverride {
    /// Any of these substrings triggers the override.
    pub triggers: &'static [&'static str],
    pub expression: Expression,
}

impl ExpressionOverride {
    fn matches(&self, prompt: &str) -> bool {
        self.triggers.iter().any(|t| prompt.contains(t))
    }
}

/// Applied in order starting from `Neutral`; every match replaces the
/// current expression, so the last matching entry wins.
pub const EXPRESSION_OVERRIDES: [ExpressionOverride; 4] = [
    ExpressionOverride {
        triggers: &["smile", "happy", ":"],
        expression: Expression::Smile,
    },
    ExpressionOverride {
        triggers: &["sad", "frown"],
        expression: Expression::Sad,
    },
    ExpressionOverride {
        triggers: &["wink", ";)"],
        expression: Expression::Winky,
    },
    ExpressionOverride {
        triggers: &["tongue", ":p"],
        expression: Expression::Tongue,
    },
];

/// Normalize a prompt for matching. Returns `None` for blank prompts.
pub fn normalize(prompt: &str) -> Option<String> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Face colour for an already-normalized prompt.
pub fn resolve_colour(prompt: &str) -> Colour {
    COLOUR_RULES
        .iter()
        .find(|(keyword, _)| prompt.contains(keyword))
        .map_or(Colour::DEFAULT_YELLOW, |&(_, colour)| colour)
}

/// Expression for an already-normalized prompt.
pub fn resolve_expression(prompt: &str) -> Expression {
    EXPRESSION_OVERRIDES
        .iter()
        .fold(Expression::Neutral, |current, rule| {
            if rule.matches(prompt) {
                rule.expression
            } else {
                current
            }
        })
}

/// Resolve free text into an appearance of the given size.
pub fn resolve(prompt: &str, size: u32) -> Result<Appearance> {
    let prompt = normalize(prompt).ok_or(EmojiError::EmptyInput)?;
    let colour = resolve_colour(&prompt);
    let expression = resolve_expression(&prompt);
    debug!(%colour, %expression, "resolved prompt");
    Appearance::new(colour, expression, size)
}
