//! Facial expression variants.

use std::fmt;

use serde::Serialize;

/// Facial expression, selecting eye and mouth geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    /// Straight-line mouth.
    #[default]
    Neutral,
    /// Lower half-disc mouth.
    Smile,
    /// Upper half-disc mouth.
    Sad,
    /// Left eye closed to a line, straight mouth.
    Winky,
    /// Smile with a tongue poking out.
    Tongue,
}

impl Expression {
    /// All variants in declaration order.
    pub const ALL: [Expression; 5] = [
        Expression::Neutral,
        Expression::Smile,
        Expression::Sad,
        Expression::Winky,
        Expression::Tongue,
    ];

    /// Lowercase name as used in prompts and JSON.
    pub fn name(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Smile => "smile",
            Expression::Sad => "sad",
            Expression::Winky => "winky",
            Expression::Tongue => "tongue",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
