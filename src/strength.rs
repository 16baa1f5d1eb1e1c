//! Password strength scoring.
//!
//! The score is a UX hint shown next to a password input while the user
//! types. Acceptance of a password is decided by the schema's password rule,
//! not by this module.

use serde::{Deserialize, Serialize};

/// Characters that satisfy the special-symbol requirement.
pub const SPECIAL_CHARACTERS: &str = "$&+,:;=?@#|'<>.^*()%!-";

/// Length a password must exceed to avoid the short-password penalty.
const SHORT_PASSWORD_MAX: usize = 7;

const FLOOR: i32 = 10;

/// Character-class requirement checked on every keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    Digit,
    Lowercase,
    Uppercase,
    Special,
}

impl Requirement {
    pub const ALL: [Requirement; 4] = [
        Requirement::Digit,
        Requirement::Lowercase,
        Requirement::Uppercase,
        Requirement::Special,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Digit => "Includes number",
            Self::Lowercase => "Includes lowercase letter",
            Self::Uppercase => "Includes uppercase letter",
            Self::Special => "Includes special symbol",
        }
    }

    pub fn is_met(self, password: &str) -> bool {
        match self {
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Special => password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }
}

/// One line of the requirement checklist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementCheck {
    pub label: String,
    pub met: bool,
}

/// Three-way display classification of a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthBand {
    Weak,
    Medium,
    Strong,
}

impl StrengthBand {
    pub fn from_score(score: u8) -> Self {
        if score == 100 {
            Self::Strong
        } else if score > 50 {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

/// Result of scoring one candidate password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReport {
    /// 10..=100
    pub score: u8,
    /// Length check first, then each of [`Requirement::ALL`].
    pub checks: Vec<RequirementCheck>,
}

impl StrengthReport {
    pub fn band(&self) -> StrengthBand {
        StrengthBand::from_score(self.score)
    }

    /// Number of checklist lines not yet satisfied.
    pub fn unmet(&self) -> usize {
        self.checks.iter().filter(|check| !check.met).count()
    }
}

/// Score a password.
///
/// The penalty multiplier starts at 1 for passwords of 7 characters or
/// fewer and grows by one for every unmet requirement; each point costs
/// `100 / (requirements + 1)` and the result never drops below 10.
///
/// # Example
///
/// ```rust
/// use authform::strength::{score, StrengthBand};
///
/// assert_eq!(score("Abcdef1!").score, 100);
/// assert_eq!(score("abc").band(), StrengthBand::Weak);
/// ```
pub fn score(password: &str) -> StrengthReport {
    let long_enough = password.chars().count() > SHORT_PASSWORD_MAX;

    let mut checks = Vec::with_capacity(Requirement::ALL.len() + 1);
    checks.push(RequirementCheck {
        label: "Includes at least 8 characters".to_string(),
        met: long_enough,
    });

    let mut multiplier: i32 = if long_enough { 0 } else { 1 };
    for requirement in Requirement::ALL {
        let met = requirement.is_met(password);
        if !met {
            multiplier += 1;
        }
        checks.push(RequirementCheck {
            label: requirement.label().to_string(),
            met,
        });
    }

    let step = 100 / (Requirement::ALL.len() as i32 + 1);
    let score = (100 - step * multiplier).max(FLOOR);

    StrengthReport {
        score: score as u8,
        checks,
    }
}
