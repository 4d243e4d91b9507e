//! The closed set of business-intent categories.
//!
//! Categories travel as enum values everywhere inside the crate.  The only
//! place a raw string becomes a [`Category`] is [`Category::from_label`],
//! which is used when parsing catalog files and when reading the model's
//! classification answer.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A business-intent label that selects a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Asking for the owner ("เจ๊แหม่ม", boss, manager).
    Owner,
    /// Car repair status and completion dates.
    #[serde(rename = "Car_Repair")]
    CarRepair,
    /// Where the shop is, directions, maps.
    Location,
    /// Custom orders and fabrication requests.
    Ordering,
    /// Generic questions and complaints.  Default reply when nothing else
    /// can be determined.
    #[serde(rename = "General_Help")]
    GeneralHelp,
    /// Payment methods, transfers, invoices.
    Payment,
    /// Quotes and pricing.
    Price,
    /// Not about the business at all.
    Unrelated,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Owner,
        Category::CarRepair,
        Category::Location,
        Category::Ordering,
        Category::GeneralHelp,
        Category::Payment,
        Category::Price,
        Category::Unrelated,
    ];

    /// Canonical label, as shown to the model and written in catalog files.
    pub fn label(self) -> &'static str {
        match self {
            Category::Owner => "Owner",
            Category::CarRepair => "Car_Repair",
            Category::Location => "Location",
            Category::Ordering => "Ordering",
            Category::GeneralHelp => "General_Help",
            Category::Payment => "Payment",
            Category::Price => "Price",
            Category::Unrelated => "Unrelated",
        }
    }

    /// Parse a label.
    ///
    /// An exact match on the canonical label is tried first.  Failing that,
    /// the input is normalised (surrounding quotes, brackets, punctuation and
    /// whitespace stripped; spaces and hyphens read as `_`; case ignored),
    /// which absorbs the usual ways a model decorates a one-word answer
    /// (`"Price".`, `car repair`, `[Payment]`).
    ///
    /// ```
    /// use line_reply_bot::catalog::Category;
    ///
    /// assert_eq!(Category::from_label("Payment"), Some(Category::Payment));
    /// assert_eq!(Category::from_label("\"car repair\"."), Some(Category::CarRepair));
    /// assert_eq!(Category::from_label("Weather"), None);
    /// ```
    pub fn from_label(raw: &str) -> Option<Self> {
        if let Some(exact) = Self::ALL.iter().copied().find(|c| c.label() == raw) {
            return Some(exact);
        }

        let normalised: String = raw
            .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        if normalised.is_empty() {
            return None;
        }

        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(&normalised))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn exact_match_is_case_sensitive_but_fallback_is_not() {
        assert_eq!(Category::from_label("price"), Some(Category::Price));
        assert_eq!(Category::from_label("GENERAL_HELP"), Some(Category::GeneralHelp));
    }

    #[test]
    fn decorated_answers_are_accepted() {
        assert_eq!(Category::from_label("  Price\n"), Some(Category::Price));
        assert_eq!(Category::from_label("\"Location\""), Some(Category::Location));
        assert_eq!(Category::from_label("[Payment]."), Some(Category::Payment));
        assert_eq!(Category::from_label("General Help"), Some(Category::GeneralHelp));
        assert_eq!(Category::from_label("car-repair"), Some(Category::CarRepair));
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert_eq!(Category::from_label("Weather"), None);
        assert_eq!(Category::from_label("Category: Price"), None);
        assert_eq!(Category::from_label(""), None);
        assert_eq!(Category::from_label("\"\""), None);
    }

    #[test]
    fn serde_uses_canonical_labels() {
        let json = serde_json::to_string(&Category::CarRepair).unwrap();
        assert_eq!(json, "\"Car_Repair\"");
        let back: Category = serde_json::from_str("\"General_Help\"").unwrap();
        assert_eq!(back, Category::GeneralHelp);
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(Category::Ordering.to_string(), "Ordering");
    }
}
