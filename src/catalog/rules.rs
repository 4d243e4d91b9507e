//! Ordered keyword rules and the first-match-wins matcher.
//!
//! Rule order is the priority order.  Trigger sets of different rules are
//! allowed to overlap (`"เจ้"` in the Owner rule also matches `"เจ้าของ"`),
//! so the position of a rule in the list is what decides a tie.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::{CatalogError, Category};

// ---------------------------------------------------------------------------
// RuleEntry  (serialisable form)
// ---------------------------------------------------------------------------

/// Uncompiled rule as written in a catalog file.
///
/// `patterns` are regular expressions; `keywords` are literal substrings.
/// Both are matched case-insensitively against the trimmed, lower-cased
/// message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub category: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

// ---------------------------------------------------------------------------
// KeywordRule
// ---------------------------------------------------------------------------

/// A compiled rule: any trigger matching selects `category`.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    category: Category,
    triggers: Vec<Regex>,
}

impl KeywordRule {
    /// Compile a rule from regex patterns and literal keywords.
    pub fn new<P, K>(category: Category, patterns: P, keywords: K) -> Result<Self, CatalogError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let mut triggers = Vec::new();

        for pattern in patterns {
            triggers.push(compile(category, pattern.as_ref())?);
        }
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                continue;
            }
            triggers.push(compile(category, &regex::escape(keyword))?);
        }

        if triggers.is_empty() {
            return Err(CatalogError::EmptyRule(category));
        }

        Ok(Self { category, triggers })
    }

    /// Compile a [`RuleEntry`], resolving its category label.
    pub fn from_entry(entry: &RuleEntry) -> Result<Self, CatalogError> {
        let category = Category::from_label(&entry.category)
            .ok_or_else(|| CatalogError::UnknownCategory(entry.category.clone()))?;
        Self::new(category, &entry.patterns, &entry.keywords)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// `true` when any trigger matches the already-normalised `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.triggers.iter().any(|re| re.is_match(text))
    }
}

fn compile(category: Category, pattern: &str) -> Result<Regex, CatalogError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| CatalogError::InvalidPattern {
            category,
            pattern: pattern.to_string(),
            source,
        })
}

// ---------------------------------------------------------------------------
// KeywordMatcher
// ---------------------------------------------------------------------------

/// Scans a message against the ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    rules: Vec<KeywordRule>,
}

impl KeywordMatcher {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Category of the first rule matching `text`, or `None`.
    ///
    /// The text is trimmed and lower-cased before matching.  Pure and
    /// deterministic: the same text and rule list always give the same
    /// answer.
    pub fn find(&self, text: &str) -> Option<Category> {
        let normalised = text.trim().to_lowercase();

        let hit = self
            .rules
            .iter()
            .find(|rule| rule.matches(&normalised))
            .map(KeywordRule::category);

        match hit {
            Some(category) => log::debug!("keyword rule matched: {category}"),
            None => log::debug!("no keyword rule matched (len={})", normalised.len()),
        }
        hit
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
