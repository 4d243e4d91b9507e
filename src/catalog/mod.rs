//! Business catalog: categories, keyword rules and canned replies.
//!
//! This module provides:
//! * [`Category`]: the closed set of intent labels.
//! * [`KeywordRule`] / [`KeywordMatcher`]: ordered, first-match-wins rules.
//! * [`ReplyTable`] / [`ReplyTemplate`]: bilingual canned replies.
//! * [`Catalog`]: the validated, load-once bundle of all of the above,
//!   shared read-only (`Arc<Catalog>`) by every resolver task.
//!
//! # Catalog files
//!
//! The built-in catalog ([`Catalog::builtin`]) can be replaced by a TOML file:
//!
//! ```toml
//! catch_all = "Unrelated"
//! fallback = "General_Help"
//!
//! [[rules]]
//! category = "Location"
//! patterns = ['ร้าน.*อยู่', 'google\s?map']
//! keywords = ["where", "address"]
//!
//! [replies.Location]
//! thai = "ร้านอยู่ที่ ..."
//! other = "We are located at ..."
//! ```

mod builtin;
pub mod category;
pub mod replies;
pub mod rules;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use category::Category;
pub use replies::{ReplyTable, ReplyTemplate};
pub use rules::{KeywordMatcher, KeywordRule, RuleEntry};

use crate::locale::Locale;

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Errors raised while building or loading a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A label in the catalog does not name a known category.
    #[error("unknown category label {0:?}")]
    UnknownCategory(String),

    /// A trigger pattern failed to compile.
    #[error("invalid pattern {pattern:?} in rule for {category}: {source}")]
    InvalidPattern {
        category: Category,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A rule has no usable triggers.
    #[error("rule for {0} has no patterns or keywords")]
    EmptyRule(Category),

    /// A category (other than the catch-all) has no keyword rule.
    #[error("no keyword rule for {0}")]
    MissingRule(Category),

    /// A category lacks a Thai or English reply.
    #[error("missing or blank reply for {0}")]
    MissingReply(Category),

    /// The fallback category cannot also be the catch-all.
    #[error("fallback category {0} must differ from the catch-all")]
    FallbackIsCatchAll(Category),

    /// Catalog file could not be read.
    #[error("cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid TOML for the expected schema.
    #[error("cannot parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// CatalogFile  (serialisable form)
// ---------------------------------------------------------------------------

/// On-disk layout of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_catch_all")]
    pub catch_all: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
    #[serde(default)]
    pub replies: BTreeMap<String, ReplyTemplate>,
}

fn default_catch_all() -> String {
    Category::Unrelated.label().to_string()
}

fn default_fallback() -> String {
    Category::GeneralHelp.label().to_string()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Validated, immutable rule list + reply table.
///
/// Invariants checked at construction:
/// * every category except `catch_all` has a keyword rule;
/// * every category has a non-blank reply in both locales;
/// * `fallback` differs from `catch_all`.
#[derive(Debug, Clone)]
pub struct Catalog {
    matcher: KeywordMatcher,
    replies: ReplyTable,
    catch_all: Category,
    fallback: Category,
}

impl Catalog {
    /// Build and validate a catalog.
    pub fn new(
        rules: Vec<KeywordRule>,
        replies: ReplyTable,
        catch_all: Category,
        fallback: Category,
    ) -> Result<Self, CatalogError> {
        if fallback == catch_all {
            return Err(CatalogError::FallbackIsCatchAll(fallback));
        }

        for category in Category::ALL {
            if category != catch_all && !rules.iter().any(|r| r.category() == category) {
                return Err(CatalogError::MissingRule(category));
            }
            if !replies.is_complete_for(category) {
                return Err(CatalogError::MissingReply(category));
            }
        }

        Ok(Self {
            matcher: KeywordMatcher::new(rules),
            replies,
            catch_all,
            fallback,
        })
    }

    /// The built-in TM การช่าง catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        let rules = builtin::RULES
            .iter()
            .map(|(category, patterns)| {
                KeywordRule::new(*category, patterns.iter().copied(), Vec::<&str>::new())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let replies = builtin::REPLIES
            .iter()
            .map(|(category, thai, other)| (*category, ReplyTemplate::new(*thai, *other)))
            .collect::<HashMap<_, _>>();

        Self::new(
            rules,
            ReplyTable::new(replies),
            Category::Unrelated,
            Category::GeneralHelp,
        )
    }

    /// Build a catalog from its file form.
    pub fn from_file(file: &CatalogFile) -> Result<Self, CatalogError> {
        let catch_all = parse_label(&file.catch_all)?;
        let fallback = parse_label(&file.fallback)?;

        let rules = file
            .rules
            .iter()
            .map(KeywordRule::from_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let mut replies = HashMap::with_capacity(file.replies.len());
        for (label, template) in &file.replies {
            replies.insert(parse_label(label)?, template.clone());
        }

        Self::new(rules, ReplyTable::new(replies), catch_all, fallback)
    }

    /// Load and validate a TOML catalog file.
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content)?;
        let catalog = Self::from_file(&file)?;
        log::info!(
            "catalog loaded from {} ({} rules)",
            path.display(),
            catalog.matcher.rules().len()
        );
        Ok(catalog)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn replies(&self) -> &ReplyTable {
        &self.replies
    }

    /// Category withheld from the classifier's option list; the model may
    /// still name it for off-topic messages.
    pub fn catch_all(&self) -> Category {
        self.catch_all
    }

    /// Category used when the classifier fails or answers nonsense.
    pub fn fallback(&self) -> Category {
        self.fallback
    }

    /// Categories offered to the classifier, in declaration order.
    pub fn offered_categories(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|c| *c != self.catch_all)
            .collect()
    }

    /// Reply text for `category` in `locale`.
    ///
    /// Construction guarantees every category has a reply; the fallback
    /// text is returned for anything else.
    pub fn reply(&self, category: Category, locale: Locale) -> &str {
        self.replies
            .reply(category, locale)
            .or_else(|| self.replies.reply(self.fallback, locale))
            .unwrap_or_default()
    }

    /// The fallback category's reply in `locale`.
    pub fn fallback_reply(&self, locale: Locale) -> &str {
        self.reply(self.fallback, locale)
    }
}

fn parse_label(label: &str) -> Result<Category, CatalogError> {
    Category::from_label(label).ok_or_else(|| CatalogError::UnknownCategory(label.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
