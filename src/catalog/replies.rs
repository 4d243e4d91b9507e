//! Category → canned reply table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Category;
use crate::locale::Locale;

/// The pair of canned replies for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTemplate {
    pub thai: String,
    pub other: String,
}

impl ReplyTemplate {
    pub fn new(thai: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            thai: thai.into(),
            other: other.into(),
        }
    }

    /// The reply written for `locale`.
    pub fn text(&self, locale: Locale) -> &str {
        match locale {
            Locale::Thai => &self.thai,
            Locale::Other => &self.other,
        }
    }

    fn is_complete(&self) -> bool {
        !self.thai.trim().is_empty() && !self.other.trim().is_empty()
    }
}

/// Immutable lookup from [`Category`] to its [`ReplyTemplate`].
#[derive(Debug, Clone, Default)]
pub struct ReplyTable {
    entries: HashMap<Category, ReplyTemplate>,
}

impl ReplyTable {
    pub fn new(entries: HashMap<Category, ReplyTemplate>) -> Self {
        Self { entries }
    }

    pub fn template(&self, category: Category) -> Option<&ReplyTemplate> {
        self.entries.get(&category)
    }

    /// Reply text for `category` in `locale`, if the category has an entry.
    pub fn reply(&self, category: Category, locale: Locale) -> Option<&str> {
        self.template(category).map(|t| t.text(locale))
    }

    /// `true` when `category` has a non-blank reply for both locales.
    pub fn is_complete_for(&self, category: Category) -> bool {
        self.template(category).is_some_and(ReplyTemplate::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReplyTable {
        let mut entries = HashMap::new();
        entries.insert(Category::Price, ReplyTemplate::new("ราคา", "price"));
        entries.insert(Category::Owner, ReplyTemplate::new("", "owner"));
        ReplyTable::new(entries)
    }

    #[test]
    fn selects_text_by_locale() {
        let t = table();
        assert_eq!(t.reply(Category::Price, Locale::Thai), Some("ราคา"));
        assert_eq!(t.reply(Category::Price, Locale::Other), Some("price"));
    }

    #[test]
    fn missing_category_has_no_reply() {
        assert_eq!(table().reply(Category::Location, Locale::Other), None);
    }

    #[test]
    fn completeness_requires_both_locales() {
        let t = table();
        assert!(t.is_complete_for(Category::Price));
        assert!(!t.is_complete_for(Category::Owner));
        assert!(!t.is_complete_for(Category::Location));
    }
}
