use std::fmt;

use serde::{Deserialize, Serialize};

/// Label shown when a search request fails.
pub const NO_RESULTS_LABEL: &str = "No search results :(";

/// Label shown when the configured item cannot be resolved.
pub const NOT_FOUND_LABEL: &str = "Configured item doesn't exist??";

/// Numeric identifier of a backend item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parse `text` only when it is the canonical decimal form of an id.
    ///
    /// Signs, whitespace, and redundant leading zeros are rejected so that
    /// `ItemId::parse_canonical(s).map(|id| id.to_string())` is always `s`.
    #[must_use]
    pub fn parse_canonical(text: &str) -> Option<Self> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if text.len() > 1 && text.starts_with('0') {
            return None;
        }
        text.parse().ok().map(Self)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Backend entity produced by searches and reverse lookups.
///
/// Field aliases accept the spellings used by line-delimited item databases
/// (`ItemID`, `Name`, `Icon`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(alias = "ItemID")]
    pub id: ItemId,
    #[serde(alias = "name", alias = "Name")]
    pub label: String,
    #[serde(default, alias = "Icon", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Item {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Display projection of an [`Item`] as listed by the picker.
///
/// `value` is the string form of the item id for real entries and empty for
/// sentinel entries, so a sentinel can never be committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub value: String,
    #[serde(
        default,
        rename = "imgUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<String>,
}

impl Candidate {
    /// Free-text value typed by the user.
    #[must_use]
    pub fn custom(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
            icon: None,
        }
    }

    #[must_use]
    pub fn no_results() -> Self {
        Self::sentinel(NO_RESULTS_LABEL)
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::sentinel(NOT_FOUND_LABEL)
    }

    fn sentinel(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            icon: None,
        }
    }

    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.value.is_empty()
    }

    /// The id named by `value`, if it is a canonical item id.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        ItemId::parse_canonical(&self.value)
    }
}

impl From<Item> for Candidate {
    fn from(item: Item) -> Self {
        Self {
            label: item.label,
            value: item.id.to_string(),
            icon: item.icon,
        }
    }
}
