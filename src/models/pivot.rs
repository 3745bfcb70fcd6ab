//! Category-by-month pivot record
//!
//! Each record is an ordered map with the fixed keys `Month` and `Total`,
//! one amount per category present in that month, and one
//! `details:<category>` entry holding that category's items. The final
//! record of a pivot report has `Month` set to `TOTALS` and one amount per
//! category across the whole range.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::budget_item::BudgetItem;
use super::money::Money;

pub const MONTH_KEY: &str = "Month";
pub const TOTAL_KEY: &str = "Total";
pub const TOTALS_MONTH: &str = "TOTALS";
pub const DETAILS_PREFIX: &str = "details:";

/// A value stored under a pivot record key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PivotValue {
    Text(String),
    Amount(Money),
    Details(Vec<BudgetItem>),
}

impl PivotValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<Money> {
        match self {
            Self::Amount(m) => Some(*m),
            _ => None,
        }
    }

    pub fn as_details(&self) -> Option<&[BudgetItem]> {
        match self {
            Self::Details(items) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for PivotValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Amount(m) => m.serialize(serializer),
            Self::Details(items) => items.serialize(serializer),
        }
    }
}

/// One row of the category-by-month report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotRecord {
    entries: Vec<(String, PivotValue)>,
}

impl PivotRecord {
    /// Start a record for a month
    pub fn for_month(month: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.insert(MONTH_KEY, PivotValue::Text(month.into()));
        record
    }

    /// Set a key, replacing any value already stored under it in place
    pub fn insert(&mut self, key: impl Into<String>, value: PivotValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Add a key only if it is not present yet; returns whether it was added
    pub fn try_add(&mut self, key: impl Into<String>, value: PivotValue) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&PivotValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PivotValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `Month` value ("YYYY-MM" or "TOTALS")
    pub fn month(&self) -> Option<&str> {
        self.get(MONTH_KEY).and_then(PivotValue::as_text)
    }

    /// The month's overall total; absent on the totals record
    pub fn total(&self) -> Option<Money> {
        self.get(TOTAL_KEY).and_then(PivotValue::as_amount)
    }

    /// Whether this is the trailing totals record
    pub fn is_totals(&self) -> bool {
        self.month() == Some(TOTALS_MONTH)
    }

    /// Amount recorded for a category description
    pub fn category_total(&self, category: &str) -> Option<Money> {
        self.get(category).and_then(PivotValue::as_amount)
    }

    /// Items recorded for a category description
    pub fn category_details(&self, category: &str) -> Option<&[BudgetItem]> {
        self.get(&details_key(category))
            .and_then(PivotValue::as_details)
    }

    /// Per-category amounts in insertion order, excluding `Total`
    pub fn category_totals(&self) -> impl Iterator<Item = (&str, Money)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            PivotValue::Amount(m) if k != TOTAL_KEY => Some((k.as_str(), *m)),
            _ => None,
        })
    }
}

/// The key under which a category's items are stored
pub fn details_key(category: &str) -> String {
    format!("{}{}", DETAILS_PREFIX, category)
}

impl Serialize for PivotRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
