//! Category model
//!
//! Categories classify expenses. Each category has a store-assigned id, a
//! free-text description (used as the grouping key in reports) and a type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// The kind of money flow a category represents
///
/// The discriminants are the values persisted in the `categoryTypes` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryType {
    Income = 0,
    #[default]
    Expense = 1,
    Credit = 2,
    Savings = 3,
}

impl CategoryType {
    /// All category types in persisted order
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense, Self::Credit, Self::Savings]
    }

    /// The integer stored in the database
    pub const fn as_i64(self) -> i64 {
        self as i64
    }

    /// Look up a type from its stored integer
    pub fn from_i64(value: i64) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_i64() == value)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Credit => "Credit",
            Self::Savings => "Savings",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CategoryType {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().to_lowercase() == lower)
            .ok_or_else(|| CategoryValidationError::UnknownType(s.to_string()))
    }
}

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier
    pub id: CategoryId,

    /// Description, also the grouping key in reports
    pub description: String,

    /// Category type
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl Category {
    /// Create a category value for an existing id
    pub fn new(id: CategoryId, description: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            id,
            description: description.into(),
            category_type,
        }
    }

    /// Validate the category
    ///
    /// A description of exactly "Month" or "Total" collides with the fixed
    /// keys of the category-by-month report; that is accepted and not checked.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_description(&self.description)
    }
}

/// Check a category description before it is stored
pub fn validate_description(description: &str) -> Result<(), CategoryValidationError> {
    if description.trim().is_empty() {
        return Err(CategoryValidationError::EmptyDescription);
    }

    if description.len() > 100 {
        return Err(CategoryValidationError::DescriptionTooLong(description.len()));
    }

    Ok(())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.description)
    }
}

/// Categories seeded into a new budget, in insertion order
pub const DEFAULT_CATEGORIES: &[(&str, CategoryType)] = &[
    ("Utilities", CategoryType::Expense),
    ("Rent", CategoryType::Expense),
    ("Food", CategoryType::Expense),
    ("Entertainment", CategoryType::Expense),
    ("Education", CategoryType::Expense),
    ("Miscellaneous", CategoryType::Expense),
    ("Medical Expenses", CategoryType::Expense),
    ("Vacation", CategoryType::Expense),
    ("Credit Card", CategoryType::Credit),
    ("Clothes", CategoryType::Expense),
    ("Gifts", CategoryType::Expense),
    ("Insurance", CategoryType::Expense),
    ("Transportation", CategoryType::Expense),
    ("Eating Out", CategoryType::Expense),
    ("Savings", CategoryType::Savings),
    ("Income", CategoryType::Income),
];

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    UnknownType(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Category description cannot be empty"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Category description too long ({} chars, max 100)", len)
            }
            Self::UnknownType(t) => write!(
                f,
                "Unknown category type '{}' (expected Income, Expense, Credit or Savings)",
                t
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
