//! Expense model
//!
//! An expense is a single dated amount tied to one category. The category
//! reference is not verified here; reports drop expenses whose category no
//! longer exists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A single dated transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier
    pub id: ExpenseId,

    /// Day the expense happened
    pub date: NaiveDate,

    /// Category this expense is filed under
    #[serde(rename = "category")]
    pub category_id: CategoryId,

    /// Signed amount, summed verbatim in balances
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// Create an expense value for an existing id
    pub fn new(
        id: ExpenseId,
        date: NaiveDate,
        category_id: CategoryId,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            category_id,
            amount,
            description: description.into(),
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_description(&self.description)
    }
}

/// Check an expense description before it is stored
pub fn validate_description(description: &str) -> Result<(), ExpenseValidationError> {
    if description.len() > 500 {
        return Err(ExpenseValidationError::DescriptionTooLong(description.len()));
    }
    Ok(())
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.description,
            self.category_id
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    DescriptionTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptionTooLong(len) => {
                write!(f, "Expense description too long ({} chars, max 500)", len)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
