//! Expense repository for SQLite storage

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, Expense, ExpenseId, Money};

const SELECT_EXPENSE: &str = "SELECT Id, Date, CategoryId, Amount, Description FROM expenses";

/// Repository for expense persistence
pub struct ExpenseRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ExpenseRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All expenses in id order
    pub fn list(&self) -> BudgetResult<Vec<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY Id ASC", SELECT_EXPENSE))?;
        let expenses = stmt
            .query_map([], map_expense)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// Expenses filed under one category
    pub fn list_by_category(&self, category_id: CategoryId) -> BudgetResult<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE CategoryId = ?1 ORDER BY Id ASC",
            SELECT_EXPENSE
        ))?;
        let expenses = stmt
            .query_map(params![category_id.value()], map_expense)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    pub fn find(&self, id: ExpenseId) -> BudgetResult<Option<Expense>> {
        let expense = self
            .conn
            .query_row(
                &format!("{} WHERE Id = ?1", SELECT_EXPENSE),
                params![id.value()],
                map_expense,
            )
            .optional()?;
        Ok(expense)
    }

    pub fn get_by_id(&self, id: ExpenseId) -> BudgetResult<Expense> {
        self.find(id)?
            .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))
    }

    pub fn count(&self) -> BudgetResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert an expense and return it with its assigned id
    ///
    /// Fails with a constraint error if the category does not exist.
    pub fn add(
        &self,
        date: NaiveDate,
        category_id: CategoryId,
        amount: Money,
        description: &str,
    ) -> BudgetResult<Expense> {
        self.conn.execute(
            "INSERT INTO expenses (Date, CategoryId, Amount, Description) VALUES (?1, ?2, ?3, ?4)",
            params![date, category_id.value(), amount, description],
        )?;
        let id = ExpenseId::new(self.conn.last_insert_rowid());
        Ok(Expense::new(id, date, category_id, amount, description))
    }

    /// Insert an expense keeping its existing id
    pub fn insert(&self, expense: &Expense) -> BudgetResult<()> {
        self.conn.execute(
            "INSERT INTO expenses (Id, Date, CategoryId, Amount, Description) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.id.value(),
                expense.date,
                expense.category_id.value(),
                expense.amount,
                expense.description
            ],
        )?;
        Ok(())
    }

    /// Replace every field of an existing expense
    pub fn update(&self, expense: &Expense) -> BudgetResult<()> {
        let changed = self.conn.execute(
            "UPDATE expenses SET Date = ?1, CategoryId = ?2, Amount = ?3, Description = ?4 WHERE Id = ?5",
            params![
                expense.date,
                expense.category_id.value(),
                expense.amount,
                expense.description,
                expense.id.value()
            ],
        )?;
        if changed == 0 {
            return Err(BudgetError::expense_not_found(expense.id.to_string()));
        }
        Ok(())
    }

    /// Delete an expense; returns `false` when no expense had the id
    pub fn delete(&self, id: ExpenseId) -> BudgetResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE Id = ?1", params![id.value()])?;
        Ok(changed > 0)
    }
}

fn map_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense::new(
        ExpenseId::new(row.get(0)?),
        row.get(1)?,
        CategoryId::new(row.get(2)?),
        row.get::<_, Money>(3)?,
        row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    ))
}
