//! Category repository for SQLite storage
//!
//! Reads and writes the `categories` table. Listing is always in ascending
//! id order, which is the order the pivot totals record walks categories in.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, CategoryType, DEFAULT_CATEGORIES};

const SELECT_CATEGORY: &str = "SELECT Id, Description, TypeId FROM categories";

/// Repository for category persistence
pub struct CategoryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All categories, ordered by id
    pub fn list(&self) -> BudgetResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY Id ASC", SELECT_CATEGORY))?;
        let categories = stmt
            .query_map([], map_category)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Look up a category, `None` if the id is unknown
    pub fn find(&self, id: CategoryId) -> BudgetResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                &format!("{} WHERE Id = ?1", SELECT_CATEGORY),
                params![id.value()],
                map_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Look up a category, failing with `NotFound` if the id is unknown
    pub fn get_by_id(&self, id: CategoryId) -> BudgetResult<Category> {
        self.find(id)?
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }

    /// Find a category by description (case-insensitive)
    pub fn find_by_description(&self, description: &str) -> BudgetResult<Option<Category>> {
        let wanted = description.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .find(|c| c.description.to_lowercase() == wanted))
    }

    pub fn count(&self) -> BudgetResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert a category and return it with its assigned id
    pub fn add(&self, description: &str, category_type: CategoryType) -> BudgetResult<Category> {
        self.conn.execute(
            "INSERT INTO categories (Description, TypeId) VALUES (?1, ?2)",
            params![description, category_type.as_i64()],
        )?;
        let id = CategoryId::new(self.conn.last_insert_rowid());
        Ok(Category::new(id, description, category_type))
    }

    /// Insert a category keeping its existing id
    pub fn insert(&self, category: &Category) -> BudgetResult<()> {
        self.conn.execute(
            "INSERT INTO categories (Id, Description, TypeId) VALUES (?1, ?2, ?3)",
            params![
                category.id.value(),
                category.description,
                category.category_type.as_i64()
            ],
        )?;
        Ok(())
    }

    /// Replace the description and type of an existing category
    pub fn update(
        &self,
        id: CategoryId,
        description: &str,
        category_type: CategoryType,
    ) -> BudgetResult<Category> {
        let changed = self.conn.execute(
            "UPDATE categories SET Description = ?1, TypeId = ?2 WHERE Id = ?3",
            params![description, category_type.as_i64(), id.value()],
        )?;
        if changed == 0 {
            return Err(BudgetError::category_not_found(id.to_string()));
        }
        Ok(Category::new(id, description, category_type))
    }

    /// Delete a category
    ///
    /// Returns `false` when no category had the id. Fails with a constraint
    /// error while expenses still reference the category.
    pub fn delete(&self, id: CategoryId) -> BudgetResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE Id = ?1", params![id.value()])?;
        Ok(changed > 0)
    }

    /// Remove every category and insert the defaults, numbered from 1
    ///
    /// Fails with a constraint error if any expense still references a
    /// category.
    pub fn reset_to_defaults(&self) -> BudgetResult<usize> {
        // Rolled back on drop unless every statement succeeds
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM categories", [])?;
        tx.execute(
            "DELETE FROM sqlite_sequence WHERE name = 'categories'",
            [],
        )?;

        for (description, category_type) in DEFAULT_CATEGORIES {
            self.add(description, *category_type)?;
        }

        tx.commit()?;
        Ok(DEFAULT_CATEGORIES.len())
    }
}

fn map_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    let type_id: i64 = row.get(2)?;
    let category_type = CategoryType::from_i64(type_id)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(2, type_id))?;
    Ok(Category::new(
        CategoryId::new(row.get(0)?),
        row.get::<_, String>(1)?,
        category_type,
    ))
}
