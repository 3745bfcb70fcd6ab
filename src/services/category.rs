//! Category service
//!
//! Validated, audited category changes on top of the category repository.

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::category::validate_description;
use crate::models::{Category, CategoryId, CategoryType};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a category
    pub fn add(&self, description: &str, category_type: CategoryType) -> BudgetResult<Category> {
        let description = description.trim();
        validate_description(description).map_err(|e| BudgetError::Validation(e.to_string()))?;

        let category = self.storage.categories().add(description, category_type)?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.description.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Get a category by id; `NotFound` if missing
    pub fn get(&self, id: CategoryId) -> BudgetResult<Category> {
        self.storage.categories().get_by_id(id)
    }

    /// Find a category by description or id string
    pub fn find(&self, identifier: &str) -> BudgetResult<Option<Category>> {
        if let Some(category) = self.storage.categories().find_by_description(identifier)? {
            return Ok(Some(category));
        }

        match identifier.parse::<CategoryId>() {
            Ok(id) => self.storage.categories().find(id),
            Err(_) => Ok(None),
        }
    }

    /// All categories in id order
    pub fn list(&self) -> BudgetResult<Vec<Category>> {
        self.storage.categories().list()
    }

    /// Change the description and/or type of a category
    pub fn update(
        &self,
        id: CategoryId,
        description: Option<&str>,
        category_type: Option<CategoryType>,
    ) -> BudgetResult<Category> {
        let before = self.get(id)?;

        let description = match description {
            Some(d) => {
                let d = d.trim();
                validate_description(d).map_err(|e| BudgetError::Validation(e.to_string()))?;
                d.to_string()
            }
            None => before.description.clone(),
        };
        let category_type = category_type.unwrap_or(before.category_type);

        let after = self
            .storage
            .categories()
            .update(id, &description, category_type)?;

        self.storage.log_update(
            EntityType::Category,
            id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Delete a category
    ///
    /// Deleting an unknown id does nothing and returns `false`. A category
    /// still used by expenses is refused with a constraint error.
    pub fn delete(&self, id: CategoryId) -> BudgetResult<bool> {
        let Some(category) = self.storage.categories().find(id)? else {
            return Ok(false);
        };

        self.storage.categories().delete(id).map_err(|e| match e {
            BudgetError::Constraint(_) => BudgetError::Constraint(format!(
                "Category '{}' is still used by expenses",
                category.description
            )),
            other => other,
        })?;

        self.storage.log_delete(
            EntityType::Category,
            id.to_string(),
            Some(category.description.clone()),
            &category,
        )?;

        Ok(true)
    }

    /// Replace every category with the defaults
    pub fn reset_to_defaults(&self) -> BudgetResult<Vec<Category>> {
        let removed = self.list()?;
        self.storage.categories().reset_to_defaults()?;

        for category in &removed {
            self.storage.log_delete(
                EntityType::Category,
                category.id.to_string(),
                Some(category.description.clone()),
                category,
            )?;
        }

        let created = self.list()?;
        for category in &created {
            self.storage.log_create(
                EntityType::Category,
                category.id.to_string(),
                Some(category.description.clone()),
                category,
            )?;
        }

        Ok(created)
    }
}
