use crate::error::InventoryError;
use crate::pagination::Page;
use crate::types::{CascadeOutcome, Company, NewCompany};

#[cfg_attr(test, mockall::automock)]
pub trait CompanyRepository: Send + Sync {
    ///
    /// Finds a company by its identifier.
    ///
    /// # Errors
    /// * [`InventoryError::NotFound`] if no company has the given id.
    /// * [`InventoryError::Persistence`] if the query fails.
    fn find(&self, id: i64) -> Result<Company, InventoryError>;

    /// Every company, in id order. Meant for short lists such as a selection box.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the query fails.
    fn find_all(&self) -> Result<Vec<Company>, InventoryError>;

    ///
    /// Retrieves `limit` companies ordered by name, skipping the first `offset`.
    ///
    /// # Errors
    /// * [`InventoryError::Validation`] if `limit` is zero.
    /// * [`InventoryError::Persistence`] if the query fails.
    fn find_page(&self, offset: u64, limit: u32) -> Result<Page<Company>, InventoryError>;

    /// # Errors
    /// * Returns an `InventoryError` if the query fails.
    fn count_all(&self) -> Result<i64, InventoryError>;

    ///
    /// Stores a new company and returns it with the id assigned by the database.
    ///
    /// # Errors
    /// * [`InventoryError::Validation`] if the name is blank.
    /// * [`InventoryError::Persistence`] if the insert fails.
    fn create(&self, company: &NewCompany) -> Result<Company, InventoryError>;

    ///
    /// Deletes a company together with every computer referencing it, in a single
    /// transaction. Nothing is deleted if any part fails. Deleting an unknown id is a no-op.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the transaction fails; it has been rolled back.
    fn delete(&self, id: i64) -> Result<CascadeOutcome, InventoryError>;
}
