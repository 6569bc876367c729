//! Storage operations for computers.
//!
//! All reads joining the company table use a left join, so computers without a
//! manufacturer are included.
use crate::error::InventoryError;
use crate::pagination::Page;
use crate::query::ComputerQuery;
use crate::types::{Computer, ComputerView};

#[cfg_attr(test, mockall::automock)]
pub trait ComputerRepository: Send + Sync {
    ///
    /// Finds a computer by id, with its company if it has one.
    ///
    /// # Errors
    /// * [`InventoryError::NotFound`] if no computer has the given id.
    fn find(&self, id: i64) -> Result<Computer, InventoryError>;

    /// # Errors
    /// * Returns an `InventoryError` if the query fails.
    fn find_all(&self) -> Result<Vec<Computer>, InventoryError>;

    ///
    /// Inserts a computer and returns it with the generated id.
    ///
    /// # Errors
    /// * [`InventoryError::InvalidState`] if the computer already has an id.
    /// * [`InventoryError::Validation`] if the name is blank or the dates are inverted.
    /// * [`InventoryError::NotFound`] if `company_id` refers to a company which does not exist.
    /// * [`InventoryError::Persistence`] if the insert fails or inserts nothing.
    fn create(&self, computer: &Computer) -> Result<Computer, InventoryError>;

    ///
    /// Overwrites name, dates and company of the computer with the same id.
    ///
    /// # Errors
    /// * [`InventoryError::InvalidState`] if the computer has no id.
    /// * [`InventoryError::Validation`] if the name is blank or the dates are inverted.
    /// * [`InventoryError::NotFound`] if either the computer or the referenced company does
    ///   not exist.
    fn update(&self, computer: &Computer) -> Result<Computer, InventoryError>;

    ///
    /// Removes a single computer. Removing an id which does not exist is not an error.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the statement fails.
    fn delete(&self, id: i64) -> Result<(), InventoryError>;

    ///
    /// Removes all the given computers with one statement and returns how many rows went.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the statement fails, in which case nothing is removed.
    fn delete_batch(&self, ids: &[i64]) -> Result<usize, InventoryError>;

    /// Removes every computer made by the given company.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the statement fails.
    fn delete_by_company(&self, company_id: i64) -> Result<usize, InventoryError>;

    ///
    /// Computers whose name, or whose company's name, contains `term` ignoring case.
    /// An empty `term` matches every computer.
    ///
    /// # Errors
    /// * [`InventoryError::Validation`] if `limit` is zero.
    fn search_by_name(
        &self,
        term: &str,
        offset: u64,
        limit: u32,
    ) -> Result<Page<ComputerView>, InventoryError>;

    /// Exact number of computers [`ComputerRepository::search_by_name`] would page through.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the query fails.
    fn count_matching(&self, term: &str) -> Result<i64, InventoryError>;

    /// # Errors
    /// * Returns an `InventoryError` if the query fails.
    fn count_all(&self) -> Result<i64, InventoryError>;

    ///
    /// Runs a filtered, sorted and paginated listing.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the query fails.
    fn find_sorted_page(&self, query: &ComputerQuery) -> Result<Page<ComputerView>, InventoryError>;

    /// Exact number of computers matching the filter of `query`, ignoring its pagination.
    ///
    /// # Errors
    /// * Returns an `InventoryError` if the query fails.
    fn count_for(&self, query: &ComputerQuery) -> Result<i64, InventoryError>;
}
