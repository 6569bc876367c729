//! Computer use cases: detail, editing, deletion of a selection and the dashboard
//! listing with its exact total.
use crate::error::InventoryError;
use crate::input::parse_id_list;
use crate::pagination::{Page, Pagination};
use crate::query::ComputerQuery;
use crate::repository::computer_repository::ComputerRepository;
use crate::types::{Computer, ComputerView};
use log::debug;
use serde::Serialize;
use std::sync::Arc;

/// A page of the dashboard together with the number of computers matching its filter.
#[derive(Debug, Clone, Serialize)]
pub struct ComputerListing {
    pub page: Page<ComputerView>,
    pub total: i64,
}

impl ComputerListing {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.page.total_pages(self.total)
    }
}

pub struct ComputerService {
    repo: Arc<dyn ComputerRepository>,
}

impl ComputerService {
    pub fn new(repo: Arc<dyn ComputerRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    /// [`InventoryError::NotFound`] if there is no such computer.
    pub fn find(&self, id: i64) -> Result<Computer, InventoryError> {
        self.repo.find(id)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_all(&self) -> Result<Vec<Computer>, InventoryError> {
        self.repo.find_all()
    }

    /// # Errors
    /// See [`ComputerRepository::create`].
    pub fn create(&self, computer: &Computer) -> Result<Computer, InventoryError> {
        computer.validate()?;
        self.repo.create(computer)
    }

    /// # Errors
    /// See [`ComputerRepository::update`].
    pub fn update(&self, computer: &Computer) -> Result<Computer, InventoryError> {
        computer.validate()?;
        self.repo.update(computer)
    }

    /// # Errors
    /// Returns an error if the statement fails. A missing id is not an error.
    pub fn delete(&self, id: i64) -> Result<(), InventoryError> {
        self.repo.delete(id)
    }

    /// Removes the given computers in one statement. An empty selection does nothing.
    ///
    /// # Errors
    /// Returns an error if the statement fails, in which case nothing is removed.
    pub fn delete_batch(&self, ids: &[i64]) -> Result<usize, InventoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.repo.delete_batch(ids)
    }

    /// Removes the computers in a comma separated selection such as `"3,17,42"`.
    ///
    /// # Errors
    /// [`InventoryError::Validation`] if any element is not an id; nothing is removed then.
    pub fn delete_selection(&self, selection: &str) -> Result<usize, InventoryError> {
        let ids = parse_id_list(selection)?;
        debug!("delete_selection():- {ids:?}");
        self.delete_batch(&ids)
    }

    /// Computers whose name or company name contains `term`.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn search(
        &self,
        term: &str,
        pagination: Pagination,
    ) -> Result<Page<ComputerView>, InventoryError> {
        let (offset, limit) = pagination.offset_limit();
        self.repo.search_by_name(term, offset, limit)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn count_matching(&self, term: &str) -> Result<i64, InventoryError> {
        self.repo.count_matching(term)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn count_all(&self) -> Result<i64, InventoryError> {
        self.repo.count_all()
    }

    /// Runs the dashboard listing and counts what its filter matches.
    ///
    /// # Errors
    /// Returns an error if either query fails.
    pub fn list(&self, query: &ComputerQuery) -> Result<ComputerListing, InventoryError> {
        let page = self.repo.find_sorted_page(query)?;
        let total = self.repo.count_for(query)?;
        Ok(ComputerListing { page, total })
    }
}
