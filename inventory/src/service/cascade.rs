//! Deleting a company takes its computers with it.
//!
//! Both deletes run in the same transaction, on the same connection, so a failure after the
//! computers are gone leaves every row where it was.
use crate::error::InventoryError;
use crate::repository::connection_manager::ConnectionManager;
use crate::repository::sqlite::sqlite_company_repo::delete_company_row;
use crate::repository::sqlite::sqlite_computer_repo::delete_computers_of_company;
use crate::types::CascadeOutcome;
use log::info;
use std::sync::Arc;

pub struct CascadingDeleteCoordinator {
    connections: Arc<ConnectionManager>,
}

impl CascadingDeleteCoordinator {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    /// Removes every computer referencing `company_id`, then the company itself.
    ///
    /// An unknown company is not an error; nothing is removed and
    /// [`CascadeOutcome::company_removed`] is `false`.
    ///
    /// # Errors
    /// Any failure rolls the whole unit back and is returned to the caller.
    pub fn delete_company_cascade(&self, company_id: i64) -> Result<CascadeOutcome, InventoryError> {
        let outcome = self.connections.with_transaction(|tx| {
            let computers_removed = delete_computers_of_company(tx, company_id)?;
            let company_removed = delete_company_row(tx, company_id)? > 0;
            Ok(CascadeOutcome {
                computers_removed,
                company_removed,
            })
        })?;
        info!(
            "Company {company_id} deleted: {} computers removed, company removed: {}",
            outcome.computers_removed, outcome.company_removed
        );
        Ok(outcome)
    }
}
