use crate::error::InventoryError;
use crate::pagination::{Page, Pagination};
use crate::repository::company_repository::CompanyRepository;
use crate::types::{CascadeOutcome, Company, NewCompany};
use std::sync::Arc;

pub struct CompanyService {
    repo: Arc<dyn CompanyRepository>,
}

impl CompanyService {
    pub fn new(repo: Arc<dyn CompanyRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    /// [`InventoryError::NotFound`] if there is no such company.
    pub fn find(&self, id: i64) -> Result<Company, InventoryError> {
        self.repo.find(id)
    }

    /// Every company, for selection lists.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_all(&self) -> Result<Vec<Company>, InventoryError> {
        self.repo.find_all()
    }

    /// One page of companies ordered by name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_page(&self, pagination: Pagination) -> Result<Page<Company>, InventoryError> {
        let (offset, limit) = pagination.offset_limit();
        self.repo.find_page(offset, limit)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<i64, InventoryError> {
        self.repo.count_all()
    }

    /// # Errors
    /// [`InventoryError::Validation`] for a blank name, or a storage failure.
    pub fn create(&self, name: &str) -> Result<Company, InventoryError> {
        self.repo.create(&NewCompany::new(name))
    }

    /// Deletes the company and every computer it made, all or nothing.
    ///
    /// # Errors
    /// Returns an error if the transaction fails; nothing has been removed.
    pub fn delete(&self, id: i64) -> Result<CascadeOutcome, InventoryError> {
        self.repo.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::company_repository::MockCompanyRepository;

    #[test]
    fn list_page_translates_page_index_to_offset() -> Result<(), InventoryError> {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_page()
            .withf(|offset, limit| *offset == 100 && *limit == 50)
            .times(1)
            .returning(|_, limit| {
                Ok(Page::new(
                    vec![Company {
                        id: 4,
                        name: "Netronics".to_string(),
                    }],
                    2,
                    limit,
                ))
            });
        let service = CompanyService::new(Arc::new(repo));

        let page = service.list_page(Pagination::new(2, 50)?)?;
        assert_eq!(page.page_index(), 2);
        assert!(!page.has_next());
        assert_eq!(page.items()[0].name, "Netronics");
        Ok(())
    }

    #[test]
    fn create_passes_the_name_through() -> Result<(), InventoryError> {
        let mut repo = MockCompanyRepository::new();
        repo.expect_create()
            .withf(|company| company.name == "Sinclair Research")
            .times(1)
            .returning(|company| {
                Ok(Company {
                    id: 43,
                    name: company.name.clone(),
                })
            });
        let service = CompanyService::new(Arc::new(repo));

        assert_eq!(service.create("Sinclair Research")?.id, 43);
        Ok(())
    }

    #[test]
    fn delete_reports_the_cascade_outcome() -> Result<(), InventoryError> {
        let mut repo = MockCompanyRepository::new();
        repo.expect_delete().with(mockall::predicate::eq(1)).returning(|_| {
            Ok(CascadeOutcome {
                computers_removed: 3,
                company_removed: true,
            })
        });
        let service = CompanyService::new(Arc::new(repo));

        let outcome = service.delete(1)?;
        assert_eq!(outcome.computers_removed, 3);
        assert!(outcome.company_removed);
        Ok(())
    }

    #[test]
    fn storage_failures_propagate() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_count_all()
            .returning(|| Err(InventoryError::Persistence("disk full".to_string())));
        let service = CompanyService::new(Arc::new(repo));

        assert!(matches!(
            service.count(),
            Err(InventoryError::Persistence(_))
        ));
    }
}
