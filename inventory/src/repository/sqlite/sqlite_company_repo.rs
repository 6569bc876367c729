use crate::error::InventoryError;
use crate::pagination::{page_index_of, Page};
use crate::repository::company_repository::CompanyRepository;
use crate::repository::connection_manager::ConnectionManager;
use crate::service::cascade::CascadingDeleteCoordinator;
use crate::types::{CascadeOutcome, Company, NewCompany};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

pub struct SqliteCompanyRepository {
    connections: Arc<ConnectionManager>,
    cascade: Arc<CascadingDeleteCoordinator>,
}

impl SqliteCompanyRepository {
    pub(crate) fn new(
        connections: Arc<ConnectionManager>,
        cascade: Arc<CascadingDeleteCoordinator>,
    ) -> Self {
        Self {
            connections,
            cascade,
        }
    }
}

const CREATE_COMPANY_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS company (
        id integer primary key autoincrement not null,
        name varchar(255) not null
    );
";

pub(crate) fn create_company_table(conn: &Connection) -> Result<(), InventoryError> {
    conn.execute(CREATE_COMPANY_TABLE_SQL, [])?;
    Ok(())
}

fn map_company(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Looks up a company on a connection the caller already holds.
pub(crate) fn find_company(conn: &Connection, id: i64) -> Result<Option<Company>, InventoryError> {
    let company = conn
        .query_row(
            "SELECT id, name FROM company WHERE id = ?1",
            params![id],
            map_company,
        )
        .optional()?;
    Ok(company)
}

/// Deletes the company row only. Callers are responsible for its computers, see
/// [`CascadingDeleteCoordinator`].
pub(crate) fn delete_company_row(conn: &Connection, id: i64) -> Result<usize, InventoryError> {
    let removed = conn.execute("DELETE FROM company WHERE id = ?1", params![id])?;
    debug!("Deleted {removed} company rows for id {id}");
    Ok(removed)
}

impl CompanyRepository for SqliteCompanyRepository {
    fn find(&self, id: i64) -> Result<Company, InventoryError> {
        self.connections
            .with_connection(|conn| find_company(conn, id))?
            .ok_or(InventoryError::NotFound {
                entity: "company",
                id,
            })
    }

    fn find_all(&self) -> Result<Vec<Company>, InventoryError> {
        self.connections.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM company ORDER BY id")?;
            let companies = stmt
                .query_map([], map_company)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(companies)
        })
    }

    fn find_page(&self, offset: u64, limit: u32) -> Result<Page<Company>, InventoryError> {
        let page_index = page_index_of(offset, limit)?;
        let offset = i64::try_from(offset)
            .map_err(|_| InventoryError::Validation(format!("offset {offset} is too large")))?;
        debug!("find_page():- offset {offset}, limit {limit}");

        let companies = self.connections.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name FROM company ORDER BY name ASC, id ASC LIMIT ?1 OFFSET ?2",
            )?;
            let companies = stmt
                .query_map(params![i64::from(limit), offset], map_company)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(companies)
        })?;
        Ok(Page::new(companies, page_index, limit))
    }

    fn count_all(&self) -> Result<i64, InventoryError> {
        self.connections.with_connection(|conn| {
            let count = conn.query_row("SELECT COUNT(id) FROM company", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    fn create(&self, company: &NewCompany) -> Result<Company, InventoryError> {
        let name = company.name.trim();
        if name.is_empty() {
            return Err(InventoryError::Validation(
                "a company must have a name".to_string(),
            ));
        }
        debug!("Adding company {name} to DBMS");
        self.connections.with_connection(|conn| {
            let id: i64 = conn
                .query_row(
                    "INSERT INTO company (name) VALUES (?1) RETURNING id",
                    params![name],
                    |row| row.get(0),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => InventoryError::Persistence(
                        "insert into company affected no rows".to_string(),
                    ),
                    other => InventoryError::Persistence(format!(
                        "Unable to insert into company: {other}"
                    )),
                })?;
            Ok(Company {
                id,
                name: name.to_string(),
            })
        })
    }

    fn delete(&self, id: i64) -> Result<CascadeOutcome, InventoryError> {
        self.cascade.delete_company_cascade(id)
    }
}
