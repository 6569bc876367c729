use crate::error::InventoryError;
use crate::input::{date_to_timestamp, timestamp_to_date};
use crate::pagination::Page;
use crate::query::ComputerQuery;
use crate::repository::computer_repository::ComputerRepository;
use crate::repository::connection_manager::ConnectionManager;
use crate::repository::sqlite::sqlite_company_repo::find_company;
use crate::types::{Company, Computer, ComputerView};
use chrono::NaiveDateTime;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

pub struct SqliteComputerRepository {
    connections: Arc<ConnectionManager>,
}

/// SQL statement to create the `computer` table.
const CREATE_COMPUTER_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS computer (
        id integer primary key autoincrement not null,
        name varchar(255) not null,
        introduced timestamp null,
        discontinued timestamp null,
        company_id integer null,
        FOREIGN KEY (company_id) REFERENCES company(id)
    );
    CREATE INDEX IF NOT EXISTS idx_computer_company_id ON computer (company_id);
";

/// Creates the `computer` table in the database.
pub(crate) fn create_computer_table(conn: &Connection) -> Result<(), InventoryError> {
    conn.execute_batch(CREATE_COMPUTER_TABLE_SQL)?;
    Ok(())
}

const FIND_COMPUTER_SQL: &str = r"
    SELECT computer.id, computer.name, computer.introduced, computer.discontinued,
           computer.company_id, company.id, company.name
    FROM computer LEFT JOIN company ON computer.company_id = company.id";

fn map_computer(row: &Row<'_>) -> rusqlite::Result<Computer> {
    let company_id: Option<i64> = row.get(5)?;
    let company_name: Option<String> = row.get(6)?;
    Ok(Computer {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        introduced: timestamp_to_date(row.get::<_, Option<NaiveDateTime>>(2)?),
        discontinued: timestamp_to_date(row.get::<_, Option<NaiveDateTime>>(3)?),
        company_id: row.get(4)?,
        company: company_id
            .zip(company_name)
            .map(|(id, name)| Company { id, name }),
    })
}

fn map_computer_view(row: &Row<'_>) -> rusqlite::Result<ComputerView> {
    Ok(ComputerView {
        id: row.get(0)?,
        name: row.get(1)?,
        introduced: timestamp_to_date(row.get::<_, Option<NaiveDateTime>>(2)?),
        discontinued: timestamp_to_date(row.get::<_, Option<NaiveDateTime>>(3)?),
        company_id: row.get(4)?,
        company_name: row.get(5)?,
    })
}

/// Resolves the company a computer is about to reference.
fn referenced_company(
    conn: &Connection,
    company_id: Option<i64>,
) -> Result<Option<Company>, InventoryError> {
    match company_id {
        None => Ok(None),
        Some(id) => find_company(conn, id)?
            .map(Some)
            .ok_or(InventoryError::NotFound {
                entity: "company",
                id,
            }),
    }
}

/// Removes the computers of a company on a connection the caller already holds. First step
/// of the cascading company delete.
pub(crate) fn delete_computers_of_company(
    conn: &Connection,
    company_id: i64,
) -> Result<usize, InventoryError> {
    let removed = conn.execute(
        "DELETE FROM computer WHERE company_id = ?1",
        params![company_id],
    )?;
    debug!("Deleted {removed} computers of company {company_id}");
    Ok(removed)
}

impl SqliteComputerRepository {
    pub(crate) fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }
}

impl ComputerRepository for SqliteComputerRepository {
    fn find(&self, id: i64) -> Result<Computer, InventoryError> {
        self.connections
            .with_connection(|conn| {
                let computer = conn
                    .query_row(
                        &format!("{FIND_COMPUTER_SQL} WHERE computer.id = ?1"),
                        params![id],
                        map_computer,
                    )
                    .optional()?;
                Ok(computer)
            })?
            .ok_or(InventoryError::NotFound {
                entity: "computer",
                id,
            })
    }

    fn find_all(&self) -> Result<Vec<Computer>, InventoryError> {
        self.connections.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("{FIND_COMPUTER_SQL} ORDER BY computer.id"))?;
            let computers = stmt
                .query_map([], map_computer)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(computers)
        })
    }

    fn create(&self, computer: &Computer) -> Result<Computer, InventoryError> {
        if let Some(id) = computer.id {
            return Err(InventoryError::InvalidState(format!(
                "computer already has id {id}, it must not have one to be created"
            )));
        }
        computer.validate()?;
        debug!("Adding {:?} to DBMS", &computer);

        self.connections.with_transaction(|tx| {
            let company = referenced_company(tx, computer.company_id)?;
            let id: i64 = tx
                .query_row(
                    r"INSERT INTO computer (name, introduced, discontinued, company_id)
                      VALUES (?1, ?2, ?3, ?4)
                      RETURNING id",
                    params![
                        computer.name,
                        date_to_timestamp(computer.introduced),
                        date_to_timestamp(computer.discontinued),
                        computer.company_id,
                    ],
                    |row| row.get(0),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => InventoryError::Persistence(
                        "insert into computer affected no rows".to_string(),
                    ),
                    other => InventoryError::Persistence(format!(
                        "Unable to insert into computer: {other}"
                    )),
                })?;
            debug!("Inserted computer with id {id}");
            Ok(Computer {
                id: Some(id),
                company,
                ..computer.clone()
            })
        })
    }

    fn update(&self, computer: &Computer) -> Result<Computer, InventoryError> {
        let Some(id) = computer.id else {
            return Err(InventoryError::InvalidState(
                "computer has no id, it must be created before it can be updated".to_string(),
            ));
        };
        computer.validate()?;
        debug!("Updating computer {id}");

        self.connections.with_transaction(|tx| {
            let company = referenced_company(tx, computer.company_id)?;
            let updated = tx.execute(
                r"UPDATE computer
                  SET name = ?1, introduced = ?2, discontinued = ?3, company_id = ?4
                  WHERE id = ?5",
                params![
                    computer.name,
                    date_to_timestamp(computer.introduced),
                    date_to_timestamp(computer.discontinued),
                    computer.company_id,
                    id,
                ],
            )?;
            if updated == 0 {
                return Err(InventoryError::NotFound {
                    entity: "computer",
                    id,
                });
            }
            Ok(Computer {
                company,
                ..computer.clone()
            })
        })
    }

    fn delete(&self, id: i64) -> Result<(), InventoryError> {
        self.connections.with_connection(|conn| {
            let removed = conn.execute("DELETE FROM computer WHERE id = ?1", params![id])?;
            debug!("delete():- removed {removed} rows for computer {id}");
            Ok(())
        })
    }

    fn delete_batch(&self, ids: &[i64]) -> Result<usize, InventoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        // One bound placeholder per id
        let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
        let sql = format!("DELETE FROM computer WHERE id IN ({placeholders})");
        debug!("delete_batch():- {sql}");

        self.connections.with_connection(|conn| {
            let removed = conn.execute(&sql, rusqlite::params_from_iter(ids.iter()))?;
            Ok(removed)
        })
    }

    fn delete_by_company(&self, company_id: i64) -> Result<usize, InventoryError> {
        self.connections
            .with_connection(|conn| delete_computers_of_company(conn, company_id))
    }

    fn search_by_name(
        &self,
        term: &str,
        offset: u64,
        limit: u32,
    ) -> Result<Page<ComputerView>, InventoryError> {
        let query = ComputerQuery::new(offset, limit)?.search(Some(term));
        self.find_sorted_page(&query)
    }

    fn count_matching(&self, term: &str) -> Result<i64, InventoryError> {
        // Pagination is irrelevant to the count
        let query = ComputerQuery::new(0, 1)?.search(Some(term));
        self.count_for(&query)
    }

    fn count_all(&self) -> Result<i64, InventoryError> {
        self.connections.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT COUNT(id) FROM computer").map_err(|e| {
                InventoryError::Persistence(format!("Unable to retrieve count from computer: {e}"))
            })?;
            let count = stmt.query_row([], |row| row.get(0))?;
            Ok(count)
        })
    }

    fn find_sorted_page(&self, query: &ComputerQuery) -> Result<Page<ComputerView>, InventoryError> {
        let built = query.select()?;
        debug!("find_sorted_page():- {}", built.sql);

        let views = self.connections.with_connection(|conn| {
            let mut stmt = conn.prepare(&built.sql)?;
            let views = stmt
                .query_map(built.params_refs().as_slice(), map_computer_view)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(views)
        })?;
        Ok(Page::new(views, query.page_index(), query.limit()))
    }

    fn count_for(&self, query: &ComputerQuery) -> Result<i64, InventoryError> {
        let built = query.count();
        debug!("count_for():- {}", built.sql);
        self.connections.with_connection(|conn| {
            let count = conn.query_row(&built.sql, built.params_refs().as_slice(), |row| {
                row.get(0)
            })?;
            Ok(count)
        })
    }
}
