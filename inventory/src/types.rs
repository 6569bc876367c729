use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::error::InventoryError;

/// A manufacturer. Rows are only ever created with an id assigned by the database.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

impl Display for Company {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5} {}", self.id, self.name)
    }
}

/// A company which has not been stored yet.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct NewCompany {
    pub name: String,
}

impl NewCompany {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Represents a computer record in the database
///
/// `id` is `None` until the computer has been created. `company` is only populated when the
/// computer was read with a join on the company table; writes use `company_id` exclusively.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Default)]
pub struct Computer {
    pub id: Option<i64>,
    pub name: String,
    pub introduced: Option<NaiveDate>,
    pub discontinued: Option<NaiveDate>,
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub company: Option<Company>,
}

impl Computer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn introduced(mut self, date: Option<NaiveDate>) -> Self {
        self.introduced = date;
        self
    }

    #[must_use]
    pub fn discontinued(mut self, date: Option<NaiveDate>) -> Self {
        self.discontinued = date;
        self
    }

    #[must_use]
    pub fn company_id(mut self, company_id: Option<i64>) -> Self {
        self.company_id = company_id;
        self
    }

    /// Checks the field level invariants of a computer about to be written.
    ///
    /// # Errors
    /// [`InventoryError::Validation`] if the name is blank or the computer was discontinued
    /// before it was introduced.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::Validation(
                "a computer must have a name".to_string(),
            ));
        }
        if let (Some(introduced), Some(discontinued)) = (self.introduced, self.discontinued) {
            if discontinued < introduced {
                return Err(InventoryError::Validation(format!(
                    "discontinued date {discontinued} precedes introduced date {introduced}"
                )));
            }
        }
        Ok(())
    }
}

/// Flattened computer row used by the listings: the computer joined with the name of its
/// company.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct ComputerView {
    pub id: i64,
    pub name: String,
    pub introduced: Option<NaiveDate>,
    pub discontinued: Option<NaiveDate>,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
}

impl From<&Computer> for ComputerView {
    fn from(computer: &Computer) -> Self {
        ComputerView {
            id: computer.id.unwrap_or_default(),
            name: computer.name.clone(),
            introduced: computer.introduced,
            discontinued: computer.discontinued,
            company_id: computer.company_id,
            company_name: computer.company.as_ref().map(|c| c.name.clone()),
        }
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

impl Display for ComputerView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} {:<40} {:<10} {:<10} {}",
            self.id,
            self.name,
            fmt_date(self.introduced),
            fmt_date(self.discontinued),
            self.company_name.as_deref().unwrap_or("-")
        )
    }
}

/// What a cascading company delete removed.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Default)]
pub struct CascadeOutcome {
    pub computers_removed: usize,
    pub company_removed: bool,
}
