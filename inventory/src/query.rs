//! Builds the computer listing statements.
//!
//! Sort columns and directions arrive as text from the front ends. They are resolved
//! through the fixed tables below and only the resolved, compile time constant column
//! identifiers ever reach the SQL text. Anything not in the tables is dropped and the
//! default order is used. Search terms are always bound as parameters.
use crate::error::InventoryError;
use crate::pagination::{page_index_of, Pagination};
use rusqlite::ToSql;

/// Columns a computer listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    ComputerName,
    Introduced,
    Discontinued,
    CompanyName,
}

impl SortColumn {
    /// Resolves the sort key used by the dashboard links. Unknown keys give `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "computerName" => Some(SortColumn::ComputerName),
            "introduced" => Some(SortColumn::Introduced),
            "discontinued" => Some(SortColumn::Discontinued),
            "companyName" => Some(SortColumn::CompanyName),
            _ => None,
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            SortColumn::ComputerName => "computer.name",
            SortColumn::Introduced => "computer.introduced",
            SortColumn::Discontinued => "computer.discontinued",
            SortColumn::CompanyName => "company.name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ASC" => Some(SortOrder::Ascending),
            "DESC" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    pub(crate) fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Page sizes offered by the dashboard.
pub const PAGE_SIZES: [u32; 3] = [10, 50, 100];
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Resolves a requested page size, falling back to [`DEFAULT_PAGE_SIZE`] for anything not
/// in [`PAGE_SIZES`].
#[must_use]
pub fn page_size_from_token(token: Option<&str>) -> u32 {
    token
        .and_then(|t| t.trim().parse::<u32>().ok())
        .filter(|size| PAGE_SIZES.contains(size))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Lower-cases a search term and wraps it in `%` wildcards, escaping the wildcard
/// characters it contains so they match literally. The searched columns are folded the
/// same way in SQL.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

const COMPUTER_VIEW_SELECT: &str = r"
    SELECT computer.id, computer.name, computer.introduced, computer.discontinued,
           computer.company_id, company.name
    FROM computer LEFT JOIN company ON computer.company_id = company.id";

const COMPUTER_COUNT_SELECT: &str = r"
    SELECT COUNT(computer.id)
    FROM computer LEFT JOIN company ON computer.company_id = company.id";

const SEARCH_PREDICATE: &str = r" WHERE inventory_fold(computer.name) LIKE ? ESCAPE '\'
    OR inventory_fold(company.name) LIKE ? ESCAPE '\'";

/// SQL text together with the values bound to its placeholders, in order.
pub(crate) struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Box<dyn ToSql>>,
}

impl BuiltQuery {
    pub fn params_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(AsRef::as_ref).collect()
    }
}

/// A filtered, sorted and paginated listing of computers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerQuery {
    search: Option<String>,
    sort: Option<SortColumn>,
    order: SortOrder,
    offset: u64,
    limit: u32,
}

impl ComputerQuery {
    /// # Errors
    /// [`InventoryError::Validation`] if `limit` is zero.
    pub fn new(offset: u64, limit: u32) -> Result<Self, InventoryError> {
        page_index_of(offset, limit)?;
        Ok(Self {
            search: None,
            sort: None,
            order: SortOrder::default(),
            offset,
            limit,
        })
    }

    #[must_use]
    pub fn from_pagination(pagination: Pagination) -> Self {
        let (offset, limit) = pagination.offset_limit();
        Self {
            search: None,
            sort: None,
            order: SortOrder::default(),
            offset,
            limit,
        }
    }

    /// Restricts the listing to computers whose name, or whose company's name, contains
    /// `term`. `None` lists everything.
    #[must_use]
    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = term.map(ToString::to_string);
        self
    }

    #[must_use]
    pub fn sort(mut self, column: Option<SortColumn>, order: SortOrder) -> Self {
        self.sort = column;
        self.order = order;
        self
    }

    /// Resolves the raw sort key and direction through the whitelist. A direction without a
    /// recognised column has no effect.
    #[must_use]
    pub fn sort_by_tokens(self, column: Option<&str>, order: Option<&str>) -> Self {
        let column = column.and_then(SortColumn::from_token);
        let order = order.and_then(SortOrder::from_token).unwrap_or_default();
        self.sort(column, order)
    }

    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[must_use]
    pub fn sort_column(&self) -> Option<SortColumn> {
        self.sort
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.order
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn page_index(&self) -> u32 {
        u32::try_from(self.offset / u64::from(self.limit)).unwrap_or(u32::MAX)
    }

    fn order_by(&self) -> String {
        match self.sort {
            Some(column) => format!(
                " ORDER BY {} {}, computer.id ASC",
                column.column(),
                self.order.keyword()
            ),
            None => " ORDER BY computer.id ASC".to_string(),
        }
    }

    fn push_search(&self, sql: &mut String, params: &mut Vec<Box<dyn ToSql>>) {
        if let Some(term) = &self.search {
            sql.push_str(SEARCH_PREDICATE);
            let pattern = like_pattern(term);
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }
    }

    pub(crate) fn select(&self) -> Result<BuiltQuery, InventoryError> {
        let mut sql = String::from(COMPUTER_VIEW_SELECT);
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        self.push_search(&mut sql, &mut params);
        sql.push_str(&self.order_by());
        sql.push_str(" LIMIT ? OFFSET ?");
        let offset = i64::try_from(self.offset)
            .map_err(|_| InventoryError::Validation(format!("offset {} is too large", self.offset)))?;
        params.push(Box::new(i64::from(self.limit)));
        params.push(Box::new(offset));
        Ok(BuiltQuery { sql, params })
    }

    pub(crate) fn count(&self) -> BuiltQuery {
        let mut sql = String::from(COMPUTER_COUNT_SELECT);
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        self.push_search(&mut sql, &mut params);
        BuiltQuery { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelisted_sort_keys() {
        assert_eq!(
            SortColumn::from_token("computerName"),
            Some(SortColumn::ComputerName)
        );
        assert_eq!(
            SortColumn::from_token("companyName"),
            Some(SortColumn::CompanyName)
        );
        assert_eq!(SortColumn::from_token("computer.name"), None);
        assert_eq!(SortColumn::from_token("name; DROP TABLE computer"), None);
        assert_eq!(SortOrder::from_token("DESC"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::from_token("desc"), None);
    }

    #[test]
    fn unknown_tokens_never_reach_the_sql() -> Result<(), InventoryError> {
        let query = ComputerQuery::new(0, 10)?
            .sort_by_tokens(Some("id; DELETE FROM company"), Some("DESC; --"));
        let built = query.select()?;
        assert!(!built.sql.contains("DELETE"));
        assert!(built.sql.contains("ORDER BY computer.id ASC"));
        Ok(())
    }

    #[test]
    fn sort_column_and_direction_are_applied() -> Result<(), InventoryError> {
        let built = ComputerQuery::new(20, 10)?
            .sort_by_tokens(Some("introduced"), Some("DESC"))
            .select()?;
        assert!(built
            .sql
            .contains("ORDER BY computer.introduced DESC, computer.id ASC"));
        assert_eq!(built.params.len(), 2);
        Ok(())
    }

    #[test]
    fn direction_without_column_is_ignored() -> Result<(), InventoryError> {
        let query = ComputerQuery::new(0, 10)?.sort_by_tokens(None, Some("DESC"));
        assert_eq!(query.sort_column(), None);
        assert!(query.select()?.sql.contains("ORDER BY computer.id ASC"));
        Ok(())
    }

    #[test]
    fn search_binds_both_like_parameters() -> Result<(), InventoryError> {
        let query = ComputerQuery::new(0, 10)?.search(Some("mac"));
        let select = query.select()?;
        assert!(select.sql.contains("inventory_fold(computer.name) LIKE ?"));
        assert!(select.sql.contains("inventory_fold(company.name) LIKE ?"));
        assert_eq!(select.params.len(), 4);
        let count = query.count();
        assert!(!count.sql.contains("LIMIT"));
        assert_eq!(count.params.len(), 2);
        Ok(())
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("mac"), "%mac%");
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
    }

    #[test]
    fn like_pattern_folds_case_beyond_ascii() {
        assert_eq!(like_pattern("MacBook"), "%macbook%");
        assert_eq!(like_pattern("ÉCRAN"), "%écran%");
    }

    #[test]
    fn page_sizes_are_whitelisted() {
        assert_eq!(page_size_from_token(Some("50")), 50);
        assert_eq!(page_size_from_token(Some("100")), 100);
        assert_eq!(page_size_from_token(Some("7")), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size_from_token(Some("abc")), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size_from_token(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(ComputerQuery::new(0, 0).is_err());
    }

    #[test]
    fn page_index_follows_offset() -> Result<(), InventoryError> {
        assert_eq!(ComputerQuery::new(40, 20)?.page_index(), 2);
        let pagination = Pagination::new(3, 10)?;
        assert_eq!(ComputerQuery::from_pagination(pagination).offset(), 30);
        Ok(())
    }
}
