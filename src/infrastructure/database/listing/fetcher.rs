//! Generic paginated, filterable listing query.
//!
//! A [`ListingQuery`] describes one listing endpoint: the base select with its
//! joins, the count source, the recognized filters, the allowed orderings and
//! the default page size. Fetching runs two sequential statements sharing the
//! same predicate: the page of rows and the total count.

use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement, Value};
use tracing::debug;

use super::predicate::{placeholder, FilterField, FilterSet, FilterValue, Predicate, QueryParams};
use crate::shared::pagination::{PageEnvelope, PageRequest};

/// Query-string names accepted for the sort key.
pub const SORT_PARAMS: &[&str] = &["sort_by", "sortBy"];

/// A named ordering a client may request instead of the default one.
#[derive(Debug, Clone, Copy)]
pub struct SortOption {
    pub key: &'static str,
    pub order_by: &'static str,
}

/// Static description of one listing endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ListingQuery {
    /// Key of the items array in the serialized envelope
    pub collection: &'static str,
    /// `SELECT ... FROM ... [JOIN ...]` without WHERE/GROUP BY/ORDER BY
    pub select: &'static str,
    /// `FROM ...` the count runs over; must expose every column the filters use
    pub count_from: &'static str,
    pub group_by: Option<&'static str>,
    /// Default ORDER BY; should end on a unique column so pages are stable
    pub order_by: &'static str,
    pub sorts: &'static [SortOption],
    pub filters: &'static [FilterField],
    pub default_limit: u64,
}

/// Everything a single fetch needs, derived from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub page: PageRequest,
    pub filters: FilterSet,
    pub order_by: &'static str,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

impl ListingQuery {
    /// Normalize pagination, collect filters and resolve the ordering.
    /// Never fails: anything unrecognized is ignored.
    pub fn request(&self, params: &QueryParams) -> ListingRequest {
        ListingRequest {
            page: PageRequest::normalize(
                params.get("page").map(String::as_str),
                params.get("limit").map(String::as_str),
                self.default_limit,
            ),
            filters: FilterSet::from_params(self.filters, params),
            order_by: self.resolve_order(params),
        }
    }

    fn resolve_order(&self, params: &QueryParams) -> &'static str {
        SORT_PARAMS
            .iter()
            .filter_map(|name| params.get(*name))
            .find_map(|key| {
                let key = key.trim();
                self.sorts.iter().find(|s| s.key.eq_ignore_ascii_case(key))
            })
            .map_or(self.order_by, |s| s.order_by)
    }

    pub fn row_statement(&self, backend: DbBackend, predicate: &Predicate, request: &ListingRequest) -> Statement {
        let bound = predicate.values().len();
        let group_by = self
            .group_by
            .map(|g| format!(" GROUP BY {}", g))
            .unwrap_or_default();

        let sql = format!(
            "{}{}{} ORDER BY {} LIMIT {} OFFSET {}",
            self.select,
            predicate.sql(),
            group_by,
            request.order_by,
            placeholder(backend, bound + 1),
            placeholder(backend, bound + 2),
        );

        let mut values = predicate.values().to_vec();
        values.push(Value::from(to_i64(request.page.limit)));
        values.push(Value::from(to_i64(request.page.offset())));

        Statement::from_sql_and_values(backend, sql, values)
    }

    pub fn count_statement(&self, backend: DbBackend, predicate: &Predicate) -> Statement {
        let sql = format!("SELECT COUNT(*) AS total {}{}", self.count_from, predicate.sql());
        Statement::from_sql_and_values(backend, sql, predicate.values().to_vec())
    }

    /// Parse `params` and fetch the requested page.
    pub async fn fetch<T, C>(&self, db: &C, params: &QueryParams) -> Result<PageEnvelope<T>, DbErr>
    where
        T: FromQueryResult,
        C: ConnectionTrait,
    {
        self.fetch_request(db, &self.request(params)).await
    }

    /// Fetch a page for an already built request.
    pub async fn fetch_request<T, C>(&self, db: &C, request: &ListingRequest) -> Result<PageEnvelope<T>, DbErr>
    where
        T: FromQueryResult,
        C: ConnectionTrait,
    {
        let backend = db.get_database_backend();
        let predicate = Predicate::build(&request.filters, backend);

        let rows = self.row_statement(backend, &predicate, request);
        debug!(
            collection = self.collection,
            sql = %rows.sql,
            values = ?predicate.values(),
            page = request.page.page,
            limit = request.page.limit,
            "Listing query"
        );
        let items = T::find_by_statement(rows).all(db).await?;

        let total = CountRow::find_by_statement(self.count_statement(backend, &predicate))
            .one(db)
            .await?
            .map_or(0, |row| u64::try_from(row.total).unwrap_or(0));

        Ok(PageEnvelope::new(self.collection, items, request.page, total))
    }

    /// First `limit` rows matching one fixed condition, in default order.
    /// No count query is issued.
    pub async fn rows_where<T, C>(
        &self,
        db: &C,
        condition: &'static str,
        value: FilterValue,
        limit: u64,
    ) -> Result<Vec<T>, DbErr>
    where
        T: FromQueryResult,
        C: ConnectionTrait,
    {
        let backend = db.get_database_backend();
        let mut filters = FilterSet::default();
        filters.push(condition, value);
        let request = ListingRequest {
            page: PageRequest::first(limit),
            filters,
            order_by: self.order_by,
        };
        let predicate = Predicate::build(&request.filters, backend);

        T::find_by_statement(self.row_statement(backend, &predicate, &request))
            .all(db)
            .await
    }
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
