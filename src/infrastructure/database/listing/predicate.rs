//! Filter extraction and WHERE-clause rendering for listing queries.

use sea_orm::{DbBackend, Value};

use crate::shared::pagination::parse_leading_integer;
pub use crate::shared::pagination::QueryParams;

/// How a raw parameter value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Leading integer prefix, as page and limit are read
    Integer,
    /// Must be non-empty after trimming; the trimmed value is bound
    Text,
}

impl FilterKind {
    fn parse(self, raw: &str) -> Option<FilterValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self {
            Self::Integer => parse_leading_integer(raw).map(FilterValue::Integer),
            Self::Text => Some(FilterValue::Text(raw.to_string())),
        }
    }
}

/// A recognized filter parameter of a listing endpoint.
///
/// `condition` is an SQL boolean expression containing exactly one `{}`,
/// which is replaced by the backend's placeholder when rendered.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    /// Accepted parameter names, in priority order
    pub params: &'static [&'static str],
    pub condition: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub const fn integer(params: &'static [&'static str], condition: &'static str) -> Self {
        Self {
            params,
            condition,
            kind: FilterKind::Integer,
        }
    }

    pub const fn text(params: &'static [&'static str], condition: &'static str) -> Self {
        Self {
            params,
            condition,
            kind: FilterKind::Text,
        }
    }

    /// First parameter alias that is present and valid.
    fn extract(&self, params: &QueryParams) -> Option<FilterValue> {
        self.params
            .iter()
            .find_map(|name| params.get(*name).and_then(|raw| self.kind.parse(raw)))
    }
}

/// A validated filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Integer(n) => Value::from(n),
            FilterValue::Text(s) => Value::from(s),
        }
    }
}

/// Filters that contribute to a listing query, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    conditions: Vec<(&'static str, FilterValue)>,
}

impl FilterSet {
    /// Collect the filters of `fields` present in `params`.
    ///
    /// Order follows `fields`, not the request; unknown parameters and
    /// invalid values are skipped.
    pub fn from_params(fields: &[FilterField], params: &QueryParams) -> Self {
        let conditions = fields
            .iter()
            .filter_map(|field| field.extract(params).map(|value| (field.condition, value)))
            .collect();
        Self { conditions }
    }

    /// Add a condition that does not come from the query string
    /// (e.g. a path parameter).
    pub fn push(&mut self, condition: &'static str, value: FilterValue) {
        self.conditions.push((condition, value));
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}

/// A rendered WHERE clause and its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Empty, or `" WHERE <c1> AND <c2> ..."`
    sql: String,
    values: Vec<Value>,
}

impl Predicate {
    pub fn build(filters: &FilterSet, backend: DbBackend) -> Self {
        if filters.is_empty() {
            return Self {
                sql: String::new(),
                values: Vec::new(),
            };
        }

        let clauses: Vec<String> = filters
            .conditions
            .iter()
            .enumerate()
            .map(|(i, (condition, _))| condition.replacen("{}", &placeholder(backend, i + 1), 1))
            .collect();

        Self {
            sql: format!(" WHERE {}", clauses.join(" AND ")),
            values: filters
                .conditions
                .iter()
                .map(|(_, value)| Value::from(value.clone()))
                .collect(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Positional placeholder for the `index`-th (1-based) bound value.
pub fn placeholder(backend: DbBackend, index: usize) -> String {
    match backend {
        DbBackend::Postgres => format!("${}", index),
        _ => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FilterField] = &[
        FilterField::integer(&["course_id", "curso_id"], "pub.course_id = {}"),
        FilterField::integer(&["professor_id", "catedratico_id"], "pub.professor_id = {}"),
        FilterField::text(&["kind"], "pub.kind = {}"),
    ];

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_filters_means_no_where() {
        let filters = FilterSet::from_params(FIELDS, &params(&[("page", "2"), ("limit", "5")]));
        let predicate = Predicate::build(&filters, DbBackend::Sqlite);

        assert!(filters.is_empty());
        assert_eq!(predicate.sql(), "");
        assert!(predicate.values().is_empty());
    }

    #[test]
    fn clauses_follow_field_order() {
        let filters = FilterSet::from_params(
            FIELDS,
            &params(&[("kind", "evaluation"), ("professor_id", "7"), ("course_id", "3")]),
        );
        let predicate = Predicate::build(&filters, DbBackend::Sqlite);

        assert_eq!(
            predicate.sql(),
            " WHERE pub.course_id = ? AND pub.professor_id = ? AND pub.kind = ?"
        );
        assert_eq!(
            predicate.values(),
            &[Value::from(3i64), Value::from(7i64), Value::from("evaluation".to_string())]
        );
    }

    #[test]
    fn integer_filters_read_the_leading_digits() {
        let filters = FilterSet::from_params(
            FIELDS,
            &params(&[("course_id", "abc"), ("professor_id", "12x"), ("kind", "general")]),
        );
        let predicate = Predicate::build(&filters, DbBackend::Sqlite);

        assert_eq!(filters.len(), 2);
        assert_eq!(predicate.sql(), " WHERE pub.professor_id = ? AND pub.kind = ?");
        assert_eq!(
            predicate.values(),
            &[Value::from(12i64), Value::from("general".to_string())]
        );
    }

    #[test]
    fn blank_text_is_treated_as_absent() {
        let filters = FilterSet::from_params(FIELDS, &params(&[("kind", "   ")]));
        assert!(filters.is_empty());
    }

    #[test]
    fn text_values_are_trimmed() {
        let fields = [FilterField::text(&["area"], "c.area = {}")];
        let filters = FilterSet::from_params(&fields, &params(&[("area", "  Sciences ")]));
        let predicate = Predicate::build(&filters, DbBackend::Sqlite);
        assert_eq!(predicate.values(), &[Value::from("Sciences".to_string())]);
    }

    #[test]
    fn legacy_alias_is_accepted() {
        let filters = FilterSet::from_params(FIELDS, &params(&[("curso_id", "4")]));
        let predicate = Predicate::build(&filters, DbBackend::Sqlite);
        assert_eq!(predicate.sql(), " WHERE pub.course_id = ?");
        assert_eq!(predicate.values(), &[Value::from(4i64)]);
    }

    #[test]
    fn first_valid_alias_wins() {
        let filters =
            FilterSet::from_params(FIELDS, &params(&[("course_id", "nope"), ("curso_id", "9")]));
        let predicate = Predicate::build(&filters, DbBackend::Sqlite);
        assert_eq!(predicate.values(), &[Value::from(9i64)]);
    }

    #[test]
    fn postgres_placeholders_are_numbered() {
        let filters =
            FilterSet::from_params(FIELDS, &params(&[("course_id", "1"), ("kind", "question")]));
        let predicate = Predicate::build(&filters, DbBackend::Postgres);
        assert_eq!(predicate.sql(), " WHERE pub.course_id = $1 AND pub.kind = $2");
    }

    #[test]
    fn pushed_conditions_follow_query_filters() {
        let mut filters = FilterSet::from_params(FIELDS, &params(&[("kind", "general")]));
        filters.push("pub.user_id = {}", FilterValue::Integer(5));
        let predicate = Predicate::build(&filters, DbBackend::Sqlite);
        assert_eq!(predicate.sql(), " WHERE pub.kind = ? AND pub.user_id = ?");
    }
}
