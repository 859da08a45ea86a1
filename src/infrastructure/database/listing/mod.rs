//! Paginated, filterable listing queries
//!
//! Every listing endpoint goes through the same three steps:
//! page/limit normalization ([`PageRequest`](crate::shared::PageRequest)),
//! predicate building ([`predicate`]) and the paged fetch ([`fetcher`]).

pub mod fetcher;
pub mod predicate;

pub use fetcher::{ListingQuery, ListingRequest, SortOption, SORT_PARAMS};
pub use predicate::{
    placeholder, FilterField, FilterKind, FilterSet, FilterValue, Predicate, QueryParams,
};
