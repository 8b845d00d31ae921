//! Listings 执行层：按查询描述选择 GET/POST 并拉取房源

pub mod executor;
pub mod types;

pub use executor::{augment_url, select_method, QueryExecutor, FULL_FIELD_SELECTION};
pub use types::{Listing, ListingsResponse};
