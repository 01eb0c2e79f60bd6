use std::collections::HashMap;

use serde::Deserialize;
use utoipa::IntoParams;
use warden_core::domain::{
    common::value_objects::PageRequest, filter::value_objects::RequestParams,
};

pub const PAGE_PARAMETER: &str = "page";
pub const PER_PAGE_PARAMETER: &str = "per_page";

/// Listing parameters split into filter input and pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub params: RequestParams,
    pub page: PageRequest,
}

impl QueryParams {
    /// Pagination keys are consumed here; every other key is handed to the
    /// filter engine untouched. Unparseable page numbers fall back to defaults.
    pub fn from_query_map(query_map: &HashMap<String, String>) -> Self {
        let mut page: Option<u64> = None;
        let mut per_page: Option<u64> = None;
        let mut params = RequestParams::new();

        for (key, value) in query_map {
            match key.as_str() {
                PAGE_PARAMETER => page = value.trim().parse().ok(),
                PER_PAGE_PARAMETER => per_page = value.trim().parse().ok(),
                _ => params = params.with(key, value),
            }
        }

        Self {
            params,
            page: PageRequest::new(page, per_page),
        }
    }
}

/// OpenAPI description of the parameters every listing endpoint accepts.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Case-insensitive substring searched across the listing's columns.
    pub query: Option<String>,
    /// Column to sort by; dotted paths sort by a related column.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}
