use tracing::{debug, instrument};

use super::{
    entities::FilterSpec,
    errors::FilterError,
    ports::{FilterableQuery, ParameterSource},
};

/// Threads a base query through an ordered list of filter specs.
///
/// Activation is decided from the request parameters alone, so a spec never
/// observes what earlier specs did to the query. Single-valued clauses
/// (ordering) are last-applied-wins; searches compose with AND.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryFilterEngine;

impl QueryFilterEngine {
    #[instrument(skip_all, fields(specs = specs.len()))]
    pub fn run<Q, P>(query: Q, specs: &[FilterSpec], params: &P) -> Result<Q, FilterError>
    where
        Q: FilterableQuery,
        P: ParameterSource + ?Sized,
    {
        specs.iter().try_fold(query, |query, spec| {
            if !spec.should_apply(params) {
                return Ok(query);
            }

            debug!(filter = spec.name(), "applying filter");
            spec.apply(query, params)
        })
    }
}
