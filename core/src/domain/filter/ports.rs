use super::{
    entities::{ColumnRef, SortDirection},
    errors::FilterError,
};

/// Read-only view over the parameters of the current request.
pub trait ParameterSource {
    fn get(&self, key: &str) -> Option<&str>;

    /// Trimmed value under `key`, or `None` when it is missing or blank.
    fn active_value(&self, key: &str) -> Option<&str> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// The two operations the filter engine needs from a query builder.
///
/// Implementations must AND every call to [`FilterableQuery::where_like_any`]
/// with the conditions already present, and must replace (not append to) any
/// ordering in [`FilterableQuery::order_by_column`].
pub trait FilterableQuery: Sized {
    fn where_like_any(self, columns: &[ColumnRef], value: &str) -> Result<Self, FilterError>;

    fn order_by_column(
        self,
        column: &ColumnRef,
        direction: SortDirection,
    ) -> Result<Self, FilterError>;
}
