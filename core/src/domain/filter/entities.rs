use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::{
    errors::FilterError,
    ports::{FilterableQuery, ParameterSource},
    value_objects::{DIRECTION_PARAMETER, SEARCH_PARAMETER, SORT_PARAMETER},
};

/// A column, optionally reached through a named relation (`roles.name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    Field(String),
    Related { relation: String, field: String },
}

impl ColumnRef {
    pub fn field(&self) -> &str {
        match self {
            ColumnRef::Field(field) => field,
            ColumnRef::Related { field, .. } => field,
        }
    }

    pub fn relation(&self) -> Option<&str> {
        match self {
            ColumnRef::Field(_) => None,
            ColumnRef::Related { relation, .. } => Some(relation),
        }
    }
}

impl FromStr for ColumnRef {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();

        match path.split_once('.') {
            None if !path.is_empty() => Ok(ColumnRef::Field(path.to_string())),
            Some((relation, field))
                if !relation.is_empty() && !field.is_empty() && !field.contains('.') =>
            {
                Ok(ColumnRef::Related {
                    relation: relation.to_string(),
                    field: field.to_string(),
                })
            }
            _ => Err(FilterError::InvalidConfiguration(format!(
                "invalid column path '{s}'"
            ))),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Field(field) => f.write_str(field),
            ColumnRef::Related { relation, field } => write!(f, "{relation}.{field}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Whether a spec needs its request parameter before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Always,
    OnParameter,
}

/// Case-insensitive substring search over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    columns: Vec<ColumnRef>,
    name: Option<String>,
}

impl SearchSpec {
    pub fn new<I, S>(columns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = columns
            .into_iter()
            .map(|column| column.as_ref().parse::<ColumnRef>())
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(FilterError::InvalidConfiguration(
                "search needs at least one column".to_string(),
            ));
        }

        Ok(Self {
            columns,
            name: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(SEARCH_PARAMETER)
    }
}

/// Sorting by one column. Columns and direction may be overridden by the
/// request through `sort` and `direction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    column: ColumnRef,
    direction: SortDirection,
    name: Option<String>,
    activation: Activation,
    sortable: Option<Vec<ColumnRef>>,
}

impl Default for OrderSpec {
    fn default() -> Self {
        Self {
            column: ColumnRef::Field("id".to_string()),
            direction: SortDirection::Desc,
            name: None,
            activation: Activation::Always,
            sortable: None,
        }
    }
}

impl OrderSpec {
    pub fn new(column: &str, direction: SortDirection) -> Result<Self, FilterError> {
        Ok(Self {
            column: column.parse()?,
            direction,
            ..Self::default()
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Only sort when the request carries the sort parameter.
    pub fn on_request(mut self) -> Self {
        self.activation = Activation::OnParameter;
        self
    }

    /// Restricts request-supplied columns to `columns`. The constructed
    /// column is always allowed.
    pub fn sortable<I, S>(mut self, columns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed = columns
            .into_iter()
            .map(|column| column.as_ref().parse::<ColumnRef>())
            .collect::<Result<Vec<_>, _>>()?;

        if !allowed.contains(&self.column) {
            allowed.push(self.column.clone());
        }

        self.sortable = Some(allowed);
        Ok(self)
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    /// `None` when any column may be requested.
    pub fn sortable_columns(&self) -> Option<&[ColumnRef]> {
        self.sortable.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(SORT_PARAMETER)
    }

    fn requested_column(&self, requested: &str) -> Result<ColumnRef, FilterError> {
        let unresolved = || FilterError::UnresolvedColumn(requested.trim().to_string());

        let column = requested.parse::<ColumnRef>().map_err(|_| unresolved())?;

        match &self.sortable {
            Some(allowed) if !allowed.contains(&column) => Err(unresolved()),
            _ => Ok(column),
        }
    }

    fn resolve<P: ParameterSource + ?Sized>(
        &self,
        params: &P,
    ) -> Result<(ColumnRef, SortDirection), FilterError> {
        let column = match params.active_value(self.name()) {
            Some(requested) => self.requested_column(requested)?,
            None => self.column.clone(),
        };

        let direction = match params.active_value(DIRECTION_PARAMETER) {
            Some(requested) => requested.parse().unwrap_or_else(|_| {
                debug!(requested, "ignoring unknown sort direction");
                self.direction
            }),
            None => self.direction,
        };

        Ok((column, direction))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    Search(SearchSpec),
    Order(OrderSpec),
}

impl FilterSpec {
    pub fn search<I, S>(columns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SearchSpec::new(columns).map(FilterSpec::Search)
    }

    pub fn order(column: &str, direction: SortDirection) -> Result<Self, FilterError> {
        OrderSpec::new(column, direction).map(FilterSpec::Order)
    }

    pub fn name(&self) -> &str {
        match self {
            FilterSpec::Search(spec) => spec.name(),
            FilterSpec::Order(spec) => spec.name(),
        }
    }

    pub fn is_active<P: ParameterSource + ?Sized>(&self, params: &P) -> bool {
        params.active_value(self.name()).is_some()
    }

    /// Active, or applied regardless of the request.
    pub fn should_apply<P: ParameterSource + ?Sized>(&self, params: &P) -> bool {
        match self {
            FilterSpec::Order(spec) if spec.activation == Activation::Always => true,
            _ => self.is_active(params),
        }
    }

    pub fn apply<Q, P>(&self, query: Q, params: &P) -> Result<Q, FilterError>
    where
        Q: FilterableQuery,
        P: ParameterSource + ?Sized,
    {
        match self {
            FilterSpec::Search(spec) => match params.active_value(spec.name()) {
                Some(value) => query.where_like_any(spec.columns(), value),
                None => Ok(query),
            },
            FilterSpec::Order(spec) => {
                let (column, direction) = spec.resolve(params)?;
                query.order_by_column(&column, direction)
            }
        }
    }
}

impl From<SearchSpec> for FilterSpec {
    fn from(spec: SearchSpec) -> Self {
        FilterSpec::Search(spec)
    }
}

impl From<OrderSpec> for FilterSpec {
    fn from(spec: OrderSpec) -> Self {
        FilterSpec::Order(spec)
    }
}
