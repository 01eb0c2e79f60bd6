use std::str::FromStr;

use sea_orm::{
    Condition, EntityTrait, Order, QueryFilter, QueryOrder, QueryTrait, Select,
    sea_query::{Expr, Func, Query, SelectStatement, SimpleExpr, SubQueryStatement},
};

use crate::domain::filter::{
    entities::{ColumnRef, SortDirection},
    errors::FilterError,
    ports::FilterableQuery,
};

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Entities whose listings can be searched or sorted through a relation.
///
/// The defaults reject every relation; entities opt in per relation name.
pub trait RelationFilter: EntityTrait {
    /// Condition matching owners with at least one related row whose `field`
    /// is LIKE `pattern` (already lowercased and wrapped in `%`).
    fn relation_match(relation: &str, field: &str, pattern: &str) -> Result<SimpleExpr, FilterError> {
        let _ = (field, pattern);
        Err(FilterError::UnresolvedRelation(relation.to_string()))
    }

    /// Scalar expression to sort owners by a related `field`.
    fn relation_order(relation: &str, field: &str) -> Result<SimpleExpr, FilterError> {
        let _ = field;
        Err(FilterError::UnresolvedRelation(relation.to_string()))
    }
}

pub fn resolve_column<E: EntityTrait>(name: &str) -> Result<E::Column, FilterError> {
    E::Column::from_str(name).map_err(|_| {
        FilterError::UnresolvedColumn(format!("{}.{name}", E::default().table_name()))
    })
}

pub fn column_expr<E: EntityTrait>(column: E::Column) -> SimpleExpr {
    Expr::col((E::default(), column)).into()
}

pub fn lower_like(expr: SimpleExpr, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(expr)).like(pattern)
}

/// `%value%`, lowercased, with LIKE wildcards in `value` matched literally.
pub fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Many-to-many relation from `O` to `R` through the pivot table `P`.
pub struct PivotRelation<O, P, R>
where
    O: EntityTrait,
    P: EntityTrait,
    R: EntityTrait,
{
    pub owner_key: O::Column,
    pub pivot_owner: P::Column,
    pub pivot_related: P::Column,
    pub related_key: R::Column,
}

impl<O, P, R> PivotRelation<O, P, R>
where
    O: EntityTrait,
    P: EntityTrait,
    R: EntityTrait,
{
    fn pivot_select(&self) -> SelectStatement {
        Query::select()
            .from(P::default())
            .inner_join(
                R::default(),
                Expr::col((R::default(), self.related_key))
                    .equals((P::default(), self.pivot_related)),
            )
            .to_owned()
    }

    /// `owner.key IN (SELECT pivot.owner FROM pivot JOIN related .. WHERE lower(related.field) LIKE ..)`
    pub fn matching(&self, field: &str, pattern: &str) -> Result<SimpleExpr, FilterError> {
        let column = resolve_column::<R>(field)?;

        let mut select = self.pivot_select();
        select
            .column((P::default(), self.pivot_owner))
            .and_where(lower_like(column_expr::<R>(column), pattern));

        Ok(Expr::col((O::default(), self.owner_key)).in_subquery(select))
    }

    /// Smallest related value per owner, compared case-insensitively.
    pub fn ordering(&self, field: &str) -> Result<SimpleExpr, FilterError> {
        let column = resolve_column::<R>(field)?;

        let mut select = self.pivot_select();
        select
            .expr(Func::min(Func::lower(column_expr::<R>(column))))
            .and_where(
                Expr::col((P::default(), self.pivot_owner))
                    .equals((O::default(), self.owner_key)),
            );

        Ok(SimpleExpr::SubQuery(
            None,
            Box::new(SubQueryStatement::SelectStatement(select)),
        ))
    }
}

impl<E> FilterableQuery for Select<E>
where
    E: RelationFilter,
{
    fn where_like_any(self, columns: &[ColumnRef], value: &str) -> Result<Self, FilterError> {
        let pattern = like_pattern(value);

        let condition = columns
            .iter()
            .try_fold(Condition::any(), |condition, column| {
                let expr = match column {
                    ColumnRef::Field(name) => {
                        lower_like(column_expr::<E>(resolve_column::<E>(name)?), &pattern)
                    }
                    ColumnRef::Related { relation, field } => {
                        E::relation_match(relation, field, &pattern)?
                    }
                };
                Ok::<_, FilterError>(condition.add(expr))
            })?;

        Ok(self.filter(condition))
    }

    fn order_by_column(
        mut self,
        column: &ColumnRef,
        direction: SortDirection,
    ) -> Result<Self, FilterError> {
        let expr = match column {
            ColumnRef::Field(name) => column_expr::<E>(resolve_column::<E>(name)?),
            ColumnRef::Related { relation, field } => E::relation_order(relation, field)?,
        };

        QueryTrait::query(&mut self).clear_order_by();

        Ok(self.order_by(expr, direction.into()))
    }
}
