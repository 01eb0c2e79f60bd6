use sea_orm::sea_query::SimpleExpr;

use crate::{
    domain::filter::errors::FilterError,
    entity::{permissions, role_permissions, roles, user_roles, users},
    infrastructure::filter::select::{PivotRelation, RelationFilter},
};

fn user_roles() -> PivotRelation<users::Entity, user_roles::Entity, roles::Entity> {
    PivotRelation {
        owner_key: users::Column::Id,
        pivot_owner: user_roles::Column::UserId,
        pivot_related: user_roles::Column::RoleId,
        related_key: roles::Column::Id,
    }
}

fn role_users() -> PivotRelation<roles::Entity, user_roles::Entity, users::Entity> {
    PivotRelation {
        owner_key: roles::Column::Id,
        pivot_owner: user_roles::Column::RoleId,
        pivot_related: user_roles::Column::UserId,
        related_key: users::Column::Id,
    }
}

fn role_permissions() -> PivotRelation<roles::Entity, role_permissions::Entity, permissions::Entity>
{
    PivotRelation {
        owner_key: roles::Column::Id,
        pivot_owner: role_permissions::Column::RoleId,
        pivot_related: role_permissions::Column::PermissionId,
        related_key: permissions::Column::Id,
    }
}

impl RelationFilter for users::Entity {
    fn relation_match(relation: &str, field: &str, pattern: &str) -> Result<SimpleExpr, FilterError> {
        match relation {
            "roles" => user_roles().matching(field, pattern),
            _ => Err(FilterError::UnresolvedRelation(relation.to_string())),
        }
    }

    fn relation_order(relation: &str, field: &str) -> Result<SimpleExpr, FilterError> {
        match relation {
            "roles" => user_roles().ordering(field),
            _ => Err(FilterError::UnresolvedRelation(relation.to_string())),
        }
    }
}

impl RelationFilter for roles::Entity {
    fn relation_match(relation: &str, field: &str, pattern: &str) -> Result<SimpleExpr, FilterError> {
        match relation {
            "permissions" => role_permissions().matching(field, pattern),
            "users" => role_users().matching(field, pattern),
            _ => Err(FilterError::UnresolvedRelation(relation.to_string())),
        }
    }

    fn relation_order(relation: &str, field: &str) -> Result<SimpleExpr, FilterError> {
        match relation {
            "permissions" => role_permissions().ordering(field),
            "users" => role_users().ordering(field),
            _ => Err(FilterError::UnresolvedRelation(relation.to_string())),
        }
    }
}

impl RelationFilter for permissions::Entity {}

#[cfg(test)]
mod tests {
    use sea_orm::{ColumnTrait, DbBackend, EntityTrait, QueryFilter, QueryOrder, QueryTrait};

    use crate::domain::{
        filter::{
            entities::{FilterSpec, OrderSpec, SearchSpec, SortDirection},
            services::QueryFilterEngine,
            value_objects::RequestParams,
        },
        role::services::role_filters,
        user::services::user_filters,
    };

    use super::*;

    fn users_sql(specs: &[FilterSpec], params: &RequestParams) -> String {
        QueryFilterEngine::run(users::Entity::find(), specs, params)
            .unwrap()
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_search_across_columns_and_roles() {
        let specs = vec![FilterSpec::search(["name", "roles.name"]).unwrap()];
        let params = RequestParams::new().with("query", "Alice");

        let sql = users_sql(&specs, &params);

        assert!(sql.contains(r#"LOWER("users"."name") LIKE '%alice%'"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(
            sql.contains(
                r#""users"."id" IN (SELECT "user_roles"."user_id" FROM "user_roles" INNER JOIN "roles" ON "roles"."id" = "user_roles"."role_id""#
            ),
            "{sql}"
        );
        assert!(sql.contains(r#"LOWER("roles"."name") LIKE '%alice%'"#), "{sql}");
        assert!(!sql.contains("ORDER BY"), "{sql}");
    }

    #[test]
    fn test_default_order_without_parameters() {
        let specs = vec![FilterSpec::Order(OrderSpec::default())];

        let sql = users_sql(&specs, &RequestParams::new());

        assert!(sql.ends_with(r#"ORDER BY "users"."id" DESC"#), "{sql}");
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn test_sort_parameter_overrides_default() {
        let specs = vec![FilterSpec::Order(OrderSpec::default())];
        let params = RequestParams::new()
            .with("sort", "name")
            .with("direction", "ASC");

        let sql = users_sql(&specs, &params);

        assert!(sql.ends_with(r#"ORDER BY "users"."name" ASC"#), "{sql}");
    }

    #[test]
    fn test_last_order_replaces_previous() {
        let specs = vec![
            FilterSpec::order("id", SortDirection::Desc).unwrap(),
            FilterSpec::from(
                OrderSpec::new("email", SortDirection::Asc)
                    .unwrap()
                    .named("order_by"),
            ),
        ];

        let sql = users_sql(&specs, &RequestParams::new());

        assert!(sql.ends_with(r#"ORDER BY "users"."email" ASC"#), "{sql}");
        assert!(!sql.contains(r#""users"."id" DESC"#), "{sql}");
    }

    #[test]
    fn test_filters_replace_existing_order() {
        let base = users::Entity::find().order_by_asc(users::Column::CreatedAt);
        let specs = vec![FilterSpec::Order(OrderSpec::default())];

        let sql = QueryFilterEngine::run(base, &specs, &RequestParams::new())
            .unwrap()
            .build(DbBackend::Postgres)
            .to_string();

        assert!(!sql.contains("created_at\" ASC"), "{sql}");
        assert!(sql.ends_with(r#"ORDER BY "users"."id" DESC"#), "{sql}");
    }

    #[test]
    fn test_search_is_and_ed_with_existing_conditions() {
        let base = users::Entity::find().filter(users::Column::Email.eq("a@example.org"));
        let specs = vec![FilterSpec::search(["name"]).unwrap()];
        let params = RequestParams::new().with("query", "ali");

        let sql = QueryFilterEngine::run(base, &specs, &params)
            .unwrap()
            .build(DbBackend::Postgres)
            .to_string();

        assert!(
            sql.contains(r#""users"."email" = 'a@example.org' AND"#),
            "{sql}"
        );
        assert!(sql.contains(r#"LOWER("users"."name") LIKE '%ali%'"#), "{sql}");
    }

    #[test]
    fn test_search_wildcards_are_escaped() {
        let specs = vec![FilterSpec::search(["name"]).unwrap()];
        let params = RequestParams::new().with("query", "100%");

        let sql = users_sql(&specs, &params);

        assert!(sql.contains(r"100\"), "{sql}");
    }

    #[test]
    fn test_order_by_related_field() {
        let specs = vec![FilterSpec::order("roles.name", SortDirection::Asc).unwrap()];

        let sql = users_sql(&specs, &RequestParams::new());

        assert!(sql.contains(r#"ORDER BY (SELECT MIN(LOWER("roles"."name"))"#), "{sql}");
        assert!(
            sql.contains(r#""user_roles"."user_id" = "users"."id""#),
            "{sql}"
        );
        assert!(sql.ends_with(" ASC"), "{sql}");
    }

    #[test]
    fn test_unknown_column() {
        let specs = vec![FilterSpec::search(["nickname"]).unwrap()];
        let params = RequestParams::new().with("query", "x");

        let result = QueryFilterEngine::run(users::Entity::find(), &specs, &params);

        assert_eq!(
            result.err(),
            Some(FilterError::UnresolvedColumn("users.nickname".to_string()))
        );
    }

    #[test]
    fn test_unknown_related_field_and_relation() {
        let params = RequestParams::new().with("query", "x");

        let colour = vec![FilterSpec::search(["roles.colour"]).unwrap()];
        let result = QueryFilterEngine::run(users::Entity::find(), &colour, &params);
        assert_eq!(
            result.err(),
            Some(FilterError::UnresolvedColumn("roles.colour".to_string()))
        );

        let posts = vec![FilterSpec::from(SearchSpec::new(["posts.title"]).unwrap())];
        let result = QueryFilterEngine::run(users::Entity::find(), &posts, &params);
        assert_eq!(
            result.err(),
            Some(FilterError::UnresolvedRelation("posts".to_string()))
        );

        let result = QueryFilterEngine::run(permissions::Entity::find(), &posts, &params);
        assert_eq!(
            result.err(),
            Some(FilterError::UnresolvedRelation("posts".to_string()))
        );
    }

    #[test]
    fn test_unknown_sort_parameter_is_rejected() {
        let specs = vec![FilterSpec::Order(OrderSpec::default())];
        let params = RequestParams::new().with("sort", "password_hash");

        let result = QueryFilterEngine::run(users::Entity::find(), &specs, &params);

        assert!(matches!(result, Err(FilterError::UnresolvedColumn(_))));
    }

    #[test]
    fn test_listings_refuse_to_sort_by_hidden_columns() {
        let params = RequestParams::new()
            .with("sort", "password")
            .with("direction", "asc");
        let result = QueryFilterEngine::run(users::Entity::find(), &user_filters().unwrap(), &params);
        assert_eq!(
            result.err(),
            Some(FilterError::UnresolvedColumn("password".to_string()))
        );

        let params = RequestParams::new().with("sort", "users.password");
        let result = QueryFilterEngine::run(roles::Entity::find(), &role_filters().unwrap(), &params);
        assert_eq!(
            result.err(),
            Some(FilterError::UnresolvedColumn("users.password".to_string()))
        );
    }

    #[test]
    fn test_malformed_sort_value_is_not_a_configuration_error() {
        let specs = vec![FilterSpec::Order(OrderSpec::default())];
        let params = RequestParams::new().with("sort", "roles.name.x");

        let result = QueryFilterEngine::run(users::Entity::find(), &specs, &params);

        assert_eq!(
            result.err(),
            Some(FilterError::UnresolvedColumn("roles.name.x".to_string()))
        );
    }

    #[test]
    fn test_listing_filters_compile_for_their_entities() {
        let params = RequestParams::new()
            .with("query", "edit")
            .with("sort", "email");
        let sql = users_sql(&user_filters().unwrap(), &params);
        assert!(sql.contains(r#"LOWER("users"."email") LIKE '%edit%'"#), "{sql}");
        assert!(sql.ends_with(r#"ORDER BY "users"."email" DESC"#), "{sql}");

        let params = RequestParams::new().with("query", "manage");
        let sql = QueryFilterEngine::run(roles::Entity::find(), &role_filters().unwrap(), &params)
            .unwrap()
            .build(DbBackend::Postgres)
            .to_string();
        assert!(
            sql.contains(
                r#""roles"."id" IN (SELECT "role_permissions"."role_id" FROM "role_permissions""#
            ),
            "{sql}"
        );
        assert!(
            sql.contains(r#"LOWER("permissions"."name") LIKE '%manage%'"#),
            "{sql}"
        );
        assert!(sql.ends_with(r#"ORDER BY "roles"."name" ASC"#), "{sql}");
    }
}
