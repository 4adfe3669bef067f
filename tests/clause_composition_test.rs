//! Integration tests for configured resources
//!
//! Loads resource presets from TOML, builds WHERE and ORDER BY clauses from
//! them and turns the result into positional statements. No database needed.

use clausehaus::prelude::*;
use serde_json::json;

const CONFIG: &str = r#"
    [render]
    placeholder_start = 1
    nulls = "LAST"

    [resources.users]
    fields = [
        { alias = "age", sql = "u.age" },
        { alias = "status", sql = "u.status" },
        { alias = "tags", sql = "u.tags" },
        { alias = "email" },
    ]
    order = [
        { alias = "name", sql = "u.name" },
        { alias = "created", sql = "u.created_at", direction = "DESC" },
    ]
    default_order = ["created", "name"]

    [resources.orders]
    fields = [{ alias = "total", sql = "o.total" }]
    order = [{ alias = "total", sql = "o.total", direction = "DESC" }]
"#;

fn clausehaus() -> ClauseHaus {
    let config = AppConfig::from_toml_str(CONFIG).unwrap();
    ClauseHaus::from_config(&config).unwrap()
}

#[test]
fn test_resources_loaded_from_config() {
    let clausehaus = clausehaus();

    let mut names = clausehaus.list_resources();
    names.sort();
    assert_eq!(names, vec!["orders", "users"]);

    let users = clausehaus.resource("users").unwrap();
    assert_eq!(users.fields().get("age"), Some("u.age"));
    assert_eq!(users.fields().get("email"), Some("email"));
    assert_eq!(users.order().default_order(), &["created", "name"]);
}

#[test]
fn test_unknown_resource() {
    let clausehaus = clausehaus();

    let result = clausehaus.where_builder("invoices", Combinator::And);
    assert!(matches!(result, Err(ClauseHausError::ResourceNotFound(name)) if name == "invoices"));
}

#[test]
fn test_register_and_unregister_resource() {
    let mut clausehaus = ClauseHaus::new(RenderConfig::default());
    let fields = FieldRegistry::from_entries(vec![("id", "p.id")]).unwrap();

    clausehaus
        .register_resource("products".to_string(), ResourceClauses::new(fields.clone(), OrderingSpec::new()))
        .unwrap();
    let duplicate = clausehaus
        .register_resource("products".to_string(), ResourceClauses::new(fields, OrderingSpec::new()));
    assert!(matches!(duplicate, Err(ClauseHausError::ResourceAlreadyRegistered(_))));

    clausehaus.unregister_resource("products").unwrap();
    assert!(clausehaus.list_resources().is_empty());
    assert!(matches!(
        clausehaus.unregister_resource("products"),
        Err(ClauseHausError::ResourceNotFound(_))
    ));
}

#[test]
fn test_invalid_resource_reports_name() {
    let mut config = AppConfig::from_toml_str(CONFIG).unwrap();
    // Bypasses validate(): conflicting pair injected after parsing
    let users = config.resources.get_mut("users").unwrap();
    users.fields.push(toml_field("age", "p.age"));

    let result = ClauseHaus::from_config(&config);
    match result {
        Err(ClauseHausError::InvalidResource { resource, source }) => {
            assert_eq!(resource, "users");
            assert!(matches!(source, QueryClauseError::Conflict { .. }));
        }
        other => panic!("expected InvalidResource, got {:?}", other),
    }
}

fn toml_field(alias: &str, sql: &str) -> config::FieldConfig {
    config::FieldConfig {
        alias: alias.to_string(),
        sql: Some(sql.to_string()),
    }
}

#[test]
fn test_filter_and_order_to_statement() {
    let clausehaus = clausehaus();

    let mut filter = clausehaus.where_builder("users", Combinator::And).unwrap();
    filter.add_simple_condition("age", 21, Operator::Gte, None).unwrap();
    filter
        .add_simple_condition("tags", json!(["rust"]), Operator::Overlap, None)
        .unwrap();

    let mut status = clausehaus.where_builder("users", Combinator::Or).unwrap();
    status.eq("status", "active").unwrap();
    status.is_null("status").unwrap();
    filter.add_conditions(status).unwrap();

    let mut order = clausehaus.order_builder("users").unwrap();
    order.raise_conditions_in_order(["name"]).unwrap();

    let rendered = filter.render(clausehaus.render_config().placeholder_start);
    assert_eq!(
        rendered.sql,
        "u.age >= (:age1) AND u.tags && (:tags2) AND (u.status = (:status3) OR u.status IS NULL)"
    );

    let statement = PreparedStatement::select("SELECT u.* FROM users u", &rendered, &order.get_order_by()).unwrap();
    assert_eq!(
        statement.sql(),
        "SELECT u.* FROM users u WHERE u.age >= ($1) AND u.tags && ($2) \
         AND (u.status = ($3) OR u.status IS NULL) ORDER BY u.name ASC, u.created_at DESC NULLS LAST"
    );
    assert_eq!(
        statement.values(),
        &[json!(21), json!(["rust"]), json!("active")]
    );

    order.reset_order();
    assert_eq!(
        order.get_order_by(),
        "ORDER BY u.created_at DESC, u.name ASC NULLS LAST"
    );
}

#[test]
fn test_shared_cursor_across_clauses() {
    let clausehaus = clausehaus();

    let mut users = clausehaus.where_builder("users", Combinator::And).unwrap();
    users.between("age", 18, 65).unwrap();
    users.in_values("status", vec![json!("active"), json!("trial")]).unwrap();

    let mut orders = clausehaus.where_builder("orders", Combinator::And).unwrap();
    orders.add_simple_condition("total", 100, Operator::Gt, None).unwrap();

    let mut where_cursor = clausehaus.cursor();
    let mut params_cursor = clausehaus.cursor();

    let users_sql = users.get_where(&mut where_cursor);
    let users_params = users.get_bind_params(&mut params_cursor);
    let orders_sql = orders.get_where(&mut where_cursor);
    let orders_params = orders.get_bind_params(&mut params_cursor);

    assert_eq!(where_cursor, params_cursor);
    assert_eq!(
        users_sql,
        "u.age BETWEEN :age1_from AND :age1_to AND u.status IN ('active','trial')"
    );
    assert_eq!(orders_sql, "o.total > (:total3)");
    assert_eq!(
        users_params.keys().collect::<Vec<_>>(),
        vec!["age1_from", "age1_to"]
    );
    assert_eq!(orders_params.get("total3"), Some(&json!(100)));
}

#[test]
fn test_nulls_first_from_config() {
    let config = AppConfig::from_toml_str(
        r#"
        [render]
        nulls = "FIRST"

        [resources.users]
        order = [{ alias = "name" }]
        "#,
    )
    .unwrap();
    let clausehaus = ClauseHaus::from_config(&config).unwrap();

    let order = clausehaus.order_builder("users").unwrap();
    assert_eq!(order.get_order_by(), "ORDER BY name ASC NULLS FIRST");
}

#[test]
fn test_empty_resource_renders_identity() {
    let clausehaus = clausehaus();

    let filter = clausehaus.where_builder("orders", Combinator::Or).unwrap();
    let order = OrderingSpec::new();

    let statement = PreparedStatement::select("SELECT * FROM orders o", &filter.render(1), &order.get_order_by()).unwrap();
    assert_eq!(statement.sql(), "SELECT * FROM orders o WHERE false");
    assert!(statement.values().is_empty());
}
