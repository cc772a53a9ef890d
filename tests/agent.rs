use std::sync::Arc;

use tempfile::TempDir;

use product_agent::agents::instance::ProductAgent;
use product_agent::models::product::{ProductCreate, ProductUpdate};
use product_agent::seed;
use product_agent::store::sqlite::SqliteStore;
use product_agent::store::Catalog;

fn seeded_store() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = SqliteStore::open_at(dir.path().join("products.db")).expect("store");
    assert!(seed::seed_if_empty(&store).expect("seed"));
    (dir, store)
}

fn seeded_agent() -> (TempDir, ProductAgent) {
    let (dir, store) = seeded_store();
    let agent = ProductAgent::new(Arc::new(store)).expect("agent");
    (dir, agent)
}

#[test]
fn test_list_all_products() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Show all products");

    assert_eq!(result.tools_used, vec!["list_products"]);
    let products = result.response["products"].as_array().expect("products");
    assert_eq!(products.len(), 3);
    for product in products {
        for key in ["id", "name", "price", "category", "in_stock"] {
            assert!(product.get(key).is_some(), "missing key {key}");
        }
    }
}

#[test]
fn test_unmatched_query_falls_back_to_list() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("good morning");

    assert_eq!(result.tools_used, vec!["list_products"]);
    assert_eq!(result.response["products"].as_array().unwrap().len(), 3);
}

#[test]
fn test_category_filter_is_case_insensitive() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Show products in category electronics");

    assert_eq!(result.tools_used, vec!["list_products"]);
    let products = result.response["products"].as_array().expect("products");
    assert_eq!(products.len(), 2);
    for product in products {
        assert_eq!(product["category"], "Electronics");
    }
}

#[test]
fn test_bare_category_query() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("category Furniture");

    let products = result.response["products"].as_array().expect("products");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Desk");
}

#[test]
fn test_statistics() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Statistics for the catalog");

    assert_eq!(result.tools_used, vec!["get_statistics"]);
    let stats = &result.response["statistics"];
    assert_eq!(stats["total_count"], 3);
    assert_eq!(stats["average_price"], 31666.67);
    assert_eq!(stats["in_stock_count"], 2);
    assert_eq!(stats["categories"]["Electronics"], 2);
    assert_eq!(stats["categories"]["Furniture"], 1);
}

#[test]
fn test_get_product_by_id() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Show product ID 1");

    assert_eq!(result.tools_used, vec!["get_product"]);
    assert_eq!(result.response["product"]["name"], "Laptop");
    assert_eq!(result.response["product"]["price"], 50000.0);
}

#[test]
fn test_get_unknown_product_reports_error() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("product id 9999");

    // The tool still counts as used even though it failed.
    assert_eq!(result.tools_used, vec!["get_product"]);
    assert!(result.response.get("product").is_none());
    let error = result.response["error"].as_str().expect("error message");
    assert!(error.contains("9999"));
}

#[test]
fn test_discount_query() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Apply a 15% discount on product id 1");

    assert_eq!(result.tools_used, vec!["get_product", "calculate_discount"]);
    let discount = &result.response["discount"];
    assert_eq!(discount["original_price"], 50000.0);
    assert_eq!(discount["discount_percent"], 15.0);
    assert_eq!(discount["discount_amount"], 7500.0);
    assert_eq!(discount["final_price"], 42500.0);
    assert_eq!(discount["product_name"], "Laptop");
}

#[test]
fn test_discount_with_invalid_percent_is_soft_error() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Apply a 150% discount on product id 1");

    assert_eq!(result.tools_used, vec!["get_product", "calculate_discount"]);
    let discount = &result.response["discount"];
    assert!(discount["error"].as_str().is_some());
    assert!(discount.get("final_price").is_none());
}

#[test]
fn test_add_product_query_persists() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Add product: Mouse, price 1500, category Electronics");

    assert_eq!(result.tools_used, vec!["add_product"]);
    let added = &result.response["added_product"];
    assert_eq!(added["name"], "Mouse");
    assert_eq!(added["price"], 1500.0);
    assert_eq!(added["category"], "Electronics");
    assert_eq!(added["in_stock"], true);
    assert_eq!(added["id"], 4);

    let listed = agent.process("Show all products");
    assert_eq!(listed.response["products"].as_array().unwrap().len(), 4);
}

#[test]
fn test_add_product_out_of_stock_phrase() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Add product: Chair, price 2000, category Furniture, out of stock");

    let added = &result.response["added_product"];
    assert_eq!(added["name"], "Chair");
    assert_eq!(added["in_stock"], false);
}

#[test]
fn test_add_rule_beats_statistics_keywords() {
    let (_dir, agent) = seeded_agent();
    let result = agent.process("Add product: Statistics handbook, price 300, category Books");

    assert_eq!(result.tools_used, vec!["add_product"]);
    assert_eq!(result.response["added_product"]["name"], "Statistics handbook");
}

#[test]
fn test_read_only_query_is_idempotent() {
    let (_dir, agent) = seeded_agent();
    let first = agent.process("Show all products");
    let second = agent.process("Show all products");

    assert_eq!(first.response, second.response);
    assert_eq!(first.tools_used, second.tools_used);
}

#[test]
fn test_seeding_is_skipped_for_non_empty_store() {
    let (_dir, store) = seeded_store();
    assert!(!seed::seed_if_empty(&store).expect("second seed"));
    assert_eq!(store.list(None).expect("list").len(), 3);
}

#[test]
fn test_store_update_and_delete_round_trip() {
    let (_dir, store) = seeded_store();

    let created = store
        .create(ProductCreate {
            name: "Monitor".to_string(),
            price: 12000.0,
            category: "Electronics".to_string(),
            in_stock: true,
        })
        .expect("create");
    assert_eq!(created.id, 4);

    let updated = store
        .update(
            created.id,
            ProductUpdate {
                price: Some(9990.0),
                in_stock: Some(false),
                ..ProductUpdate::default()
            },
        )
        .expect("update")
        .expect("product exists");
    assert_eq!(updated.price, 9990.0);
    assert!(!updated.in_stock);
    assert_eq!(updated.name, "Monitor");

    assert!(store.delete(created.id).expect("delete"));
    assert!(!store.delete(created.id).expect("second delete"));
    assert!(store.get(created.id).expect("get").is_none());
}

#[test]
fn test_store_update_unknown_id_returns_none() {
    let (_dir, store) = seeded_store();
    let result = store
        .update(
            9999,
            ProductUpdate {
                price: Some(1.0),
                ..ProductUpdate::default()
            },
        )
        .expect("update");
    assert!(result.is_none());
}

#[test]
fn test_statistics_on_empty_store() {
    let dir = TempDir::new().expect("temp dir");
    let store = SqliteStore::open_at(dir.path().join("products.db")).expect("store");

    let stats = store.statistics().expect("statistics");
    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.average_price, 0.0);
    assert_eq!(stats.in_stock_count, 0);
    assert!(stats.categories.is_empty());
}
