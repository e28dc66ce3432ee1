mod common;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{Value, json};

use canteen_api::{
    db::{Gateway, GatewayResult, Row, RunOutcome, SeaGateway},
    pipeline::{Param, Params},
    resources::{menu, menu_item},
};
use common::{app_with, call, sqlite_gateway, test_app};

fn soup() -> Value {
    json!({ "menuItem": { "name": "Soup", "description": "Tomato", "inventory": 10, "price": 5 } })
}

#[tokio::test]
async fn lunch_menu_lifecycle() {
    let (app, _dir) = test_app().await;

    let (status, body) = call(&app, "POST", "/api/menus", Some(json!({ "menu": { "title": "Lunch" } }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "menu": { "id": 1, "title": "Lunch" } }));

    let (status, body) = call(&app, "POST", "/api/menus/1/menu-items", Some(soup())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "menuItem": {
                "id": 1,
                "name": "Soup",
                "description": "Tomato",
                "inventory": 10,
                "price": 5.0,
                "menuId": 1
            }
        })
    );

    let (status, body) = call(&app, "DELETE", "/api/menus/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("menu still has menu items"));

    let (_, menus) = call(&app, "GET", "/api/menus", None).await;
    assert_eq!(menus, json!({ "menus": [{ "id": 1, "title": "Lunch" }] }));

    let (status, _) = call(&app, "DELETE", "/api/menus/1/menu-items/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, "DELETE", "/api/menus/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, menus) = call(&app, "GET", "/api/menus", None).await;
    assert_eq!(menus, json!({ "menus": [] }));

    let (status, _) = call(&app, "GET", "/api/menus/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn menus_can_be_renamed() {
    let (app, _dir) = test_app().await;
    call(&app, "POST", "/api/menus", Some(json!({ "menu": { "title": "Lunch" } }))).await;

    let (status, body) = call(&app, "PUT", "/api/menus/1", Some(json!({ "menu": { "title": "Brunch" } }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "menu": { "id": 1, "title": "Brunch" } }));

    let (status, _) = call(&app, "PUT", "/api/menus/1", Some(json!({ "menu": { "title": "" } }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, "GET", "/api/menus/1", None).await;
    assert_eq!(body["menu"]["title"], json!("Brunch"));
}

#[tokio::test]
async fn menu_items_belong_to_one_menu() {
    let (app, _dir) = test_app().await;
    call(&app, "POST", "/api/menus", Some(json!({ "menu": { "title": "Lunch" } }))).await;
    call(&app, "POST", "/api/menus", Some(json!({ "menu": { "title": "Dinner" } }))).await;
    call(&app, "POST", "/api/menus/1/menu-items", Some(soup())).await;

    let (status, body) = call(&app, "GET", "/api/menus/1/menu-items/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["menuItem"]["menuId"], json!(1));

    let (status, _) = call(&app, "GET", "/api/menus/2/menu-items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", "/api/menus/2/menu-items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, items) = call(&app, "GET", "/api/menus/2/menu-items", None).await;
    assert_eq!(items, json!({ "menuItems": [] }));

    let (status, _) = call(&app, "POST", "/api/menus/3/menu-items", Some(soup())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        "PUT",
        "/api/menus/1/menu-items/1",
        Some(json!({
            "menuItem": { "name": "Soup", "description": "Pumpkin", "inventory": "4", "price": 6.5 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["menuItem"]["description"], json!("Pumpkin"));
    assert_eq!(body["menuItem"]["inventory"], json!(4));
    assert_eq!(body["menuItem"]["price"], json!(6.5));
}

#[tokio::test]
async fn incomplete_menu_items_are_not_stored() {
    let (app, _dir) = test_app().await;
    call(&app, "POST", "/api/menus", Some(json!({ "menu": { "title": "Lunch" } }))).await;

    for missing in ["name", "description", "inventory", "price"] {
        let mut item = soup();
        item["menuItem"]
            .as_object_mut()
            .expect("menuItem object")
            .remove(missing);
        let (status, _) = call(&app, "POST", "/api/menus/1/menu-items", Some(item)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{missing}");
    }

    let (_, items) = call(&app, "GET", "/api/menus/1/menu-items", None).await;
    assert_eq!(items, json!({ "menuItems": [] }));
}

/// Inserts a menu item for the menu being deleted right before the delete
/// statement runs, as a concurrent request could after the guard passed.
struct ItemArrivesBeforeDelete {
    inner: SeaGateway,
    fired: AtomicBool,
}

#[async_trait]
impl Gateway for ItemArrivesBeforeDelete {
    async fn get(&self, sql: &str, params: &Params) -> GatewayResult<Option<Row>> {
        self.inner.get(sql, params).await
    }

    async fn all(&self, sql: &str, params: &Params) -> GatewayResult<Vec<Row>> {
        self.inner.all(sql, params).await
    }

    async fn run(&self, sql: &str, params: &Params) -> GatewayResult<RunOutcome> {
        if sql == menu::sql::DELETE_IF_EMPTY && !self.fired.swap(true, Ordering::SeqCst) {
            let mut item = params.clone();
            item.insert("$name".to_string(), Param::from("Late soup"));
            item.insert("$description".to_string(), Param::from("Arrived late"));
            item.insert("$inventory".to_string(), Param::Int(1));
            item.insert("$price".to_string(), Param::Real(4.0));
            self.inner.run(menu_item::sql::INSERT, &item).await?;
        }
        self.inner.run(sql, params).await
    }
}

#[tokio::test]
async fn an_item_added_after_the_guard_still_blocks_the_delete() {
    let (inner, _dir) = sqlite_gateway().await;
    let app = app_with(Arc::new(ItemArrivesBeforeDelete {
        inner,
        fired: AtomicBool::new(false),
    }));
    call(&app, "POST", "/api/menus", Some(json!({ "menu": { "title": "Lunch" } }))).await;

    let (status, body) = call(&app, "DELETE", "/api/menus/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("menu still has menu items"));

    let (status, _) = call(&app, "GET", "/api/menus/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, items) = call(&app, "GET", "/api/menus/1/menu-items", None).await;
    assert_eq!(items["menuItems"][0]["name"], json!("Late soup"));
}

#[tokio::test]
async fn every_pooled_connection_enforces_foreign_keys() {
    let (gateway, _dir) = sqlite_gateway().await;
    let gateway = Arc::new(gateway);

    let orphan = Params::from([
        ("$name".to_string(), Param::from("Orphan")),
        ("$description".to_string(), Param::from("No menu")),
        ("$inventory".to_string(), Param::Int(1)),
        ("$price".to_string(), Param::Real(2.0)),
        ("$menuId".to_string(), Param::Int(99)),
    ]);
    let inserts: Vec<_> = (0..8)
        .map(|_| {
            let gateway = Arc::clone(&gateway);
            let orphan = orphan.clone();
            tokio::spawn(async move { gateway.run(menu_item::sql::INSERT, &orphan).await })
        })
        .collect();

    for insert in inserts {
        let outcome = insert.await.expect("insert task");
        assert!(outcome.is_err(), "orphan menu item was stored: {outcome:?}");
    }
    assert!(gateway.all(menu_item::sql::SELECT_FOR_MENU, &orphan).await.expect("list").is_empty());
}
