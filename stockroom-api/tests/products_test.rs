/// Integration tests for the product endpoints
///
/// Products always hang off a category, so each test creates its own
/// category through the API first.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{multipart_body, multipart_content_type, unique_name, TestContext};
use tower::Service as _;

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn multipart_post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap()
}

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// Creates a category through the API and returns its ID
async fn create_category(ctx: &mut TestContext) -> i64 {
    let name = unique_name("category");
    let response = ctx
        .app
        .call(multipart_post(
            "/categories",
            multipart_body(&[("name", &name)], None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_product_with_dangling_category_is_rejected() {
    let mut ctx = TestContext::new().await.unwrap();
    let name = unique_name("orphan");

    let body = multipart_body(
        &[
            ("name", &name),
            ("price", "10.00"),
            ("category_id", "999999999"),
        ],
        None,
    );
    let response = ctx.app.call(multipart_post("/products", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error = response_json(response).await;
    assert_eq!(error["details"][0]["field"], "category_id");

    // Nothing was persisted
    let request = Request::builder()
        .method("GET")
        .uri("/products")
        .body(Body::empty())
        .unwrap();
    let list = response_json(ctx.app.call(request).await.unwrap()).await;
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["name"] != name.as_str()));
}

#[tokio::test]
async fn test_create_product_defaults_stock_to_zero() {
    let mut ctx = TestContext::new().await.unwrap();
    let category_id = create_category(&mut ctx).await;
    let name = unique_name("paperback");

    let body = multipart_body(
        &[
            ("name", &name),
            ("price", "10.50"),
            ("category_id", &category_id.to_string()),
        ],
        None,
    );
    let response = ctx.app.call(multipart_post("/products", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["name"], name.as_str());
    assert_eq!(created["price"], "10.50");
    assert_eq!(created["stock"], 0);
    assert_eq!(created["category_id"], category_id);
    assert!(created["image"].is_null());
}

#[tokio::test]
async fn test_create_product_requires_price() {
    let mut ctx = TestContext::new().await.unwrap();
    let category_id = create_category(&mut ctx).await;

    let body = multipart_body(
        &[
            ("name", "no price"),
            ("category_id", &category_id.to_string()),
        ],
        None,
    );
    let response = ctx.app.call(multipart_post("/products", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error = response_json(response).await;
    assert_eq!(error["details"][0]["field"], "price");
}

#[tokio::test]
async fn test_create_product_rejects_negative_price() {
    let mut ctx = TestContext::new().await.unwrap();
    let category_id = create_category(&mut ctx).await;

    let body = multipart_body(
        &[
            ("name", "below zero"),
            ("price", "-1.00"),
            ("category_id", &category_id.to_string()),
        ],
        None,
    );
    let response = ctx.app.call(multipart_post("/products", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_partial_update_keeps_omitted_fields() {
    let mut ctx = TestContext::new().await.unwrap();
    let category_id = create_category(&mut ctx).await;
    let name = unique_name("gadget");

    let body = multipart_body(
        &[
            ("name", &name),
            ("price", "20.00"),
            ("description", "first edition"),
            ("stock", "4"),
            ("category_id", &category_id.to_string()),
        ],
        None,
    );
    let created = response_json(ctx.app.call(multipart_post("/products", body)).await.unwrap()).await;
    let id = created["id"].as_i64().unwrap();

    // Only the price changes; everything else keeps its stored value
    let body = multipart_body(&[("_method", "PUT"), ("price", "25.00")], None);
    let response = ctx
        .app
        .call(multipart_post(&format!("/products/{}", id), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["price"], "25.00");
    assert_eq!(updated["name"], name.as_str());
    assert_eq!(updated["description"], "first edition");
    assert_eq!(updated["stock"], 4);
    assert_eq!(updated["category_id"], category_id);
}

#[tokio::test]
async fn test_update_product_replaces_image_file() {
    let mut ctx = TestContext::new().await.unwrap();
    let category_id = create_category(&mut ctx).await;
    let name = unique_name("camera");

    let body = multipart_body(
        &[
            ("name", &name),
            ("price", "99.00"),
            ("category_id", &category_id.to_string()),
        ],
        Some(("image", "old.png", "image/png", PNG_BYTES)),
    );
    let created = response_json(ctx.app.call(multipart_post("/products", body)).await.unwrap()).await;
    let id = created["id"].as_i64().unwrap();
    let old_path = created["image"].as_str().unwrap().to_string();
    assert!(old_path.starts_with("products/"));
    assert!(ctx.file_exists(&old_path));

    let body = multipart_body(
        &[("_method", "PUT")],
        Some(("image", "new.png", "image/png", PNG_BYTES)),
    );
    let response = ctx
        .app
        .call(multipart_post(&format!("/products/{}", id), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    let new_path = updated["image"].as_str().unwrap().to_string();

    assert_ne!(new_path, old_path);
    assert!(!ctx.file_exists(&old_path));
    assert!(ctx.file_exists(&new_path));
}

#[tokio::test]
async fn test_delete_product_removes_row_and_image_file() {
    let mut ctx = TestContext::new().await.unwrap();
    let category_id = create_category(&mut ctx).await;
    let name = unique_name("discontinued");

    let body = multipart_body(
        &[
            ("name", &name),
            ("price", "5.00"),
            ("category_id", &category_id.to_string()),
        ],
        Some(("image", "shot.png", "image/png", PNG_BYTES)),
    );
    let created = response_json(ctx.app.call(multipart_post("/products", body)).await.unwrap()).await;
    let id = created["id"].as_i64().unwrap();
    let stored = created["image"].as_str().unwrap().to_string();
    assert!(ctx.file_exists(&stored));

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/products/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(!ctx.file_exists(&stored), "image file is removed");

    let request = Request::builder()
        .method("GET")
        .uri(format!("/products/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_category_cascades_to_products() {
    let mut ctx = TestContext::new().await.unwrap();
    let category_id = create_category(&mut ctx).await;
    let name = unique_name("cascaded");

    let body = multipart_body(
        &[
            ("name", &name),
            ("price", "1.00"),
            ("category_id", &category_id.to_string()),
        ],
        None,
    );
    let created = response_json(ctx.app.call(multipart_post("/products", body)).await.unwrap()).await;
    let product_id = created["id"].as_i64().unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/categories/{}", category_id))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/products/{}", product_id))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
