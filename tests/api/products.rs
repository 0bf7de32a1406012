use crate::helpers::{PRODUCT_ID, TOKEN, product_row, spawn_mock_api, step};
use inventory_smoke::suite::UPDATED_QUANTITY;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, Request, ResponseTemplate};

struct NewProductBodyMatcher;
impl wiremock::Match for NewProductBodyMatcher {
    fn matches(&self, request: &Request) -> bool {
        let result: Result<serde_json::Value, _> = serde_json::from_slice(&request.body);
        let Ok(body) = result else {
            return false;
        };
        let sku = body["sku"].as_str().unwrap_or_default();
        body["name"] == "Gaming Mouse"
            && body["type"] == "Electronics"
            && body["quantity"] == 50
            && body["price"] == 79.99
            && body["image_url"].is_string()
            && body["description"].is_string()
            && sku.strip_prefix("GM-").is_some_and(|suffix| {
                suffix.len() == 6 && suffix.chars().all(|c| c.is_ascii_uppercase())
            })
    }
}

#[tokio::test]
async fn add_product_sends_the_gaming_mouse_payload_with_bearer_auth() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(3).await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(bearer_token(TOKEN))
        .and(NewProductBodyMatcher)
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "product_id": 7 })),
        )
        .expect(1)
        .mount(&api.server)
        .await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(step(&report, "Add Product").is_passed());
}

#[tokio::test]
async fn a_created_product_without_an_id_aborts_the_terminal_checks() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(3).await;
    api.mount_add_product(
        ResponseTemplate::new(201).set_body_json(serde_json::json!({ "msg": "ok" })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api.server)
        .await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(report.was_aborted());
    assert_eq!(report.steps().len(), 3);
    assert!(!step(&report, "Add Product").is_passed());
    let rendered = report.to_string();
    assert!(rendered.contains("Product creation failed. Aborting further tests."));
}

#[tokio::test]
async fn the_returned_product_id_is_reused_in_the_quantity_url() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(4).await;
    // `mount_happy_add_product` hands out PRODUCT_ID; the PUT must target it.
    Mock::given(method("PUT"))
        .and(path(format!("/api/products/{PRODUCT_ID}/quantity")))
        .and(body_partial_json(
            serde_json::json!({ "quantity": UPDATED_QUANTITY }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_row(UPDATED_QUANTITY)))
        .expect(1)
        .mount(&api.server)
        .await;
    api.mount_happy_product_listing().await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(step(&report, "Update Quantity").is_passed());
}

#[tokio::test]
async fn update_quantity_fails_when_the_echoed_quantity_mismatches() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(4).await;
    api.mount_update_quantity(
        ResponseTemplate::new(200).set_body_json(product_row(UPDATED_QUANTITY + 1)),
    )
    .await;
    api.mount_happy_product_listing().await;

    // Act
    let report = api.run_suite().await;

    // Assert - a terminal-check failure is reported but does not abort.
    assert!(!report.was_aborted());
    assert_eq!(report.steps().len(), 5);
    assert!(!step(&report, "Update Quantity").is_passed());
    assert!(step(&report, "Get Products").is_passed());
}

#[tokio::test]
async fn a_non_200_update_still_runs_the_listing_check() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(4).await;
    api.mount_update_quantity(ResponseTemplate::new(404).set_body_json(
        serde_json::json!({ "msg": "Product not found" }),
    ))
    .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(bearer_token(TOKEN))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([product_row(50)])),
        )
        .expect(1)
        .mount(&api.server)
        .await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(!report.was_aborted());
    assert!(!step(&report, "Update Quantity").is_passed());
    // The listing still shows the pre-update quantity, so it fails too.
    assert!(!step(&report, "Get Products").is_passed());
    assert!(report.to_string().contains("Expected: Quantity to be 125, Got: Got 50"));
}

#[tokio::test]
async fn get_products_fails_when_the_gaming_mouse_is_missing() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(5).await;
    let mut other = product_row(UPDATED_QUANTITY);
    other["name"] = serde_json::json!("Mechanical Keyboard");
    api.mount_product_listing(ResponseTemplate::new(200).set_body_json(serde_json::json!([other])))
        .await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(!step(&report, "Get Products").is_passed());
    assert!(report.to_string().contains("Product 'Gaming Mouse' to be in the list"));
}

#[tokio::test]
async fn get_products_fails_when_the_body_is_not_a_list() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(5).await;
    api.mount_product_listing(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "products": [product_row(UPDATED_QUANTITY)]
    })))
    .await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(!step(&report, "Get Products").is_passed());
}

#[tokio::test]
async fn get_products_passes_when_the_listing_matches() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_happy_path_before(5).await;
    api.mount_happy_product_listing().await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(step(&report, "Get Products").is_passed());
    assert!(report.all_passed());
}
