use crate::helpers::{MockApi, spawn_mock_api, step};
use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, ResponseTemplate};

struct RegistrationBodyMatcher;
impl wiremock::Match for RegistrationBodyMatcher {
    fn matches(&self, request: &Request) -> bool {
        let result: Result<serde_json::Value, _> = serde_json::from_slice(&request.body);
        let Ok(body) = result else {
            return false;
        };
        let username = body["username"].as_str().unwrap_or_default();
        // A fresh identity per run: fixed prefix, eight random lowercase letters.
        username.strip_prefix("testuser_").is_some_and(|suffix| {
            suffix.len() == 8 && suffix.chars().all(|c| c.is_ascii_lowercase())
        }) && body["password"] == "password123"
    }
}

#[tokio::test]
async fn registration_passes_on_201_created() {
    // Arrange
    let api = spawn_mock_api().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(RegistrationBodyMatcher)
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&api.server)
        .await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(step(&report, "User Registration").is_passed());
}

#[tokio::test]
async fn registration_passes_on_400_already_exists() {
    // Arrange - the server reports duplicates with a 400, which the suite
    // deliberately accepts as a pass.
    let api = spawn_mock_api().await;
    api.mount_register(400).await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(step(&report, "User Registration").is_passed());
}

#[tokio::test]
async fn registration_failure_aborts_the_run() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_register(500).await;
    // Nothing beyond registration may be called.
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api.server)
        .await;

    // Act
    let report = api.run_suite().await;

    // Assert
    assert!(report.was_aborted());
    assert_eq!(report.steps().len(), 1);
    assert!(!step(&report, "User Registration").is_passed());
    let rendered = report.to_string();
    assert!(rendered.contains("Registration failed. Aborting tests."));
    assert!(rendered.contains("Expected: 201 (Created) or 400 (Conflict), Got: 500"));
}

#[tokio::test]
async fn an_unreachable_server_is_a_reported_failure_not_a_crash() {
    // Arrange - tear the server down so the request fails in transit.
    let MockApi { server, client } = spawn_mock_api().await;
    drop(server);

    // Act
    let report = inventory_smoke::suite::run(&client).await;

    // Assert
    assert!(report.was_aborted());
    assert!(!step(&report, "User Registration").is_passed());
}
