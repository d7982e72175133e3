//! Mock-server helpers for exercising business commands end to end.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.set_session("test_token");
//! test_ctx.mock_page("projects", 1, 10, sample_page(...)).await;
//!
//! request_fetch(&mut test_ctx.ctx, EntityKind::Projects);
//! test_ctx.flush_and_wait().await;
//! ```

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::time::Duration;

use console_states::StateCtx;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::AUTHENTICATE_PATH;
use crate::{BusinessConfig, Session, install};

pub const TEST_TOKEN: &str = "test_token";

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let mut ctx = StateCtx::new();
        install(
            &mut ctx,
            BusinessConfig::new(mock_server.uri()),
            Session::default(),
        );
        Self { mock_server, ctx }
    }

    pub fn set_session(&mut self, token: &str) {
        self.ctx
            .state_mut::<Session>()
            .sign_in(token.to_owned(), Some("refresh".to_owned()), true);
    }

    /// Flush queued commands and await every spawned task, applying updates
    /// as they land.
    pub async fn flush_and_wait(&mut self) {
        let settle = self.ctx.settle();
        if tokio::time::timeout(Duration::from_secs(5), settle)
            .await
            .is_err()
        {
            panic!("Timed out waiting for pending commands");
        }
    }

    /// Answer `GET /api/v1/{service}?page={page}&size={size}` with a success
    /// envelope around `data`.
    pub async fn mock_page(&self, service: &str, page: u32, size: u32, data: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{service}")))
            .and(query_param("page", page.to_string()))
            .and(query_param("size", size.to_string()))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Fetched",
                "data": data
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_service_status(&self, service: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{service}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_login(&self, username: &str, password: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(AUTHENTICATE_PATH))
            .and(body_json(json!({"userName": username, "password": password})))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }
}

/// Spring-style page payload.
pub fn sample_page(
    content: Vec<Value>,
    page_number: u32,
    page_size: u32,
    total_elements: u64,
) -> Value {
    let total_pages = total_elements.div_ceil(u64::from(page_size.max(1)));
    let last_page = total_pages.saturating_sub(1);
    let number_of_elements = content.len();
    let empty = content.is_empty();
    json!({
        "content": content,
        "pageable": {
            "pageNumber": page_number,
            "pageSize": page_size,
            "offset": u64::from(page_number) * u64::from(page_size),
            "paged": true,
            "unpaged": false
        },
        "totalElements": total_elements,
        "totalPages": total_pages,
        "first": page_number == 0,
        "last": u64::from(page_number) >= last_page,
        "numberOfElements": number_of_elements,
        "empty": empty
    })
}

pub fn sample_project(id: u64) -> Value {
    json!({
        "projectId": id,
        "projectName": format!("Project {id}"),
        "startDate": "2024-01-01",
        "endDate": null,
        "departmentId": 3
    })
}
