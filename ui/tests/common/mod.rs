use console_business::Session;
use console_ui::ConsoleApp;
use console_ui::state::State;
use egui_kittest::Harness;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test_token";

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, ConsoleApp>,
}

impl<'a> TestCtx<'a> {
    /// The whole app, signed out.
    pub async fn new_app() -> Self {
        let mock_server = MockServer::start().await;
        let state = State::test(mock_server.uri());
        Self::with_state(mock_server, state)
    }

    /// The whole app with a restored session, so it opens on Home.
    #[allow(unused)]
    pub async fn new_signed_in_app() -> Self {
        let mock_server = MockServer::start().await;
        let mut session = Session::default();
        session.sign_in(TEST_TOKEN.to_owned(), Some("refresh".to_owned()), true);
        let state = State::new(
            console_business::BusinessConfig::new(mock_server.uri()),
            session,
        );
        Self::with_state(mock_server, state)
    }

    fn with_state(mock_server: MockServer, state: State) -> Self {
        let app = ConsoleApp::new(state);
        let harness = Harness::new_eframe(|_| app);
        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, ConsoleApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Render a frame, wait for every spawned command, then render again so
    /// the results are on screen.
    pub async fn step_and_settle(&mut self) {
        self.harness.step();
        self.harness.state_mut().state_mut().ctx.settle().await;
        self.harness.step();
    }

    #[allow(unused)]
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

    #[allow(unused)]
    pub async fn mock_service_status(&self, service: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{service}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    #[allow(unused)]
    pub async fn mock_login(&self, username: &str, password: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/v1/authenticates/authenticate"))
            .and(body_json(json!({"userName": username, "password": password})))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }
}

/// Spring-style page payload.
#[allow(unused)]
pub fn sample_page(content: Vec<Value>, page_number: u32, page_size: u32, total: u64) -> Value {
    let total_pages = total.div_ceil(u64::from(page_size.max(1)));
    let number_of_elements = content.len();
    let empty = content.is_empty();
    json!({
        "content": content,
        "pageable": {
            "pageNumber": page_number,
            "pageSize": page_size,
            "offset": u64::from(page_number) * u64::from(page_size)
        },
        "totalElements": total,
        "totalPages": total_pages,
        "first": page_number == 0,
        "last": u64::from(page_number) + 1 >= total_pages,
        "numberOfElements": number_of_elements,
        "empty": empty
    })
}

#[allow(unused)]
pub fn sample_employee(id: u64) -> Value {
    json!({
        "employeeId": id,
        "firstName": format!("First{id}"),
        "lastName": format!("Last{id}"),
        "dateOfBirth": "1990-01-01",
        "designation": "Engineer",
        "gender": "F",
        "hireDate": "2020-01-01",
        "jobStage": "L3",
        "salary": 1000 + id,
        "managerEmployeeId": null
    })
}
