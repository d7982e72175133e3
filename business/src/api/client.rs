use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use super::envelope::{AuthTokens, PageData, decode_as, decode_data};
use crate::{ApiError, ApiResult};
use crate::http::{Client, RequestBuilder};
use crate::session::Session;

pub const AUTHENTICATE_PATH: &str = "/api/v1/authenticates/authenticate";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    user_name: &'a str,
    password: &'a str,
}

/// Backend client bound to one base URL and one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            session,
        }
    }

    /// `{base}/api/v1/{service}{sub_path}`.
    pub fn service_url(&self, service: &str, sub_path: Option<&str>) -> String {
        format!(
            "{}/api/v1/{service}{}",
            self.base_url,
            sub_path.unwrap_or_default()
        )
    }

    fn authorized(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        let token = self.session.bearer()?;
        Ok(request
            .bearer_auth(token)
            .header("accept", "application/json")
            .header("content-type", "application/json"))
    }

    /// GET a service and return the envelope's `data`.
    ///
    /// Without a sub-path the page parameters are sent as `page`/`size`
    /// (one-based page). A sub-path is appended verbatim and no paging
    /// parameters are added.
    pub async fn get_data(
        &self,
        service: &str,
        sub_path: Option<&str>,
        page: u32,
        size: u32,
    ) -> ApiResult<Value> {
        let mut request = Client::get(self.service_url(service, sub_path));
        if sub_path.is_none() {
            request = request.query("page", page).query("size", size);
        }
        let request = self.authorized(request)?;

        debug!("GET {}", request.url());
        let response = request.send().await?;
        debug!("GET {service} answered {}", response.status);
        decode_data(&response)
    }

    pub async fn fetch_page(&self, service: &str, page: u32, size: u32) -> ApiResult<PageData> {
        let data = self.get_data(service, None, page, size).await?;
        decode_as(data)
    }

    /// Exchange credentials for tokens. Needs no session.
    pub async fn authenticate(&self, user_name: &str, password: &str) -> ApiResult<AuthTokens> {
        let url = format!("{}{AUTHENTICATE_PATH}", self.base_url);
        let request = Client::post(url)
            .header("accept", "application/json")
            .json(&Credentials {
                user_name,
                password,
            })
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        info!("Authenticating user '{user_name}'");
        let response = request.send().await?;
        decode_as(decode_data(&response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> Session {
        let mut session = Session::default();
        session.sign_in("t".to_owned(), None, false);
        session
    }

    #[test]
    fn test_service_url() {
        let client = ApiClient::new("http://localhost:8080/", signed_in());
        assert_eq!(
            client.service_url("employees", None),
            "http://localhost:8080/api/v1/employees"
        );
        assert_eq!(
            client.service_url("employees", Some("/42")),
            "http://localhost:8080/api/v1/employees/42"
        );
    }

    #[test]
    fn test_relative_base_url() {
        let client = ApiClient::new("", signed_in());
        assert_eq!(client.service_url("projects", None), "/api/v1/projects");
    }
}
