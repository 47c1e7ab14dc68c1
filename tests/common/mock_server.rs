//! Mock deployed application for probe tests.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use deploycheck::models::Target;

/// Wrapper around wiremock MockServer playing the role of the deployed
/// web application under verification.
pub struct MockEndpoint {
    pub server: MockServer,
}

impl MockEndpoint {
    /// Start a new mock application server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Probe target for a specific path
    pub fn target_for(&self, path: &str) -> Target {
        Target::parse(&self.url_for(path)).expect("Mock server URL should parse")
    }

    /// Port the mock server is listening on
    pub fn port(&self) -> u16 {
        self.target_for("/").port()
    }

    /// Serve a plain-text body with status 200 at the given path
    pub async fn mock_get_text(&self, endpoint: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve a plain-text body with status 200, and assert exactly
    /// `expected_requests` GETs arrive over the test's lifetime
    pub async fn mock_get_text_expect(&self, endpoint: &str, body: &str, expected_requests: u64) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/plain"),
            )
            .expect(expected_requests)
            .mount(&self.server)
            .await;
    }

    /// Serve an arbitrary status code with the given body
    pub async fn mock_status(&self, endpoint: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Fail with `status` for the first `failures` requests, then serve
    /// 200 with `body`. Mount order matters: wiremock picks the first
    /// matching mock, and `up_to_n_times` stops matching once spent.
    pub async fn mock_flaky(&self, endpoint: &str, failures: u64, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string("starting up"))
            .up_to_n_times(failures)
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer with a redirect to the given location
    pub async fn mock_redirect(&self, endpoint: &str, location: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(302).insert_header("location", location))
            .mount(&self.server)
            .await;
    }
}
