//! Query execution against a mock server and a recording client.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use raven::{
    ConnectionSettings, HttpClient, HttpTransport, Method, QueryResult, RavenClient, Request,
    Response, Result,
};
use serde::Deserialize;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct User {
    name: String,
    age: u32,
}

/// Records every request and answers with a fixed response.
#[derive(Debug, Clone)]
struct RecordingClient {
    requests: Arc<Mutex<Vec<(Method, String)>>>,
    status: u16,
    body: Bytes,
}

impl RecordingClient {
    fn answering(status: u16, body: &'static [u8]) -> Self {
        Self {
            requests: Arc::default(),
            status,
            body: Bytes::from_static(body),
        }
    }

    fn requests(&self) -> Vec<(Method, String)> {
        self.requests.lock().expect("lock").clone()
    }
}

impl HttpClient for RecordingClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.requests
            .lock()
            .expect("lock")
            .push((request.method(), request.url().to_string()));
        Ok(Response::new(self.status, Default::default(), self.body.clone()))
    }
}

fn settings(uri: &str) -> ConnectionSettings {
    ConnectionSettings::new(uri)
        .expect("settings")
        .with_database("Northwind")
}

#[tokio::test]
async fn test_dynamic_query_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/Northwind/indexes/dynamic/Users"))
        .and(query_param("query", "Name:Ayende AND Age:30"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Results": [{"Name": "Ayende", "Age": 30}],
            "TotalResults": 1,
            "SkippedResults": 0,
            "IndexName": "Auto/Users/ByNameAndAge",
            "IsStale": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RavenClient::new(HttpTransport::new(), settings(&mock_server.uri()));
    let page: QueryResult<User> = client
        .query()
        .collection("Users")
        .expect("collection")
        .filter("Name", "Ayende")
        .and("Age", "30")
        .expect("and")
        .take(10)
        .results()
        .await
        .expect("results");

    assert_eq!(
        page.results,
        vec![User {
            name: "Ayende".to_string(),
            age: 30
        }]
    );
    assert_eq!(page.total_results, 1);
}

#[tokio::test]
async fn test_index_query_hits_index_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/Northwind/indexes/Users/ByName"))
        .and(query_param("sort", "-Name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RavenClient::new(HttpTransport::new(), settings(&mock_server.uri()));
    let page: QueryResult<User> = client
        .query_index("Users/ByName")
        .order_by_descending("Name")
        .results()
        .await
        .expect("results");

    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_unscoped_dynamic_query_sends_nothing() {
    let recorder = RecordingClient::answering(200, b"{}");
    let client = RavenClient::new(recorder.clone(), settings("http://localhost:8080"));

    let result = client.query().results::<serde_json::Value>().await;

    let err = result.expect_err("expected validation error");
    assert!(err.is_validation(), "Expected validation error, got: {err}");
    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn test_results_twice_repeats_the_same_request() {
    let recorder = RecordingClient::answering(200, br#"{"Results": []}"#);
    let client = RavenClient::new(recorder.clone(), settings("http://localhost:8080"));
    let query = client
        .query()
        .collection("Users")
        .expect("collection")
        .filter("Name", "Ayende")
        .skip(5)
        .take(5);

    let _: QueryResult<User> = query.results().await.expect("first");
    let _: QueryResult<User> = query.results().await.expect("second");

    let requests = recorder.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
    assert_eq!(requests[0].0, Method::Get);
    assert_eq!(
        requests[0].1,
        "http://localhost:8080/databases/Northwind/indexes/dynamic/Users?query=Name%3AAyende&start=5&pageSize=5"
    );
}

#[tokio::test]
async fn test_non_200_keeps_the_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/Northwind/indexes/Missing"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"Error": "index not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = RavenClient::new(HttpTransport::new(), settings(&mock_server.uri()));
    let result = client
        .query_index("Missing")
        .results::<serde_json::Value>()
        .await;

    let err = result.expect_err("expected HTTP error");
    assert_eq!(err.status(), Some(500));
    let body: serde_json::Value = err.decode_body().expect("body").expect("json");
    assert_eq!(body["Error"], "index not found");
}

#[tokio::test]
async fn test_404_is_an_error_for_queries() {
    let recorder = RecordingClient::answering(404, b"");
    let client = RavenClient::new(recorder, settings("http://localhost:8080"));

    let err = client
        .query_index("Users/ByName")
        .results::<serde_json::Value>()
        .await
        .expect_err("expected HTTP error");

    assert!(err.is_not_found());
}
