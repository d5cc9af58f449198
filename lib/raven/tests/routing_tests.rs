//! Caller-supplied names stay inside their path segment.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use raven::{
    ConnectionSettings, HttpClient, HttpTransport, Method, RavenClient, Request, Response, Result,
    SaveAttachment,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Records every request URL and answers with a fixed status.
#[derive(Debug, Clone)]
struct RecordingClient {
    requests: Arc<Mutex<Vec<(Method, String)>>>,
    status: u16,
}

impl RecordingClient {
    fn answering(status: u16) -> Self {
        Self {
            requests: Arc::default(),
            status,
        }
    }

    fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("lock")
            .iter()
            .map(|(_, url)| url.clone())
            .collect()
    }
}

impl HttpClient for RecordingClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.requests
            .lock()
            .expect("lock")
            .push((request.method(), request.url().to_string()));
        Ok(Response::new(self.status, Default::default(), Bytes::new()))
    }
}

fn client(recorder: &RecordingClient) -> RavenClient<RecordingClient> {
    let settings = ConnectionSettings::new("http://localhost:8080")
        .expect("settings")
        .with_database("Northwind");
    RavenClient::new(recorder.clone(), settings)
}

#[tokio::test]
async fn test_attachment_key_cannot_escape_static() {
    let recorder = RecordingClient::answering(204);
    let attachments = client(&recorder).attachments();

    for key in [
        "../../../docs/Raven/Databases/Northwind",
        "images/../../docs/x",
        "./logo.png",
        "images//logo.png",
    ] {
        let err = attachments.remove(key).await.expect_err("expected validation error");
        assert!(err.is_validation(), "Expected validation error for {key}, got: {err}");
    }

    assert!(recorder.urls().is_empty());
}

#[tokio::test]
async fn test_attachment_key_characters_are_escaped() {
    let recorder = RecordingClient::answering(204);
    let attachments = client(&recorder).attachments();

    attachments.remove("report#1.pdf").await.expect("fragment char");
    attachments.remove("a?b").await.expect("query char");
    attachments.remove("images/50% off.png").await.expect("nested key");

    assert_eq!(recorder.urls(), vec![
        "http://localhost:8080/databases/Northwind/static/report%231.pdf",
        "http://localhost:8080/databases/Northwind/static/a%3Fb",
        "http://localhost:8080/databases/Northwind/static/images/50%25%20off.png",
    ]);
}

#[tokio::test]
async fn test_database_name_is_one_segment() {
    let recorder = RecordingClient::answering(204);
    let databases = client(&recorder).databases();

    databases.remove("foo?x=1").await.expect("remove");
    databases.remove("tenants/foo").await.expect("remove");
    let err = databases.remove("..").await.expect_err("expected validation error");
    assert!(err.is_validation());

    assert_eq!(recorder.urls(), vec![
        "http://localhost:8080/docs/Raven/Databases/foo%3Fx=1",
        "http://localhost:8080/docs/Raven/Databases/tenants%2Ffoo",
    ]);
}

#[tokio::test]
async fn test_selected_database_is_escaped() {
    let recorder = RecordingClient::answering(204);
    let client = client(&recorder).with_database("North#wind");

    client.attachments().remove("logo.png").await.expect("remove");
    let err = client
        .with_database("..")
        .attachments()
        .remove("logo.png")
        .await
        .expect_err("expected validation error");
    assert!(err.is_validation());

    assert_eq!(recorder.urls(), vec![
        "http://localhost:8080/databases/North%23wind/static/logo.png",
    ]);
}

#[tokio::test]
async fn test_index_and_collection_are_escaped() {
    let recorder = RecordingClient::answering(200);
    let client = client(&recorder);

    let _ = client
        .query_index("Orders/By Total")
        .results::<serde_json::Value>()
        .await;
    let _ = client
        .query()
        .collection("Users?x")
        .expect("collection")
        .results::<serde_json::Value>()
        .await;
    let err = client
        .query_index("../../docs/Raven/Databases/Northwind")
        .results::<serde_json::Value>()
        .await
        .expect_err("expected validation error");
    assert!(err.is_validation());

    assert_eq!(recorder.urls(), vec![
        "http://localhost:8080/databases/Northwind/indexes/Orders/By%20Total",
        "http://localhost:8080/databases/Northwind/indexes/dynamic/Users%3Fx",
    ]);
}

#[tokio::test]
async fn test_escaped_key_reaches_the_server_whole() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/databases/Northwind/static/report%231.pdf"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = ConnectionSettings::new(mock_server.uri())
        .expect("settings")
        .with_database("Northwind");
    RavenClient::new(HttpTransport::new(), settings)
        .attachments()
        .save("report#1.pdf", SaveAttachment::new(&b"%PDF"[..]))
        .await
        .expect("save");
}
