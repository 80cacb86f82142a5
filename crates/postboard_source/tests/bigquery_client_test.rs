use postboard_error::SourceErrorKind;
use postboard_interface::{PostQuery, QueryExecutor};
use postboard_source::{BigQueryExecutor, QuerySourceAdapter};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TABLE: &str = "demo.facebook_data.posts";

fn query(limit: u64) -> PostQuery {
    PostQuery::builder()
        .table(TABLE)
        .order_by("created_time")
        .limit(limit)
        .build()
        .expect("query builds")
}

fn executor(server: &MockServer) -> BigQueryExecutor {
    BigQueryExecutor::new("demo", "test-token").with_base_url(server.uri())
}

fn schema() -> Value {
    json!({
        "fields": [
            {"name": "id", "type": "STRING", "mode": "NULLABLE"},
            {"name": "created_time", "type": "TIMESTAMP", "mode": "NULLABLE"},
            {"name": "caption", "type": "STRING", "mode": "NULLABLE"},
            {"name": "media_type", "type": "STRING", "mode": "NULLABLE"},
            {"name": "source", "type": "STRING", "mode": "NULLABLE"},
            {"name": "reach", "type": "INTEGER", "mode": "NULLABLE"},
            {"name": "like_count", "type": "INTEGER", "mode": "NULLABLE"},
            {"name": "comments_count", "type": "INTEGER", "mode": "NULLABLE"},
            {"name": "saved", "type": "INTEGER", "mode": "NULLABLE"}
        ]
    })
}

fn row(id: &str, reach: &str) -> Value {
    json!({"f": [
        {"v": id},
        {"v": "1.7152704E9"},
        {"v": "Fish fry"},
        {"v": "IMAGE"},
        {"v": "https://cdn.example.com/a.jpg"},
        {"v": reach},
        {"v": "12"},
        {"v": "3"},
        {"v": null}
    ]})
}

fn job_reference() -> Value {
    json!({"projectId": "demo", "jobId": "job_1", "location": "US"})
}

fn error_body(code: u16, message: &str, status: &str) -> Value {
    json!({"error": {"code": code, "message": message, "status": status}})
}

#[tokio::test]
async fn decodes_completed_query() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/demo/queries"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "query": format!("SELECT * FROM `{}` ORDER BY created_time DESC LIMIT 10", TABLE),
            "useLegacySql": false,
            "maxResults": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema": schema(),
            "jobReference": job_reference(),
            "rows": [row("p1", "120"), row("p2", "80")],
            "jobComplete": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = executor(&server).execute(&query(10)).await?;

    assert_eq!(result.rows().len(), 2);
    assert_eq!(result.rows()[0]["id"], json!("p1"));
    assert_eq!(result.rows()[0]["reach"], json!(120));
    assert_eq!(result.rows()[0]["saved"], Value::Null);
    assert!(result.has_column("comments_count"));
    Ok(())
}

#[tokio::test]
async fn polls_until_job_completes() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/demo/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobReference": job_reference(),
            "jobComplete": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/demo/queries/job_1"))
        .and(query_param("location", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema": schema(),
            "jobReference": job_reference(),
            "rows": [row("p1", "5")],
            "jobComplete": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = executor(&server).execute(&query(10)).await?;

    assert_eq!(result.rows().len(), 1);
    Ok(())
}

#[tokio::test]
async fn follows_page_tokens_up_to_row_cap() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/demo/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema": schema(),
            "jobReference": job_reference(),
            "rows": [row("p1", "1"), row("p2", "2")],
            "pageToken": "page_2",
            "jobComplete": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/demo/queries/job_1"))
        .and(query_param("pageToken", "page_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobReference": job_reference(),
            "rows": [row("p3", "3"), row("p4", "4")],
            "pageToken": "page_3",
            "jobComplete": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = executor(&server).execute(&query(3)).await?;

    let ids: Vec<_> = result.rows().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!("p1"), json!("p2"), json!("p3")]);
    Ok(())
}

#[tokio::test]
async fn access_denied_is_query_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_body(
            403,
            "Access Denied: Table demo:facebook_data.posts",
            "PERMISSION_DENIED",
        )))
        .mount(&server)
        .await;

    let err = executor(&server).execute(&query(10)).await.unwrap_err();

    match &err.kind {
        SourceErrorKind::QueryRejected { query, reason } => {
            assert_eq!(query, TABLE);
            assert!(reason.contains("Access Denied"));
        }
        other => panic!("expected rejection, got {}", other),
    }
}

#[tokio::test]
async fn expired_token_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(
            401,
            "Request had invalid authentication credentials.",
            "UNAUTHENTICATED",
        )))
        .mount(&server)
        .await;

    let err = executor(&server).execute(&query(10)).await.unwrap_err();

    assert!(matches!(err.kind, SourceErrorKind::Unavailable { .. }));
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend down"))
        .mount(&server)
        .await;

    let err = executor(&server).execute(&query(10)).await.unwrap_err();

    match &err.kind {
        SourceErrorKind::Unavailable { reason, .. } => assert!(reason.contains("backend down")),
        other => panic!("expected unavailable, got {}", other),
    }
}

#[tokio::test]
async fn unreachable_store_is_unavailable() {
    let executor = BigQueryExecutor::new("demo", "test-token").with_base_url("http://127.0.0.1:9");
    let err = executor.execute(&query(10)).await.unwrap_err();
    assert!(matches!(err.kind, SourceErrorKind::Unavailable { .. }));
}

#[tokio::test]
async fn adapter_reports_missing_columns_from_live_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema": {"fields": [{"name": "id", "type": "STRING"}]},
            "jobReference": job_reference(),
            "rows": [{"f": [{"v": "p1"}]}],
            "jobComplete": true
        })))
        .mount(&server)
        .await;

    let err = QuerySourceAdapter::new(query(10))
        .fetch(&executor(&server))
        .await
        .unwrap_err();

    match err.kind {
        SourceErrorKind::SchemaMismatch { missing, .. } => {
            assert_eq!(missing.len(), 8);
            assert!(missing.contains(&"reach".to_string()));
        }
        other => panic!("expected schema mismatch, got {}", other),
    }
}
