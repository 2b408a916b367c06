use anyhow::Result;
use httpmock::prelude::*;
use mu_sparql_helpers::core::headers::inbound_headers;
use mu_sparql_helpers::{update_modified, MuConfig, MuError, SparqlClient};
use std::time::Duration;

fn client_for(server: &MockServer) -> Result<SparqlClient> {
    let config = MuConfig {
        sparql_endpoint: server.url("/sparql"),
        sparql_updatepoint: server.url("/update"),
        ..MuConfig::default()
    };
    Ok(SparqlClient::new(&config)?)
}

/// 查詢時轉發 mu headers 並回傳 JSON 結果
#[tokio::test]
async fn test_query_forwards_mu_headers() -> Result<()> {
    let server = MockServer::start();
    let query_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sparql")
            .query_param_exists("query")
            .header("mu-session-id", "http://mu.semte.ch/sessions/abc")
            .header("mu-call-id", "7")
            .matches(|req| {
                !req.headers.as_ref().map_or(false, |h| {
                    h.iter().any(|(k, _)| k.eq_ignore_ascii_case("mu-auth-used-groups"))
                })
            })
            .matches(|req| {
                !req.headers.as_ref().map_or(false, |h| {
                    h.iter().any(|(k, _)| k.eq_ignore_ascii_case("x-rewrite-url"))
                })
            });
        then.status(200)
            .header("content-type", "application/sparql-results+json")
            .json_body(serde_json::json!({
                "head": {"vars": ["title"]},
                "results": {"bindings": [
                    {"title": {"type": "literal", "value": "Dune"}}
                ]}
            }));
    });

    let inbound = inbound_headers([
        ("MU-SESSION-ID", "http://mu.semte.ch/sessions/abc"),
        ("MU-CALL-ID", "7"),
        ("X-REWRITE-URL", "/books"),
    ])?;

    let client = client_for(&server)?;
    let results = client
        .query(
            "SELECT ?title WHERE { ?book <http://purl.org/dc/terms/title> ?title }",
            Some(&inbound),
        )
        .await?;

    query_mock.assert();
    assert_eq!(
        results["results"]["bindings"][0]["title"]["value"],
        serde_json::json!("Dune")
    );
    Ok(())
}

/// 上一次呼叫的 headers 不會殘留到下一次
#[tokio::test]
async fn test_headers_do_not_leak_between_calls() -> Result<()> {
    let server = MockServer::start();
    let with_session = server.mock(|when, then| {
        when.method(GET)
            .path("/sparql")
            .header("mu-session-id", "first");
        then.status(200).json_body(serde_json::json!({"boolean": true}));
    });
    let without_session = server.mock(|when, then| {
        when.method(GET)
            .path("/sparql")
            .matches(|req| {
                !req.headers.as_ref().map_or(false, |h| {
                    h.iter().any(|(k, _)| k.eq_ignore_ascii_case("mu-session-id"))
                })
            });
        then.status(200).json_body(serde_json::json!({"boolean": false}));
    });

    let client = client_for(&server)?;
    let first = inbound_headers([("MU-SESSION-ID", "first")])?;

    let answer = client.query("ASK { ?s ?p ?o }", Some(&first)).await?;
    assert_eq!(answer["boolean"], serde_json::json!(true));

    let answer = client.query("ASK { ?s ?p ?o }", None).await?;
    assert_eq!(answer["boolean"], serde_json::json!(false));

    with_session.assert_hits(1);
    without_session.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_update_posts_form_encoded_statement() -> Result<()> {
    let server = MockServer::start();
    let update_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/update")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("mu-auth-allowed-groups", "[]")
            .body_contains("update=")
            .body_contains("INSERT");
        then.status(200).json_body(serde_json::json!({}));
    });

    let client = client_for(&server)?;
    let inbound = inbound_headers([("MU-AUTH-ALLOWED-GROUPS", "[]")])?;
    let executed = client
        .update(
            "INSERT DATA { GRAPH <http://mu.semte.ch/application> { <http://ex.org/s> <http://ex.org/p> \"o\" } }",
            Some(&inbound),
        )
        .await?;

    assert!(executed);
    update_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_update_skips_non_update_statements() -> Result<()> {
    let server = MockServer::start();
    let update_mock = server.mock(|when, then| {
        when.path("/update");
        then.status(200);
    });

    let client = client_for(&server)?;
    let executed = client
        .update("SELECT * WHERE { ?s ?p ?o }", None)
        .await?;

    assert!(!executed);
    assert_eq!(update_mock.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_endpoint_errors_are_returned() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sparql");
        then.status(500).body("Virtuoso 37000 Error SP030: syntax error");
    });

    let client = client_for(&server)?;
    let result = client.query("SELECT WHERE", None).await;

    match result {
        Err(MuError::SparqlEndpoint { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("SP030"));
        }
        other => panic!("expected endpoint error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_applied() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sparql");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(serde_json::json!({"boolean": true}));
    });

    let client = SparqlClient::with_endpoints(
        &server.url("/sparql"),
        &server.url("/update"),
        Some(Duration::from_millis(200)),
    )?;
    let result = client.query("ASK { ?s ?p ?o }", None).await;

    assert!(matches!(result, Err(MuError::ApiError(ref e)) if e.is_timeout()));
    Ok(())
}

#[tokio::test]
async fn test_update_modified_runs_delete_and_insert() -> Result<()> {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(POST).path("/update").body_contains("DELETE");
        then.status(200);
    });
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/update").body_contains("INSERT");
        then.status(200);
    });

    let client = client_for(&server)?;
    update_modified(
        &client,
        "http://mu.semte.ch/application",
        "http://ex.org/books/1",
        None,
        None,
    )
    .await?;

    delete_mock.assert_hits(1);
    insert_mock.assert_hits(1);
    Ok(())
}
