use crate::core::headers::{apply_forwarded_headers, MuHeaderExt};
use crate::domain::model::QueryKind;
use crate::domain::ports::{ConfigProvider, TripleStore};
use crate::utils::error::{MuError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, Response};
use std::sync::OnceLock;
use std::time::Duration;

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json, application/json";

static NOISE: OnceLock<Option<Regex>> = OnceLock::new();
static PROLOGUE: OnceLock<Option<Regex>> = OnceLock::new();
static KEYWORD: OnceLock<Option<Regex>> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(source).ok()).as_ref()
}

impl QueryKind {
    /// Classifies a statement by its first query/update keyword, ignoring
    /// IRIs, string literals, comments and the `PREFIX`/`BASE` prologue.
    pub fn detect(statement: &str) -> QueryKind {
        let (Some(noise), Some(prologue), Some(keyword)) = (
            pattern(
                &NOISE,
                r#"<[^<>"{}|^`\\\s]*>|"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|#[^\n]*"#,
            ),
            pattern(&PROLOGUE, r"(?i)\b(?:PREFIX\s+[\w.-]*:|BASE\b)"),
            pattern(
                &KEYWORD,
                r"(?i)(?:^|[^\w:?$])(SELECT|ASK|CONSTRUCT|DESCRIBE|INSERT|DELETE|LOAD|CLEAR|CREATE|DROP|COPY|MOVE|ADD)\b",
            ),
        ) else {
            return QueryKind::Unknown;
        };

        let stripped = noise.replace_all(statement, " ");
        let stripped = prologue.replace_all(&stripped, " ");

        let Some(found) = keyword.captures(&stripped).and_then(|c| c.get(1)) else {
            return QueryKind::Unknown;
        };

        match found.as_str().to_ascii_uppercase().as_str() {
            "SELECT" => QueryKind::Select,
            "ASK" => QueryKind::Ask,
            "CONSTRUCT" => QueryKind::Construct,
            "DESCRIBE" => QueryKind::Describe,
            "INSERT" => QueryKind::Insert,
            "DELETE" => QueryKind::Delete,
            "LOAD" => QueryKind::Load,
            "CLEAR" => QueryKind::Clear,
            "CREATE" => QueryKind::Create,
            "DROP" => QueryKind::Drop,
            "COPY" => QueryKind::Copy,
            "MOVE" => QueryKind::Move,
            "ADD" => QueryKind::Add,
            _ => QueryKind::Unknown,
        }
    }
}

/// Client for the query and update endpoints of the triple store.
///
/// Cloning is cheap and shares the connection pool. Mu headers are attached
/// per request, so concurrent callers never see each other's headers.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: Client,
    query_endpoint: String,
    update_endpoint: String,
}

impl SparqlClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::with_endpoints(
            config.query_endpoint(),
            config.update_endpoint(),
            config.timeout(),
        )
    }

    pub fn with_endpoints(
        query_endpoint: &str,
        update_endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        validate_url("MU_SPARQL_ENDPOINT", query_endpoint)?;
        validate_url("MU_SPARQL_UPDATEPOINT", update_endpoint)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            query_endpoint: query_endpoint.to_string(),
            update_endpoint: update_endpoint.to_string(),
        })
    }

    pub fn query_endpoint(&self) -> &str {
        &self.query_endpoint
    }

    pub fn update_endpoint(&self) -> &str {
        &self.update_endpoint
    }

    /// Runs a SELECT/ASK/CONSTRUCT/DESCRIBE statement and returns the parsed
    /// JSON results.
    pub async fn query(
        &self,
        statement: &str,
        inbound: Option<&HeaderMap>,
    ) -> Result<serde_json::Value> {
        tracing::info!("execute query: \n{}", statement);
        if let Some(session) = inbound.and_then(|h| h.session_id()) {
            tracing::debug!("Forwarding mu headers for session {}", session);
        }

        let request = self
            .client
            .get(&self.query_endpoint)
            .query(&[("query", statement)])
            .header(ACCEPT, SPARQL_RESULTS_JSON);
        let request = apply_forwarded_headers(request, inbound);

        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Runs an update statement. Statements that are not updates are
    /// skipped and `Ok(false)` is returned.
    pub async fn update(&self, statement: &str, inbound: Option<&HeaderMap>) -> Result<bool> {
        let kind = QueryKind::detect(statement);
        if !kind.is_update() {
            tracing::warn!("Skipping non-update statement ({:?}): \n{}", kind, statement);
            return Ok(false);
        }

        tracing::info!("execute update: \n{}", statement);

        let request = self
            .client
            .post(&self.update_endpoint)
            .form(&[("update", statement)])
            .header(ACCEPT, SPARQL_RESULTS_JSON);
        let request = apply_forwarded_headers(request, inbound);

        check_status(request.send().await?).await?;
        Ok(true)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("SPARQL endpoint returned {}: {}", status, body);
    Err(MuError::SparqlEndpoint {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl TripleStore for SparqlClient {
    async fn query(
        &self,
        statement: &str,
        inbound: Option<&HeaderMap>,
    ) -> Result<serde_json::Value> {
        SparqlClient::query(self, statement, inbound).await
    }

    async fn update(&self, statement: &str, inbound: Option<&HeaderMap>) -> Result<bool> {
        SparqlClient::update(self, statement, inbound).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_query_forms() {
        assert_eq!(
            QueryKind::detect("SELECT ?s WHERE { ?s ?p ?o }"),
            QueryKind::Select
        );
        assert_eq!(QueryKind::detect("ask { ?s ?p ?o }"), QueryKind::Ask);
        assert_eq!(
            QueryKind::detect("CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }"),
            QueryKind::Construct
        );
        assert_eq!(QueryKind::detect("  \n  "), QueryKind::Unknown);
    }

    #[test]
    fn test_detect_update_forms() {
        let with_graph = " WITH <http://mu.semte.ch/application> \
             DELETE { <http://ex.org/s> ?p ?o } WHERE { <http://ex.org/s> ?p ?o }";
        assert_eq!(QueryKind::detect(with_graph), QueryKind::Delete);
        assert!(QueryKind::detect(with_graph).is_update());

        assert_eq!(
            QueryKind::detect("insert data { <a:b> <c:d> \"select\" }"),
            QueryKind::Insert
        );
        assert_eq!(
            QueryKind::detect("DROP SILENT GRAPH <http://ex.org/g>"),
            QueryKind::Drop
        );
    }

    #[test]
    fn test_detect_ignores_prologue_and_comments() {
        let statement = "PREFIX xsd: <http://www.w3.org/2001/XMLSchema#> # insert later\n\
                         PREFIX add: <http://ex.org/add#>\n\
                         SELECT ?add WHERE { ?s add:delete ?add }";
        assert_eq!(QueryKind::detect(statement), QueryKind::Select);
        assert!(!QueryKind::detect(statement).is_update());
    }

    #[test]
    fn test_client_rejects_invalid_endpoints() {
        let result = SparqlClient::with_endpoints("not a url", "http://db/sparql", None);
        assert!(matches!(
            result,
            Err(MuError::InvalidConfigValueError { ref field, .. }) if field == "MU_SPARQL_ENDPOINT"
        ));
    }
}
