use crate::domain::ports::TripleStore;
use crate::utils::error::Result;
use crate::utils::escape::{escape_datetime, escape_uri};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

pub const DCT_MODIFIED: &str = "http://purl.org/dc/terms/modified";

pub fn modified_delete_statement(graph: &str, subject: &str) -> String {
    let subject = escape_uri(subject);
    let predicate = escape_uri(DCT_MODIFIED);
    format!(
        "WITH {graph}\nDELETE {{\n  {subject} {predicate} ?modified .\n}}\nWHERE {{\n  {subject} {predicate} ?modified .\n}}",
        graph = escape_uri(graph),
        subject = subject,
        predicate = predicate,
    )
}

pub fn modified_insert_statement(graph: &str, subject: &str, modified: &DateTime<Utc>) -> String {
    format!(
        "INSERT DATA {{\n  GRAPH {graph} {{\n    {subject} {predicate} {modified} .\n  }}\n}}",
        graph = escape_uri(graph),
        subject = escape_uri(subject),
        predicate = escape_uri(DCT_MODIFIED),
        modified = escape_datetime(modified),
    )
}

/// Replaces the `dct:modified` value of `subject` in `graph`.
///
/// Without an explicit timestamp the current time is used.
pub async fn update_modified<S: TripleStore + ?Sized>(
    store: &S,
    graph: &str,
    subject: &str,
    modified: Option<DateTime<Utc>>,
    inbound: Option<&HeaderMap>,
) -> Result<DateTime<Utc>> {
    let modified = modified.unwrap_or_else(Utc::now);

    store
        .update(&modified_delete_statement(graph, subject), inbound)
        .await?;
    store
        .update(
            &modified_insert_statement(graph, subject, &modified),
            inbound,
        )
        .await?;

    tracing::debug!("Set modified of {} to {}", subject, modified);
    Ok(modified)
}
