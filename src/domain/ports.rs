use crate::domain::model::LogFormat;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn application_graph(&self) -> &str;
    fn query_endpoint(&self) -> &str;
    fn update_endpoint(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn log_level(&self) -> Option<&str>;
    fn log_dir(&self) -> Option<&str>;
    fn log_format(&self) -> LogFormat;
}

/// Something SPARQL statements can be sent to.
///
/// `inbound` is the header map of the request being served; its mu headers
/// are forwarded with the statement.
#[async_trait]
pub trait TripleStore: Send + Sync {
    async fn query(&self, statement: &str, inbound: Option<&HeaderMap>)
        -> Result<serde_json::Value>;

    /// Returns `false` when the statement is not an update and was not sent.
    async fn update(&self, statement: &str, inbound: Option<&HeaderMap>) -> Result<bool>;
}
