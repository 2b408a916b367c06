use serde::{Deserialize, Serialize};

pub const MU_SESSION_ID: &str = "mu-session-id";
pub const MU_CALL_ID: &str = "mu-call-id";
pub const MU_AUTH_ALLOWED_GROUPS: &str = "mu-auth-allowed-groups";
pub const MU_AUTH_USED_GROUPS: &str = "mu-auth-used-groups";
pub const X_REWRITE_URL: &str = "x-rewrite-url";

/// Headers forwarded from the inbound request to the triple store.
pub const MU_HEADERS: [&str; 4] = [
    MU_SESSION_ID,
    MU_CALL_ID,
    MU_AUTH_ALLOWED_GROUPS,
    MU_AUTH_USED_GROUPS,
];

pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Ask,
    Construct,
    Describe,
    Insert,
    Delete,
    Load,
    Clear,
    Create,
    Drop,
    Copy,
    Move,
    Add,
    Unknown,
}

impl QueryKind {
    pub fn is_update(&self) -> bool {
        matches!(
            self,
            QueryKind::Insert
                | QueryKind::Delete
                | QueryKind::Load
                | QueryKind::Clear
                | QueryKind::Create
                | QueryKind::Drop
                | QueryKind::Copy
                | QueryKind::Move
                | QueryKind::Add
        )
    }
}

/// One entry of a JSON:API `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub detail: String,
    pub status: u16,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}
