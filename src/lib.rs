pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::MuConfig;
pub use crate::core::headers::{rewrite_url_header, session_id_header, MuHeaderExt};
pub use crate::core::json_api::{
    error, error_with, validate_json_api_content_type, validate_resource_type, ErrorResponse,
};
pub use crate::core::sparql::SparqlClient;
pub use crate::core::statements::update_modified;
pub use crate::domain::model::{QueryKind, MU_HEADERS};
pub use crate::domain::ports::{ConfigProvider, TripleStore};
pub use crate::utils::error::{MuError, Result};
pub use crate::utils::escape::{sparql_escape, SparqlEscape};
pub use crate::utils::id::generate_uuid;
pub use crate::utils::logger::{init_logger, log};
