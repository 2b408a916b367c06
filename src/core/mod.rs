pub mod headers;
pub mod json_api;
pub mod sparql;
pub mod statements;

pub use crate::domain::model::{QueryKind, MU_HEADERS};
pub use crate::domain::ports::{ConfigProvider, TripleStore};
pub use crate::utils::error::Result;
