pub mod error;
pub mod escape;
pub mod id;
pub mod logger;
pub mod validation;
