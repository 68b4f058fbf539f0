pub mod config;
pub mod error;
pub mod module;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;
