mod config;
mod driver;
mod routes;

pub use config::{HttpDriverConfig, UniDriverConfig};
pub use driver::HttpDriver;
pub use routes::router;
