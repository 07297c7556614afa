//! fsnd-core: plumbing shared by the booking site and the trivia API
//!
//! Both apps are thin handlers over PostgreSQL. The pieces they have in
//! common live here: layered configuration, pool creation, page slicing,
//! input validation and graceful shutdown.

pub mod config;
pub mod db;
pub mod pagination;
pub mod search;
pub mod shutdown;
pub mod validation;

pub use config::{App, AppConfig, ConfigError, ServiceSettings};
pub use pagination::{Paginated, Pagination, PaginationParams};
pub use validation::ValidationError;
