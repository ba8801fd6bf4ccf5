//! Authentication

mod errors;
mod models;
pub mod repositories;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use repositories::{ApiTokensRepository, InMemoryApiTokensRepository, PgApiTokensRepository};
pub use service::*;
pub use token::*;
