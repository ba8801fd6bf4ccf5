//! Offers

pub mod data;
pub mod errors;
pub mod records;
pub mod repositories;
pub mod service;

pub use errors::OffersServiceError;
pub use service::*;
