//! Offers

mod errors;
mod handlers;
mod requests;
pub(crate) mod responses;

pub(crate) use handlers::*;
