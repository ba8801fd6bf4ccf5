//! Offerbook Domain Concerns

pub mod offers;
