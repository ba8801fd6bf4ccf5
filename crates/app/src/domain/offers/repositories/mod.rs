//! Offers Repositories
//!
//! Storage backends return offers already ordered by precedence and report a missing offer
//! as [`sqlx::Error::RowNotFound`].

use async_trait::async_trait;
use mockall::automock;
use offerbook::offers::Offer;

use crate::domain::offers::{
    data::{OfferFilter, PageWindow},
    records::{OfferRecord, OfferUuid},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryOffersRepository;
pub use postgres::PgOffersRepository;

#[automock]
#[async_trait]
pub trait OffersRepository: Send + Sync {
    /// Offers passing `filter` in precedence order, optionally limited to `window`.
    async fn find_offers(
        &self,
        filter: OfferFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<OfferRecord>, sqlx::Error>;

    /// Number of offers passing `filter`.
    async fn count_offers(&self, filter: OfferFilter) -> Result<u64, sqlx::Error>;

    /// A single offer.
    async fn find_offer(&self, offer: OfferUuid) -> Result<OfferRecord, sqlx::Error>;

    /// Store a new offer under a freshly assigned identifier.
    async fn insert_offer(&self, offer: Offer) -> Result<OfferRecord, sqlx::Error>;

    /// Overwrite the writable state of an existing offer.
    async fn save_offer(&self, uuid: OfferUuid, offer: Offer)
    -> Result<OfferRecord, sqlx::Error>;

    /// Remove an offer, returning the number of rows removed.
    async fn delete_offer(&self, offer: OfferUuid) -> Result<u64, sqlx::Error>;
}
