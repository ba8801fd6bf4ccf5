//! Offers Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use offerbook::offers::{patch::OfferPatch, validation::validate};
use tracing::{Span, info};
use uuid::Uuid;

use crate::domain::offers::{
    OffersServiceError,
    data::{
        DeletedOffer, NewOffer, OfferDiscount, OfferFilter, OffersPage, OffersQuery,
        with_storage_precision,
    },
    records::{OfferRecord, OfferUuid},
    repositories::{InMemoryOffersRepository, OffersRepository, PgOffersRepository},
};

/// Offers service backed by Postgres.
pub type PgOffersService = RepositoryOffersService<PgOffersRepository>;

/// Offers service backed by process memory.
pub type InMemoryOffersService = RepositoryOffersService<InMemoryOffersRepository>;

#[derive(Debug, Clone)]
pub struct RepositoryOffersService<R> {
    repository: R,
}

impl<R: OffersRepository> RepositoryOffersService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: OffersRepository> OffersService for RepositoryOffersService<R> {
    #[tracing::instrument(
        name = "offers.service.create_offer",
        skip(self, offer),
        fields(
            offer_uuid = tracing::field::Empty,
            offer_type = %offer.rules.offer_type()
        ),
        err
    )]
    async fn create_offer(&self, offer: NewOffer) -> Result<OfferRecord, OffersServiceError> {
        let offer = with_storage_precision(offer.into_offer());

        validate(&offer)?;

        let record = self.repository.insert_offer(offer).await?;

        Span::current().record("offer_uuid", tracing::field::display(record.uuid));

        info!(offer_uuid = %record.uuid, "created offer");

        Ok(record)
    }

    #[tracing::instrument(
        name = "offers.service.list_offers",
        skip(self),
        fields(total = tracing::field::Empty),
        err
    )]
    async fn list_offers(&self, query: OffersQuery) -> Result<OffersPage, OffersServiceError> {
        if !query.is_valid() {
            return Err(OffersServiceError::InvalidPagination);
        }

        let filter = query.filter();

        let total = self.repository.count_offers(filter).await?;

        Span::current().record("total", total);

        let offers = self
            .repository
            .find_offers(filter, Some(query.window()))
            .await?;

        Ok(OffersPage {
            offers,
            total,
            page: query.page,
            limit: query.limit,
            total_pages: total.div_ceil(u64::from(query.limit)),
        })
    }

    #[tracing::instrument(
        name = "offers.service.get_offer",
        skip(self),
        fields(offer_uuid = %offer),
        err
    )]
    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferRecord, OffersServiceError> {
        Ok(self.repository.find_offer(offer).await?)
    }

    #[tracing::instrument(
        name = "offers.service.update_offer",
        skip(self, patch),
        fields(offer_uuid = %offer),
        err
    )]
    async fn update_offer(
        &self,
        offer: OfferUuid,
        patch: OfferPatch,
    ) -> Result<OfferRecord, OffersServiceError> {
        let existing = self.repository.find_offer(offer).await?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let merged = with_storage_precision(patch.apply(existing.offer));

        validate(&merged)?;

        let record = self.repository.save_offer(offer, merged).await?;

        info!(offer_uuid = %offer, "updated offer");

        Ok(record)
    }

    #[tracing::instrument(
        name = "offers.service.delete_offer",
        skip(self),
        fields(offer_uuid = %offer),
        err
    )]
    async fn delete_offer(&self, offer: OfferUuid) -> Result<DeletedOffer, OffersServiceError> {
        let existing = self.repository.find_offer(offer).await?;

        let rows_affected = self.repository.delete_offer(offer).await?;

        if rows_affected == 0 {
            return Err(OffersServiceError::NotFound);
        }

        info!(offer_uuid = %offer, "deleted offer");

        Ok(DeletedOffer {
            uuid: existing.uuid,
            name: existing.offer.name,
        })
    }

    #[tracing::instrument(
        name = "offers.service.active_offers",
        skip(self),
        fields(count = tracing::field::Empty),
        err
    )]
    async fn active_offers(&self, at: Timestamp) -> Result<Vec<OfferRecord>, OffersServiceError> {
        let offers = self
            .repository
            .find_offers(OfferFilter::live_at(at), None)
            .await?;

        Span::current().record("count", offers.len());

        Ok(offers)
    }

    #[tracing::instrument(
        name = "offers.service.offers_for_product",
        skip(self),
        fields(count = tracing::field::Empty),
        err
    )]
    async fn offers_for_product(
        &self,
        product: Uuid,
        at: Timestamp,
    ) -> Result<Vec<OfferRecord>, OffersServiceError> {
        let offers = self
            .repository
            .find_offers(OfferFilter::for_product(product, at), None)
            .await?;

        Span::current().record("count", offers.len());

        Ok(offers)
    }

    #[tracing::instrument(
        name = "offers.service.evaluate_discount",
        skip(self),
        fields(offer_uuid = %offer),
        err
    )]
    async fn evaluate_discount(
        &self,
        offer: OfferUuid,
        quantity: u32,
        unit_price: u64,
        at: Timestamp,
    ) -> Result<OfferDiscount, OffersServiceError> {
        let record = self.repository.find_offer(offer).await?;

        let discount = record.offer.discount(quantity, unit_price);
        let live = record.offer.is_live_at(at);

        Ok(OfferDiscount {
            offer: record,
            discount,
            live,
        })
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Apply creation defaults, validate and store a new offer.
    async fn create_offer(&self, offer: NewOffer) -> Result<OfferRecord, OffersServiceError>;

    /// One page of offers in precedence order.
    async fn list_offers(&self, query: OffersQuery) -> Result<OffersPage, OffersServiceError>;

    /// Retrieve a single offer.
    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferRecord, OffersServiceError>;

    /// Merge `patch` into the stored offer, validate the result and save it.
    async fn update_offer(
        &self,
        offer: OfferUuid,
        patch: OfferPatch,
    ) -> Result<OfferRecord, OffersServiceError>;

    /// Permanently remove an offer.
    async fn delete_offer(&self, offer: OfferUuid) -> Result<DeletedOffer, OffersServiceError>;

    /// Offers enabled and inside their validity window at `at`, in precedence order.
    async fn active_offers(&self, at: Timestamp) -> Result<Vec<OfferRecord>, OffersServiceError>;

    /// Active offers at `at` whose product scope is empty or lists `product`.
    async fn offers_for_product(
        &self,
        product: Uuid,
        at: Timestamp,
    ) -> Result<Vec<OfferRecord>, OffersServiceError>;

    /// Calculate the discount a stored offer yields for a line, without writing anything.
    async fn evaluate_discount(
        &self,
        offer: OfferUuid,
        quantity: u32,
        unit_price: u64,
        at: Timestamp,
    ) -> Result<OfferDiscount, OffersServiceError>;
}
