//! Payout repository backed by MongoDB.
//!
//! Payouts keep integer `_id`s allocated from the `counters` collection, so the
//! feed can be ordered and resumed on `(created_at, _id)`.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{COLLECTION_COUNTERS, COLLECTION_PAYOUTS, ERR_ID_SEQUENCE_UNAVAILABLE};
use crate::errors::ApiError;
use crate::models::{NewPayout, Payout, PayoutState};

use super::{PayoutQuery, PayoutRepository};

/// Repository for payout-related database operations.
pub struct MongoPayoutRepository {
    collection: Collection<Payout>,
    counters: Collection<Document>,
}

impl MongoPayoutRepository {
    /// Create a new MongoPayoutRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_PAYOUTS),
            counters: db.collection(COLLECTION_COUNTERS),
        }
    }

    /// Create database indexes for the payout feed.
    ///
    /// This method should be called once during application startup. It creates
    /// a compound index on `seller_id`, `created_at` and `_id` matching the feed's
    /// filter and sort order.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for payouts collection...");

        let feed_index = IndexModel::builder()
            .keys(doc! { "seller_id": 1, "created_at": -1, "_id": -1 })
            .options(
                IndexOptions::builder()
                    .name("seller_feed".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(feed_index).await?;
        info!("Database indexes created successfully");
        Ok(())
    }

    /// Allocate the next internal payout id.
    async fn next_id(&self) -> Result<u64, ApiError> {
        let counter = self
            .counters
            .find_one_and_update(counter_filter(), counter_increment())
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| ApiError::internal(ERR_ID_SEQUENCE_UNAVAILABLE))?;

        id_from_counter(&counter)
    }
}

fn counter_filter() -> Document {
    doc! { "_id": COLLECTION_PAYOUTS }
}

fn counter_increment() -> Document {
    doc! { "$inc": { "seq": 1_i64 } }
}

/// Read the allocated id out of the updated counter document.
fn id_from_counter(counter: &Document) -> Result<u64, ApiError> {
    let seq = counter.get_i64("seq")?;
    match u64::try_from(seq) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::internal(ERR_ID_SEQUENCE_UNAVAILABLE)),
    }
}

/// BSON has no unsigned 64-bit integer; ids are stored as `Int64`. An id above
/// `i64::MAX` cannot name a stored document.
fn bson_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

fn displayable_states() -> Vec<Bson> {
    PayoutState::DISPLAYABLE
        .iter()
        .map(|state| Bson::String(state.as_str().to_string()))
        .collect()
}

/// Translate a [`PayoutQuery`] into a filter document.
///
/// Returns `None` when the seller id cannot be stored, so no document can match.
fn page_filter(query: &PayoutQuery) -> Option<Document> {
    let seller_id = bson_id(query.seller_id)?;
    let mut filter = doc! {
        "seller_id": seller_id,
        "state": { "$in": displayable_states() },
    };

    let mut created_at = Document::new();
    if let Some(from) = query.created_from {
        created_at.insert("$gte", BsonDateTime::from_chrono(from));
    }
    if let Some(before) = query.created_before {
        created_at.insert("$lt", BsonDateTime::from_chrono(before));
    }
    if !created_at.is_empty() {
        filter.insert("created_at", created_at);
    }

    if let Some(key) = query.after_key {
        let boundary = BsonDateTime::from_chrono(key.created_at);
        // Every stored id is below a boundary id that does not fit in Int64.
        let tie = match bson_id(key.id) {
            Some(id) => doc! { "created_at": boundary, "_id": { "$lt": id } },
            None => doc! { "created_at": boundary },
        };
        filter.insert("$or", vec![doc! { "created_at": { "$lt": boundary } }, tie]);
    }

    Some(filter)
}

#[async_trait]
impl PayoutRepository for MongoPayoutRepository {
    async fn insert(&self, payout: NewPayout) -> Result<Payout, ApiError> {
        let id = self.next_id().await?;
        let payout = payout.into_payout(id);
        self.collection.insert_one(&payout).await?;
        debug!("Repository: Inserted payout {} for seller {}", id, payout.seller_id);
        Ok(payout)
    }

    async fn find_for_seller(&self, seller_id: u64, id: u64) -> Result<Option<Payout>, ApiError> {
        debug!("Repository: Finding payout {} for seller {}", id, seller_id);
        let (Some(id), Some(seller_id)) = (bson_id(id), bson_id(seller_id)) else {
            return Ok(None);
        };

        Ok(self
            .collection
            .find_one(doc! {
                "_id": id,
                "seller_id": seller_id,
                "state": { "$in": displayable_states() },
            })
            .await?)
    }

    async fn find_page(&self, query: &PayoutQuery) -> Result<Vec<Payout>, ApiError> {
        let Some(filter) = page_filter(query) else {
            return Ok(Vec::new());
        };
        debug!("Repository: Finding payouts with filter: {:?}", filter);

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .await?;

        Ok(cursor.try_collect().await?)
    }
}
