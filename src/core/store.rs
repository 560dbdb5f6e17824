//! Store trait for the address collection

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::address::{Address, AddressPatch};
use crate::core::error::StoreError;
use crate::core::query::{PageRequest, SearchFilter};

/// Relational-style accessor over the address collection
///
/// Implementations are the only synchronization point between concurrent
/// writers. The services are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Records matching `filter`, ordered by `created_at` descending, windowed by `page`
    async fn find_many(
        &self,
        filter: &SearchFilter,
        page: PageRequest,
    ) -> Result<Vec<Address>, StoreError>;

    /// Number of records matching `filter`
    async fn count(&self, filter: &SearchFilter) -> Result<usize, StoreError>;

    /// Get a record by id
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Address>, StoreError>;

    /// Insert a new record
    async fn insert(&self, address: Address) -> Result<Address, StoreError>;

    /// Patch the supplied fields of an existing record
    ///
    /// Fails with [`StoreError::NotFound`] when no record has this id.
    async fn update_by_id(&self, id: &Uuid, patch: AddressPatch) -> Result<Address, StoreError>;

    /// Remove a record
    ///
    /// Fails with [`StoreError::NotFound`] when no record has this id.
    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StoreError>;
}
