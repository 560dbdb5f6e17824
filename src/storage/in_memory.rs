//! In-memory implementation of AddressStore for testing and development

use crate::core::address::{Address, AddressPatch};
use crate::core::error::StoreError;
use crate::core::query::{PageRequest, SearchFilter};
use crate::core::store::AddressStore;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory address store
///
/// Records are kept in insertion order. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryAddressStore {
    addresses: Arc<RwLock<IndexMap<Uuid, Address>>>,
}

impl InMemoryAddressStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            addresses: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.addresses.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAddressStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl AddressStore for InMemoryAddressStore {
    async fn find_many(
        &self,
        filter: &SearchFilter,
        page: PageRequest,
    ) -> Result<Vec<Address>, StoreError> {
        let addresses = self.addresses.read().map_err(lock_error)?;

        // Newest insert first, so equal timestamps keep that order after the stable sort
        let mut matching: Vec<&Address> = addresses
            .values()
            .rev()
            .filter(|a| filter.matches(a))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let window = matching.into_iter().skip(page.skip);
        let records = match page.take {
            Some(take) => window.take(take).cloned().collect(),
            None => window.cloned().collect(),
        };
        Ok(records)
    }

    async fn count(&self, filter: &SearchFilter) -> Result<usize, StoreError> {
        let addresses = self.addresses.read().map_err(lock_error)?;
        Ok(addresses.values().filter(|a| filter.matches(a)).count())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Address>, StoreError> {
        let addresses = self.addresses.read().map_err(lock_error)?;
        Ok(addresses.get(id).cloned())
    }

    async fn insert(&self, address: Address) -> Result<Address, StoreError> {
        let mut addresses = self.addresses.write().map_err(lock_error)?;

        if addresses.contains_key(&address.id) {
            return Err(StoreError::Backend(format!(
                "Unique constraint failed on id {}",
                address.id
            )));
        }
        addresses.insert(address.id, address.clone());

        Ok(address)
    }

    async fn update_by_id(&self, id: &Uuid, patch: AddressPatch) -> Result<Address, StoreError> {
        let mut addresses = self.addresses.write().map_err(lock_error)?;

        let address = addresses
            .get_mut(id)
            .ok_or(StoreError::NotFound { id: *id })?;
        address.apply(patch);

        Ok(address.clone())
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut addresses = self.addresses.write().map_err(lock_error)?;

        addresses
            .shift_remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id: *id })
    }
}
