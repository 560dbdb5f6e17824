//! Address operations
//!
//! Every operation authorizes the [`RequestContext`] first, then validates
//! input, then touches the store. Failures of any stage are folded into the
//! operation's outcome type.

use std::sync::Arc;
use uuid::Uuid;

use super::outcome::{AddressPage, DeleteOutcome, ExportOutcome, ListOutcome, RecordOutcome};
use crate::config::{AppConfig, PaginationConfig};
use crate::core::address::Address;
use crate::core::auth::{AuthPolicies, Operation, RequestContext, SessionGuard};
use crate::core::csv;
use crate::core::error::{AddressError, AddressResult, ErrorKind};
use crate::core::query::{ListParams, PageRequest, PaginationMeta, SearchFilter};
use crate::core::store::AddressStore;
use crate::core::validation::{FormFields, validate_create, validate_update};

/// Service over the address collection
#[derive(Clone)]
pub struct AddressService {
    store: Arc<dyn AddressStore>,
    guard: SessionGuard,
    pagination: PaginationConfig,
}

impl AddressService {
    /// Create a service with the default policies and page sizes
    pub fn new(store: Arc<dyn AddressStore>) -> Self {
        Self {
            store,
            guard: SessionGuard::default(),
            pagination: PaginationConfig::default(),
        }
    }

    pub fn from_config(store: Arc<dyn AddressStore>, config: &AppConfig) -> Self {
        Self::new(store)
            .with_policies(config.auth.policies.clone())
            .with_pagination(config.pagination.clone())
    }

    pub fn with_policies(mut self, policies: AuthPolicies) -> Self {
        self.guard = SessionGuard::new(policies);
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn store(&self) -> &Arc<dyn AddressStore> {
        &self.store
    }

    /// One page of records matching the search query, newest first
    ///
    /// `total` counts every match, not just the returned page.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_addresses(&self, ctx: &RequestContext, params: &ListParams) -> ListOutcome {
        let result = self.try_list(ctx, params).await;
        report(Operation::List, &result);
        result.into()
    }

    async fn try_list(&self, ctx: &RequestContext, params: &ListParams) -> AddressResult<AddressPage> {
        self.guard.authorize(ctx, Operation::List)?;

        let filter = params.filter();
        let page = params.page();
        let page_size = params.page_size(
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        );

        let records = self
            .store
            .find_many(&filter, PageRequest::page(page, page_size))
            .await?;
        let total = self.store.count(&filter).await?;

        tracing::debug!(page, page_size, total, returned = records.len(), "listed addresses");

        Ok(AddressPage {
            records,
            total,
            pagination: PaginationMeta::new(page, page_size, total),
        })
    }

    /// Fetch a single record
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get_address_by_id(&self, ctx: &RequestContext, id: &str) -> RecordOutcome {
        let result = self.try_get(ctx, id).await;
        report(Operation::Get, &result);
        result.into()
    }

    async fn try_get(&self, ctx: &RequestContext, id: &str) -> AddressResult<Address> {
        self.guard.authorize(ctx, Operation::Get)?;
        let uuid = parse_id(id)?;
        self.store
            .find_by_id(&uuid)
            .await?
            .ok_or_else(|| AddressError::not_found(id))
    }

    /// Validate a full form and insert a new record
    #[tracing::instrument(skip(self, ctx, raw))]
    pub async fn create_address(&self, ctx: &RequestContext, raw: &FormFields) -> RecordOutcome {
        let result = self.try_create(ctx, raw).await;
        report(Operation::Create, &result);
        result.into()
    }

    async fn try_create(&self, ctx: &RequestContext, raw: &FormFields) -> AddressResult<Address> {
        self.guard.authorize(ctx, Operation::Create)?;
        let input = validate_create(raw).map_err(AddressError::ValidationFailed)?;

        let created = self.store.insert(Address::new(input)).await?;
        tracing::info!(id = %created.id, "address created");
        Ok(created)
    }

    /// Validate supplied fields and patch an existing record
    #[tracing::instrument(skip(self, ctx, raw))]
    pub async fn update_address(
        &self,
        ctx: &RequestContext,
        id: &str,
        raw: &FormFields,
    ) -> RecordOutcome {
        let result = self.try_update(ctx, id, raw).await;
        report(Operation::Update, &result);
        result.into()
    }

    async fn try_update(
        &self,
        ctx: &RequestContext,
        id: &str,
        raw: &FormFields,
    ) -> AddressResult<Address> {
        self.guard.authorize(ctx, Operation::Update)?;
        let patch = validate_update(raw).map_err(AddressError::ValidationFailed)?;
        let uuid = parse_id(id)?;

        let updated = self.store.update_by_id(&uuid, patch).await?;
        tracing::info!(id = %updated.id, "address updated");
        Ok(updated)
    }

    /// Remove a record
    #[tracing::instrument(skip(self, ctx))]
    pub async fn delete_address(&self, ctx: &RequestContext, id: &str) -> DeleteOutcome {
        let result = self.try_delete(ctx, id).await;
        report(Operation::Delete, &result);
        result.into()
    }

    async fn try_delete(&self, ctx: &RequestContext, id: &str) -> AddressResult<()> {
        self.guard.authorize(ctx, Operation::Delete)?;
        let uuid = parse_id(id)?;

        self.store.delete_by_id(&uuid).await?;
        tracing::info!(id = %uuid, "address deleted");
        Ok(())
    }

    /// Render every record matching the search query as CSV
    ///
    /// Re-queries the store without a page window, so the export is not
    /// limited to what a client currently displays.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn export_addresses(
        &self,
        ctx: &RequestContext,
        search_query: Option<&str>,
    ) -> ExportOutcome {
        let result = self.try_export(ctx, search_query).await;
        report(Operation::Export, &result);
        result.into()
    }

    async fn try_export(
        &self,
        ctx: &RequestContext,
        search_query: Option<&str>,
    ) -> AddressResult<(String, usize)> {
        self.guard.authorize(ctx, Operation::Export)?;

        let records = self
            .store
            .find_many(&SearchFilter::new(search_query), PageRequest::unbounded())
            .await?;
        tracing::info!(count = records.len(), "addresses exported");
        Ok((csv::format_addresses(&records), records.len()))
    }
}

/// A malformed id cannot name any record
fn parse_id(id: &str) -> AddressResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AddressError::not_found(id))
}

fn report<T>(operation: Operation, result: &AddressResult<T>) {
    let Err(err) = result else {
        return;
    };
    match err.kind() {
        ErrorKind::StoreFailure => {
            tracing::error!(operation = %operation, "address operation failed: {}", err)
        }
        // Denials are already logged by the guard
        ErrorKind::Unauthorized | ErrorKind::Forbidden => {}
        _ => tracing::debug!(operation = %operation, "address operation rejected: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::{AuthPolicy, Role, Session};
    use crate::core::error::StoreError;
    use crate::core::address::AddressPatch;
    use crate::storage::InMemoryAddressStore;
    use async_trait::async_trait;

    /// Store that fails every call
    struct BrokenStore;

    #[async_trait]
    impl AddressStore for BrokenStore {
        async fn find_many(
            &self,
            _: &SearchFilter,
            _: PageRequest,
        ) -> Result<Vec<Address>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn count(&self, _: &SearchFilter) -> Result<usize, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn find_by_id(&self, _: &Uuid) -> Result<Option<Address>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn insert(&self, _: Address) -> Result<Address, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn update_by_id(&self, _: &Uuid, _: AddressPatch) -> Result<Address, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn delete_by_id(&self, _: &Uuid) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    fn user() -> RequestContext {
        RequestContext::with_session(Session::new("u-1", Role::User))
    }

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_form() -> FormFields {
        form(&[
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("street", "St James Sq"),
            ("houseNumber", "12"),
            ("postalCode", "SW1Y"),
            ("city", "London"),
            ("country", "UK"),
            ("email", "ada@example.com"),
        ])
    }

    fn service() -> AddressService {
        AddressService::new(Arc::new(InMemoryAddressStore::new()))
    }

    #[tokio::test]
    async fn test_store_failure_becomes_outcome() {
        let service = AddressService::new(Arc::new(BrokenStore));

        let list = service.list_addresses(&user(), &ListParams::default()).await;
        assert_eq!(list.data, None);
        assert_eq!(list.total, 0);
        assert_eq!(list.error_kind, Some(ErrorKind::StoreFailure));
        assert_eq!(list.error.as_deref(), Some("connection refused"));

        let created = service.create_address(&user(), &valid_form()).await;
        assert_eq!(created.error_kind, Some(ErrorKind::StoreFailure));

        let export = service.export_addresses(&user(), None).await;
        assert!(export.csv.is_none());
    }

    #[tokio::test]
    async fn test_authorization_runs_before_validation() {
        let outcome = service()
            .create_address(&RequestContext::anonymous(), &FormFields::new())
            .await;
        assert_eq!(outcome.error.as_deref(), Some("Unauthorized"));
        assert!(outcome.field_errors.is_none());
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let service = service();
        let get = service.get_address_by_id(&user(), "not-a-uuid").await;
        assert_eq!(get.error.as_deref(), Some("Address not found."));
        assert_eq!(get.error_kind, Some(ErrorKind::NotFound));

        let update = service
            .update_address(&user(), "not-a-uuid", &form(&[("city", "Paris")]))
            .await;
        assert_eq!(update.error_kind, Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let outcome = service()
            .update_address(&user(), "not-a-uuid", &form(&[("email", "nope")]))
            .await;
        assert_eq!(outcome.error_kind, Some(ErrorKind::ValidationFailed));
        let errors = outcome.field_errors.unwrap();
        assert_eq!(errors["email"], vec!["Invalid email address".to_string()]);
    }

    #[tokio::test]
    async fn test_configured_page_size_applies() {
        let service = service().with_pagination(PaginationConfig {
            default_page_size: 2,
            max_page_size: 3,
        });
        for _ in 0..5 {
            service.create_address(&user(), &valid_form()).await;
        }

        let defaulted = service.list_addresses(&user(), &ListParams::default()).await;
        assert_eq!(defaulted.data.map(|d| d.len()), Some(2));

        let clamped = service
            .list_addresses(&user(), &ListParams::new("", 1, 50))
            .await;
        assert_eq!(clamped.data.map(|d| d.len()), Some(3));
        assert_eq!(clamped.pagination.map(|p| p.page_size), Some(3));
        assert_eq!(clamped.total, 5);
    }

    #[tokio::test]
    async fn test_public_list_policy() {
        let service = service().with_policies(AuthPolicies {
            list: AuthPolicy::Public,
            ..Default::default()
        });
        let outcome = service
            .list_addresses(&RequestContext::anonymous(), &ListParams::default())
            .await;
        assert!(outcome.is_ok());
        assert_eq!(outcome.total, 0);
    }
}
