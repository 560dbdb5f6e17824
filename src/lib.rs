//! # Address Admin
//!
//! Administrative HTTP service for managing a collection of postal/contact
//! address records.
//!
//! ## Features
//!
//! - **Uniform outcomes**: every operation returns `{data, error, fieldErrors}`
//!   style results instead of failing loudly
//! - **Declarative validation**: one constraint table for create and update
//! - **Explicit authorization**: a [`RequestContext`](core::auth::RequestContext)
//!   is passed to every operation and checked against configurable policies
//! - **Search and pagination**: case-insensitive substring search across ten
//!   fields, newest first
//! - **CSV export** of every matching record
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use address_admin::prelude::*;
//!
//! let service = AddressService::new(Arc::new(InMemoryAddressStore::new()));
//! let ctx = RequestContext::with_session(Session::new("u-1", Role::User));
//!
//! let outcome = service.list_addresses(&ctx, &ListParams::default()).await;
//! assert_eq!(outcome.total, 0);
//! ```

pub mod addresses;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Address, AddressError, AddressField, AddressPatch, AddressResult, AddressStore,
        AuthPolicies, AuthPolicy, ErrorKind, FieldErrors, ListParams, NewAddress, Operation,
        PaginationMeta, RequestContext, Role, SearchFilter, Session, SessionGuard,
        SessionResolver, StoreError, TokenSessionResolver,
    };
    pub use crate::core::validation::{FormFields, FormInput, Mode};

    // === Operations ===
    pub use crate::addresses::{
        AddressService, AppState, DeleteOutcome, ExportOutcome, ListOutcome, RecordOutcome,
    };

    // === Storage ===
    pub use crate::storage::InMemoryAddressStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
