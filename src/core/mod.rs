//! Core module containing the address model, validation, authorization and
//! storage abstraction

pub mod address;
pub mod auth;
pub mod csv;
pub mod error;
pub mod field;
pub mod query;
pub mod store;
pub mod validation;

pub use address::{Address, AddressField, AddressPatch, NewAddress};
pub use auth::{
    AuthPolicies, AuthPolicy, Operation, RequestContext, Role, Session, SessionGuard,
    SessionResolver, TokenSessionResolver,
};
pub use error::{AddressError, AddressResult, ErrorKind, FieldErrors, StoreError};
pub use field::FieldFormat;
pub use query::{ListParams, PageRequest, PaginationMeta, SearchFilter};
pub use store::AddressStore;
