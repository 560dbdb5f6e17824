//! Uniform result shapes returned by the address operations
//!
//! No operation lets an error escape: success and failure are both encoded
//! as data, so the caller branches on `error` / `fieldErrors` presence.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::error::{AddressError, ErrorKind, FieldErrors};
use crate::core::query::PaginationMeta;

/// One page of matching records
#[derive(Debug, Clone, PartialEq)]
pub struct AddressPage {
    pub records: Vec<Address>,
    pub total: usize,
    pub pagination: PaginationMeta,
}

/// Result of `list_addresses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutcome {
    pub data: Option<Vec<Address>>,
    pub total: usize,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl From<Result<AddressPage, AddressError>> for ListOutcome {
    fn from(result: Result<AddressPage, AddressError>) -> Self {
        match result {
            Ok(page) => Self {
                data: Some(page.records),
                total: page.total,
                error: None,
                pagination: Some(page.pagination),
                error_kind: None,
            },
            Err(err) => Self {
                data: None,
                total: 0,
                error: Some(err.to_string()),
                pagination: None,
                error_kind: Some(err.kind()),
            },
        }
    }
}

/// Result of the single-record operations: get, create, update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutcome {
    pub data: Option<Address>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl From<Result<Address, AddressError>> for RecordOutcome {
    fn from(result: Result<Address, AddressError>) -> Self {
        match result {
            Ok(address) => Self {
                data: Some(address),
                error: None,
                field_errors: None,
                error_kind: None,
            },
            Err(err) => Self {
                data: None,
                error: Some(err.to_string()),
                field_errors: err.field_errors().cloned(),
                error_kind: Some(err.kind()),
            },
        }
    }
}

/// Result of `delete_address`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub success: bool,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl From<Result<(), AddressError>> for DeleteOutcome {
    fn from(result: Result<(), AddressError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                error: None,
                error_kind: None,
            },
            Err(err) => Self {
                success: false,
                error: Some(err.to_string()),
                error_kind: Some(err.kind()),
            },
        }
    }
}

/// Result of `export_addresses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub csv: Option<String>,
    pub count: usize,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl From<Result<(String, usize), AddressError>> for ExportOutcome {
    fn from(result: Result<(String, usize), AddressError>) -> Self {
        match result {
            Ok((csv, count)) => Self {
                csv: Some(csv),
                count,
                error: None,
                error_kind: None,
            },
            Err(err) => Self {
                csv: None,
                count: 0,
                error: Some(err.to_string()),
                error_kind: Some(err.kind()),
            },
        }
    }
}

macro_rules! impl_status {
    ($($outcome:ty),* $(,)?) => {
        $(
            impl $outcome {
                /// Whether the operation succeeded
                pub fn is_ok(&self) -> bool {
                    self.error.is_none()
                }

                /// HTTP status for this outcome
                pub fn status_code(&self, success: StatusCode) -> StatusCode {
                    self.error_kind.map_or(success, ErrorKind::status_code)
                }
            }
        )*
    };
}

impl_status!(ListOutcome, RecordOutcome, DeleteOutcome, ExportOutcome);
