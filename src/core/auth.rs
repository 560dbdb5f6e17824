//! Session resolution and authorization
//!
//! Identity is resolved once per request into an explicit [`RequestContext`]
//! which every service operation receives as a parameter. The
//! [`SessionGuard`] then applies the configured [`AuthPolicy`] for the
//! operation being performed.

use anyhow::Result;
use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::SessionConfig;
use crate::core::error::{AddressError, AddressResult};

/// Cookie consulted when no bearer token is present
pub const SESSION_COOKIE: &str = "address_session";

/// Privilege tier of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN", alias = "admin")]
    Admin,
    #[serde(rename = "USER", alias = "user")]
    User,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authorization context of a single request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    session: Option<Session>,
}

impl RequestContext {
    /// Context without a session
    pub fn anonymous() -> Self {
        Self { session: None }
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

impl From<Option<Session>> for RequestContext {
    fn from(session: Option<Session>) -> Self {
        Self { session }
    }
}

/// Operations subject to an authorization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Export,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Export => "export",
        };
        f.write_str(name)
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuthPolicy {
    /// No session required
    Public,

    /// Any session
    Authenticated,

    /// Session with the elevated role
    AdminOnly,
}

impl AuthPolicy {
    /// Check if a context satisfies this policy
    pub fn check(&self, context: &RequestContext) -> AddressResult<()> {
        match self {
            AuthPolicy::Public => Ok(()),
            AuthPolicy::Authenticated => SessionGuard::require_session(context).map(|_| ()),
            AuthPolicy::AdminOnly => SessionGuard::require_admin(context).map(|_| ()),
        }
    }
}

impl FromStr for AuthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(AuthPolicy::Public),
            "authenticated" => Ok(AuthPolicy::Authenticated),
            "admin_only" => Ok(AuthPolicy::AdminOnly),
            s if s.eq_ignore_ascii_case("role:admin") => Ok(AuthPolicy::AdminOnly),
            other => Err(format!("unknown auth policy '{}'", other)),
        }
    }
}

impl TryFrom<String> for AuthPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AuthPolicy> for String {
    fn from(policy: AuthPolicy) -> Self {
        match policy {
            AuthPolicy::Public => "public",
            AuthPolicy::Authenticated => "authenticated",
            AuthPolicy::AdminOnly => "admin_only",
        }
        .to_string()
    }
}

/// Policy per operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthPolicies {
    pub list: AuthPolicy,
    pub get: AuthPolicy,
    pub create: AuthPolicy,
    pub update: AuthPolicy,
    pub delete: AuthPolicy,
    pub export: AuthPolicy,
}

impl Default for AuthPolicies {
    fn default() -> Self {
        Self {
            list: AuthPolicy::Authenticated,
            get: AuthPolicy::Authenticated,
            create: AuthPolicy::Authenticated,
            update: AuthPolicy::Authenticated,
            delete: AuthPolicy::AdminOnly,
            export: AuthPolicy::Authenticated,
        }
    }
}

impl AuthPolicies {
    pub fn for_operation(&self, operation: Operation) -> AuthPolicy {
        match operation {
            Operation::List => self.list,
            Operation::Get => self.get,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
            Operation::Export => self.export,
        }
    }
}

/// Applies session and role requirements to a request context
#[derive(Debug, Clone, Default)]
pub struct SessionGuard {
    policies: AuthPolicies,
}

impl SessionGuard {
    pub fn new(policies: AuthPolicies) -> Self {
        Self { policies }
    }

    pub fn policies(&self) -> &AuthPolicies {
        &self.policies
    }

    /// Resolve the session or fail with `Unauthorized`
    pub fn require_session(context: &RequestContext) -> AddressResult<&Session> {
        context.session().ok_or(AddressError::Unauthorized)
    }

    /// Resolve the session, then fail with `Forbidden` unless it is an admin
    pub fn require_admin(context: &RequestContext) -> AddressResult<&Session> {
        let session = Self::require_session(context)?;
        if !session.is_admin() {
            return Err(AddressError::Forbidden);
        }
        Ok(session)
    }

    /// Apply the configured policy for `operation`
    pub fn authorize(&self, context: &RequestContext, operation: Operation) -> AddressResult<()> {
        let policy = self.policies.for_operation(operation);
        policy.check(context).inspect_err(|e| {
            tracing::warn!(
                operation = %operation,
                user_id = context.session().map(|s| s.user_id.as_str()),
                "authorization denied: {}",
                e
            );
        })
    }
}

/// Resolves a session from inbound request headers
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Return the session for these headers, `None` when there is none
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>>;
}

/// Resolver backed by a static token table
///
/// Tokens are read from `Authorization: Bearer <token>`, falling back to the
/// [`SESSION_COOKIE`] cookie.
#[derive(Debug, Clone, Default)]
pub struct TokenSessionResolver {
    sessions: HashMap<String, Session>,
}

impl TokenSessionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(entries: &[SessionConfig]) -> Self {
        let sessions = entries
            .iter()
            .map(|entry| {
                (
                    entry.token.clone(),
                    Session {
                        user_id: entry.user_id.clone(),
                        name: entry.name.clone(),
                        role: entry.role,
                    },
                )
            })
            .collect();
        Self { sessions }
    }

    pub fn with_token(mut self, token: impl Into<String>, session: Session) -> Self {
        self.sessions.insert(token.into(), session);
        self
    }
}

#[async_trait]
impl SessionResolver for TokenSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>> {
        let token = bearer_token(headers).or_else(|| cookie_value(headers, SESSION_COOKIE));
        Ok(token.and_then(|t| self.sessions.get(t).cloned()))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
