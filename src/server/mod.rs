//! HTTP server for the address API
//!
//! `ServerBuilder` wires a store and a session resolver into the route table
//! and serves it with graceful shutdown.

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::{build_address_routes, health_routes};
