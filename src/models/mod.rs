//! Models module for the SDK
//!
//! Defines the OpenAPI-style description nodes populated by constraint
//! mapping. These are value objects: constructed once per described class,
//! mutated by the mapper, then handed off read-only to an emitter.

pub mod schema;

pub use schema::{Items, Property, Schema};
