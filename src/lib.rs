//! Storefront Backend
//!
//! Thin HTTP layer over a managed backend-as-a-service that supplies
//! authentication, relational storage and row-level querying. This service
//! implements neither; every operation is a pass-through to the managed
//! service's auth and row APIs.
//!
//! ## Features
//! - Product catalog listing with offset pagination
//! - Per-user shopping cart (add, update, remove, clear)
//! - Server-priced checkout producing an order, line items and stock decrements
//! - Pass-through sign-up and password sign-in

pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
