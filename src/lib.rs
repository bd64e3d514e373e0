//! # Tienda
//!
//! The purchase-request and reservation core of a sports shop: products with a
//! stock counter and an optional weekly availability window, per-user carts,
//! purchase or reservation requests ("solicitudes") that hold stock while they
//! exist, and an all-or-nothing checkout that turns a cart into solicitudes.
//!
//! ## Architecture
//!
//! Each record family lives in its own [`ResourceActor`](actor_framework::ResourceActor)
//! from the `actor-framework` crate. An actor processes its mailbox one message at
//! a time, so checking and taking a product's stock is a single step that
//! concurrent requests cannot interleave.
//!
//! Cross-actor consistency is kept with compensation hooks. Creating a solicitud
//! reserves stock in `on_create`; if the solicitud cannot be saved, `on_discard`
//! gives it back. Deleting a solicitud removes it first and releases its stock in
//! `on_delete`; if the release fails, the solicitud is restored.
//!
//! ## Module Tour
//!
//! - [`model`]: records and their creation payloads
//! - [`availability`]: weekly availability windows and reservation checks
//! - [`pricing`]: cart totals and shipping
//! - [`product_actor`], [`solicitud_actor`], [`cart_actor`]: the `ActorEntity` impls
//! - [`clients`]: typed wrappers around each actor's `ResourceClient`
//! - [`checkout`]: cart to solicitudes with rollback
//! - [`authz`]: the single permission check
//! - [`outcome`]: success notices, error categories and user-facing messages
//! - [`lifecycle`]: the [`Tienda`](lifecycle::Tienda) facade and tracing setup
//! - [`config`]: CLI and environment settings
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod authz;
pub mod availability;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod outcome;
pub mod pricing;
pub mod product_actor;
pub mod solicitud_actor;
