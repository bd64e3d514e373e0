//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the shop's actors.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - Instantiate the product, solicitud and cart actors and their clients
//! 2. **Dependency Injection** - Hand each actor its context when it starts
//! 3. **Authorization** - Check the caller once per operation before dispatching
//! 4. **Graceful Shutdown** - Drop every client and wait for the actor tasks
//! 5. **Observability Setup** - Initialize tracing and logging infrastructure
//!
//! ## Wiring
//!
//! ```text
//!             ┌──────────────┐
//!             │   Product    │  Context = ()
//!             └──────▲───────┘
//!        reserve /   │   \ product lookups
//!        release     │    \
//!   ┌───────────┐    │    ┌──────────┐
//!   │ Solicitud │────┘    │   Cart   │  Context = CartContext
//!   └─────▲─────┘         └────▲─────┘
//!         └──── Checkout ──────┘
//! ```
//!
//! Dependencies are bound in `run(ctx)` rather than in the constructor, so every
//! actor and client exists before any of them starts.
//!
//! ## Shutdown
//!
//! Each actor stops once every sender for its mailbox is gone. The solicitud and
//! cart actors own product clients in their context, so the product actor stops
//! last. [`Tienda::shutdown`] drops its own clients and awaits all three tasks.

pub mod system;
pub mod tracing;

pub use system::Tienda;
pub use tracing::setup_tracing;
