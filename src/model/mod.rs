//! Plain data structures. Products, purchase requests and carts implement
//! [`ActorEntity`](actor_framework::ActorEntity) in their actor modules; users are
//! supplied by the caller.

pub mod cart;
pub mod product;
pub mod solicitud;
pub mod user;

pub use cart::*;
pub use product::*;
pub use solicitud::*;
pub use user::*;
