//! `jukebox-core` — routing foundation of the marketplace application.
//!
//! This crate contains the static route table and the per-transition request
//! value (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod request;
pub mod route;

pub use error::{RouteError, RouteResult};
pub use id::NavigationId;
pub use request::NavigationRequest;
pub use route::{RouteDef, RouteName, RouteTable};
