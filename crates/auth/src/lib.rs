//! `jukebox-auth` — navigation access control (authentication + terms agreement).
//!
//! This crate is intentionally decoupled from HTTP: it consumes the
//! authentication and agreement queries through [`AuthService`] and
//! [`AgreementService`] and turns their outcome into a [`NavigationDecision`].

pub mod context;
pub mod decision;
pub mod guard;
pub mod login;
pub mod services;
pub mod status;

pub use context::NavigationContext;
pub use decision::{DecisionReason, NavigationDecision};
pub use guard::{evaluate, GuardOutcome, GuardPolicy, NavigationGuard, Verdict};
pub use login::LoginRedirect;
pub use services::{AgreementService, AuthService, QueryError};
pub use status::{AgreementStatus, AuthStatus};
