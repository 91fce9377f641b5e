//! Capability enforcement.
//!
//! Programs declare, per function, the capability tier they need and
//! optionally an extension that grants it. Backends advertise a
//! [`CapabilityProfile`]. This crate decides whether the two fit:
//!
//! - [`CapabilityValidator`]: the allow rule for a single requirement
//! - [`validate`]: every function of a program against a base tier and
//!   granted extension set
//! - [`check_request`]: the project's requested tier/extensions against the
//!   backend, before any program is looked at
//! - [`CapabilityProvider`]: how a backend exposes its profile
//!
//! None of these fail; they return violation messages and leave the
//! strict/advisory decision to the caller.

mod provider;
mod validator;

pub use provider::CapabilityProvider;
pub use validator::{check_request, validate, CapabilityValidator};

pub use gv_ir::{CapabilityProfile, CapabilityTier};
