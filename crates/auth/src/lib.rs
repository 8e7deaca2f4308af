//! `plugboard-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and from the plugin
//! inventory: it knows about principals, capabilities and tokens only.

pub mod authorize;
pub mod claims;
pub mod guard;
pub mod jwt;
pub mod permissions;
pub mod policy;
pub mod principal;
pub mod roles;

pub use authorize::{AuthzError, Principal};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use guard::{Caller, CapabilityProvider, DeploymentMode, PluginAccessGuard};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use permissions::Permission;
pub use policy::{default_role_permissions, effective_permissions};
pub use principal::PrincipalId;
pub use roles::Role;
