//! Authentication & authorization
//!
//! JWT session tokens, the bearer middleware (which re-reads the live
//! account and applies the subscription gate on every request) and the
//! superadmin layer.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_superadmin};
