//! Route handlers
//!
//! - `health` - liveness check, no authentication
//! - `verification` - admin verification endpoints behind `JwtAuth`

pub mod health;
pub mod verification;
