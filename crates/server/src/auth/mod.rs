//! Authentication Module
//!
//! Password hashing, bearer token issuance and verification, and the
//! request identity extractor used by protected routes.

pub mod ctx;
pub mod password;
pub mod token;

pub use ctx::Ctx;
pub use token::{AuthError, Claims, TokenService};
