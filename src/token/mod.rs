//! Admin token issuance.
//!
//! Admin tokens are HS256 JWTs asserting the admin role, valid for two hours.

pub mod issuer;

pub use issuer::TokenIssuer;
