//! Authentication module
//!
//! The Cloudflare API is authenticated with a single API token sent as
//! `Authorization: Bearer <token>`. `BearerToken` keeps the secret out of
//! `Debug` output and logs.

mod token;

pub use token::BearerToken;
