//! # gfiles-auth
//!
//! Authentication primitives: stateless JWT access tokens and Argon2id
//! password hashing. Session state beyond the token itself is out of
//! scope; the token carries everything the request context needs.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
