//! Data models for token requests and responses.

mod request;
mod token;

pub use request::{AccessType, AuthorizationRequestParams, GrantRequest};
pub use token::Token;
