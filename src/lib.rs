//! # GramVantage Identity Service
//!
//! `gramvantage` is the identity authority for the GramVantage civic
//! engagement platform. It registers and authenticates three actor kinds
//! against a single Postgres-backed store and issues signed bearer tokens
//! for subsequent API access.
//!
//! ## Actor Model
//!
//! Every registered identity is one of three kinds, and the kind decides
//! which fields are mandatory and which identifier works as the login key:
//!
//! - **Citizens** register with a 10-digit mobile number (the login key) and
//!   a 12-digit national id.
//! - **Officials** and **NGOs** register with a 5-digit organization code
//!   (the login key), globally unique across both kinds.
//!
//! ## Tokens
//!
//! Access tokens are stateless HS256 JWTs with a 7-day lifetime. There is no
//! revocation list or refresh mechanism; expiry is the only invalidation
//! path. The signing secret must be provided explicitly at startup, the
//! server refuses to run without one.

pub mod api;
pub mod cli;
pub mod identity;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
