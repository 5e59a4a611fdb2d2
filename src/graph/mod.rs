//! Data fetcher for the Graph API business discovery endpoint.
//!
//! The wire schema is decoded once at this boundary into [`Page`] values, so
//! the scanner never deals with loosely-shaped JSON.

mod client;
mod error;
mod source;
mod types;

pub use client::{fields_selector, GraphClient};
pub use error::FetchError;
pub use source::PageSource;
pub use types::{decode_page, MediaType, Page, Post};
