//! Blocking client for downloading personal Advent of Code puzzle input.
//!
//! Requests carry the account's `session` cookie, marked sensitive so it never
//! shows up in debug output. TLS goes through rustls.
//!
//! ```no_run
//! use aoc_http_client::AocClient;
//!
//! # fn main() -> Result<(), aoc_http_client::AocError> {
//! let client = AocClient::new()?;
//! let session = "53616c7465645f5f";
//!
//! if client.verify_session(session)? {
//!     let input = client.get_input(2022, 1, session)?;
//!     println!("{} bytes of input", input.len());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{AocClient, AocClientBuilder};
pub use error::AocError;
