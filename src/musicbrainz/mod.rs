//! MusicBrainz API integration
//!
//! Fetches release track listings and searches releases / release groups.
//! Follows a DTO -> adapter -> domain split: `dto.rs` mirrors the JSON,
//! `adapter.rs` converts it into [`crate::model`] types, and nothing
//! outside this module sees a DTO.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;
mod error;
mod mbid;
mod traits;

pub use client::MusicBrainzClient;
pub use error::MusicBrainzError;
pub use mbid::{is_valid_mbid, parse_mbid};
pub use traits::MusicBrainzApi;
