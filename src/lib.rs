//! travelog - Photo travel journal
//!
//! Captures photos tagged with a reverse-geocoded location, a title and a
//! caption, persists them in a local key-value store and renders them as a
//! feed with like/comment/share/save flags.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::TravelogError;
