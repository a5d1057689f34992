//! The three pipeline stages: document text extraction, generation against
//! the backend, and artifact download.

pub mod download;
pub mod extract;
pub mod generate;
