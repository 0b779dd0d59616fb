//! [`JsonStore`] — the flat-file implementation of
//! [`trellis_core::ContentStore`].
//!
//! Each record kind is owned by a single JSON document holding the whole
//! collection as one array. Every mutation is a full read-modify-write of
//! that document; see [`document::Document`] for the consistency contract.

pub mod document;
pub mod error;
pub mod store;


pub use document::Document;
pub use error::{Error, Result};
pub use store::JsonStore;
