//! Post store implementations - JSON file and in-memory.

mod json_file;
mod memory;
mod stats;

pub use json_file::{DecodedDocument, JsonFilePostStore, decode_document, encode_document};
pub use memory::InMemoryPostStore;
