//! NX-OS style nested JSON decoding.
//!
//! The vendor wraps every level in a `TABLE_<x>` / `ROW_<x>` pair and emits
//! a bare object instead of an array whenever a level holds a single row.
//! `reader::Rows` normalizes each level to a list before the parser
//! descends, so singleton VRFs, address families and neighbors decode the
//! same as their one-element array form.
//!
//! Numbers arrive as strings or JSON numbers; both are accepted and any
//! unparseable value defaults to zero. Only invalid JSON or a document with
//! no VRF rows is an error.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::JsonError;
pub use parser::summaries_from_json;
