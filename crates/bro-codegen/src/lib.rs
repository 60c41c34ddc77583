//! Parser script generation for Bro logs.
//!
//! Turns a [`bro_header::HeaderDescriptor`] into a Heka sandbox decoder
//! written in Lua. The generated `process_message` matches each payload
//! against an LPeg grammar built from the header's separator and injects a
//! message whose fields are coerced according to the Bro column types.

mod error;
pub mod lua;

pub use error::{CodegenError, Result};
pub use lua::{IGNORE_TYPE, generate_lua_script};
