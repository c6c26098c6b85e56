//! `protojson-build` generates JSON encoders for protobuf message types.
//!
//! The generator takes a fully resolved [`Schema`](schema::Schema) and emits,
//! per message type, an inherent encode method plus an implementation of
//! `protojson::MarshalJson`. Each encoder writes the message's fields in
//! declaration order into a single JSON object and delegates nested messages
//! to their own encoders.
//!
//! # Example
//!
//! ```rust,no_run
//! // In build.rs
//! use protojson_build::schema::{FieldDescriptor, FieldKind, MessageType, Schema, SchemaFile};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = Schema::new().file(
//!         SchemaFile::new("module.proto", "pb").message(
//!             MessageType::new(".pb.Flag").field(FieldDescriptor::new("b", FieldKind::Bool)),
//!         ),
//!     );
//!     protojson_build::compile(&schema)?;
//!     Ok(())
//! }
//! ```
//!
//! The generated `module.json.rs` is then included next to the types:
//!
//! ```rust,ignore
//! pub struct Flag {
//!     pub b: bool,
//! }
//!
//! include!(concat!(env!("OUT_DIR"), "/module.json.rs"));
//! ```
//!
//! # Options
//!
//! Options can be set with builder methods or parsed from a flat parameter
//! string:
//!
//! ```rust,no_run
//! fn main() -> Result<(), protojson_build::Error> {
//!     # let schema = protojson_build::schema::Schema::new();
//!     protojson_build::Config::from_params("EncodeMethodName=to_json,Debug=true")?
//!         .out_dir("src/generated")
//!         .extern_message(".google.protobuf.Timestamp")
//!         .write(&schema)?;
//!     Ok(())
//! }
//! ```

mod codegen;
mod config;
mod context;
mod error;
pub mod schema;

pub use codegen::GeneratedFile;
pub use config::{Config, GenerationOptions, OPTION_KEYS};
pub use error::{ConfigError, Error};

/// Generate encoders for `schema` with default settings and write them into
/// `$OUT_DIR`.
pub fn compile(schema: &schema::Schema) -> Result<(), Error> {
    Config::new().write(schema)
}
