//! Runtime support for the JSON encoders generated by `protojson-build`.
//!
//! Generated code is `include!`d next to the message types it encodes and
//! calls into this crate for the pieces that are not plain literal writes:
//! number formatting, base64, enum names and the error type.
//!
//! ```rust
//! use protojson::{EncodeError, MarshalJson};
//!
//! struct Celsius(f64);
//!
//! impl MarshalJson for Celsius {
//!     fn marshal_json(&self) -> Result<Vec<u8>, EncodeError> {
//!         let mut buf: Vec<u8> = Vec::new();
//!         protojson::encode::put_f64(&mut buf, self.0);
//!         Ok(buf)
//!     }
//! }
//!
//! assert_eq!(protojson::to_vec(&Celsius(21.5)).unwrap(), b"21.5");
//! ```

mod error;

pub mod encode;

pub use error::EncodeError;

// Generated code names the buffer crate through us so users don't need a
// direct dependency on `bytes`.
pub use bytes;

/// A message that can render itself as a JSON object.
///
/// Implemented by every generated encoder, delegating to the generated
/// inherent method.
pub trait MarshalJson {
    /// Encode `self` into a freshly allocated buffer.
    fn marshal_json(&self) -> Result<Vec<u8>, EncodeError>;
}

impl<T: MarshalJson + ?Sized> MarshalJson for &T {
    fn marshal_json(&self) -> Result<Vec<u8>, EncodeError> {
        (**self).marshal_json()
    }
}

impl<T: MarshalJson + ?Sized> MarshalJson for Box<T> {
    fn marshal_json(&self) -> Result<Vec<u8>, EncodeError> {
        (**self).marshal_json()
    }
}

/// A protobuf enumeration.
///
/// The generator emits an implementation for every enum in the schema.
pub trait ProtoEnum {
    /// The numeric value of the variant.
    fn number(&self) -> i32;

    /// The symbolic name of the variant, as written in the schema.
    fn as_str_name(&self) -> &'static str;
}

/// Encode `value` as JSON.
pub fn to_vec<T: MarshalJson + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    value.marshal_json()
}

/// Encode `value` as a JSON string.
pub fn to_string<T: MarshalJson + ?Sized>(value: &T) -> Result<String, EncodeError> {
    let raw = value.marshal_json()?;
    String::from_utf8(raw).map_err(EncodeError::custom)
}
