//! Selects the write instructions for a value of a given kind.

use proc_macro2::TokenStream;

use crate::context::GenerationContext;
use crate::schema::{FieldDescriptor, FieldKind, MessageType};
use crate::Error;

use super::scalar;

/// Produce the code writing `value` (an expression of reference type) as a
/// JSON value of `kind`.
///
/// Map keys are always written as JSON strings, so only kinds with a string
/// form are accepted there.
pub fn dispatch(
    ctx: &GenerationContext,
    message: &MessageType,
    field: &FieldDescriptor,
    kind: &FieldKind,
    value: &TokenStream,
    map_key: bool,
) -> Result<TokenStream, Error> {
    let unsupported = || Error::UnsupportedKind {
        message: message.name.clone(),
        field: field.name.clone(),
        kind: if map_key {
            format!("{} map key", kind)
        } else {
            kind.to_string()
        },
    };

    if map_key && !kind.is_valid_map_key() {
        return Err(unsupported());
    }

    let tokens = match kind {
        FieldKind::Bool => scalar::bool_value(value, map_key),
        FieldKind::Integer(_) => scalar::integer(value, map_key),
        FieldKind::Double => scalar::double(value),
        FieldKind::Float => scalar::float(value),
        FieldKind::String => scalar::string(value),
        FieldKind::Bytes => scalar::bytes(value),
        FieldKind::Enum(_) => scalar::enumeration(value),
        FieldKind::Message(_) => scalar::message(value, &ctx.options.encode_method),
        FieldKind::Group(_) => return Err(unsupported()),
    };
    Ok(tokens)
}
