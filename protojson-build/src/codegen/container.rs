//! Field-level code: presence checks, keys and container shapes.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::context::{to_pascal_case, to_rust_field_name, GenerationContext};
use crate::schema::{Cardinality, FieldDescriptor, FieldKind, MessageType};
use crate::Error;

use super::dispatch::dispatch;

/// Comma bookkeeping and the `"name":` prefix of an emitted field.
fn key_prefix(name: &str) -> TokenStream {
    let key = Literal::byte_string(format!("\"{}\":", name).as_bytes());
    quote! {
        if write_comma {
            buf.put_u8(b',');
        }
        write_comma = true;
        buf.put_slice(#key);
    }
}

/// Generate the code emitting a field that is not a oneof member.
pub fn compose(
    ctx: &GenerationContext,
    message: &MessageType,
    field: &FieldDescriptor,
) -> Result<TokenStream, Error> {
    let ident = format_ident!("{}", to_rust_field_name(&field.name));
    let prefix = key_prefix(&field.name);
    let element = dispatch(ctx, message, field, &field.kind, &quote!(v), false)?;

    let tokens = match &field.cardinality {
        Cardinality::Singular => match &field.kind {
            FieldKind::Message(_) => quote! {
                if let ::core::option::Option::Some(v) = &self.#ident {
                    #prefix
                    #element
                }
            },
            kind => {
                let present = is_set(kind, &quote!(self.#ident));
                quote! {
                    if #present {
                        #prefix
                        let v = &self.#ident;
                        #element
                    }
                }
            }
        },
        Cardinality::Optional => quote! {
            if let ::core::option::Option::Some(v) = &self.#ident {
                #prefix
                #element
            }
        },
        Cardinality::Repeated => quote! {
            if !self.#ident.is_empty() {
                #prefix
                buf.put_u8(b'[');
                for (i, v) in self.#ident.iter().enumerate() {
                    if i > 0 {
                        buf.put_u8(b',');
                    }
                    #element
                }
                buf.put_u8(b']');
            }
        },
        Cardinality::Map { key } => {
            let key_element = dispatch(ctx, message, field, key, &quote!(k), true)?;
            quote! {
                if !self.#ident.is_empty() {
                    #prefix
                    buf.put_u8(b'{');
                    for (i, (k, v)) in self.#ident.iter().enumerate() {
                        if i > 0 {
                            buf.put_u8(b',');
                        }
                        #key_element
                        buf.put_u8(b':');
                        #element
                    }
                    buf.put_u8(b'}');
                }
            }
        }
        Cardinality::OneofMember(index) => {
            return Err(Error::UnknownOneof {
                message: message.name.clone(),
                field: field.name.clone(),
                index: *index,
            })
        }
    };
    Ok(tokens)
}

/// Generate the `match` emitting whichever member of oneof `index` is set.
pub fn compose_oneof(
    ctx: &GenerationContext,
    message: &MessageType,
    index: usize,
) -> Result<TokenStream, Error> {
    let oneof_name = message.oneofs.get(index).ok_or_else(|| Error::UnknownOneof {
        message: message.name.clone(),
        field: String::new(),
        index,
    })?;
    let ident = format_ident!("{}", to_rust_field_name(oneof_name));
    let enum_path = ctx.oneof_enum_path(&message.name, oneof_name)?;

    let arms = message
        .fields
        .iter()
        .filter(|f| f.cardinality == Cardinality::OneofMember(index))
        .map(|field| -> Result<TokenStream, Error> {
            let variant = format_ident!("{}", to_pascal_case(&field.name));
            let prefix = key_prefix(&field.name);
            let element = dispatch(ctx, message, field, &field.kind, &quote!(v), false)?;
            Ok(quote! {
                ::core::option::Option::Some(#enum_path::#variant(v)) => {
                    #prefix
                    #element
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        match &self.#ident {
            #(#arms)*
            ::core::option::Option::None => {}
        }
    })
}

/// Expression that is true when an implicit-presence field differs from the
/// zero value of its kind.
fn is_set(kind: &FieldKind, field: &TokenStream) -> TokenStream {
    match kind {
        FieldKind::Bool => quote!(#field),
        FieldKind::Integer(_) => quote!(#field != 0),
        FieldKind::Double | FieldKind::Float => quote!(#field != 0.0),
        FieldKind::String | FieldKind::Bytes => quote!(!#field.is_empty()),
        FieldKind::Enum(_) => quote!(::protojson::ProtoEnum::number(&#field) != 0),
        // Presence-tracked kinds never reach here; groups fail in dispatch.
        FieldKind::Message(_) | FieldKind::Group(_) => quote!(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaFile};
    use crate::Config;

    fn compose_one(field: FieldDescriptor) -> String {
        let message = MessageType::new(".pb.Holder").field(field);
        let schema = Schema::new().file(
            SchemaFile::new("t.proto", "pb")
                .message(message.clone())
                .message(MessageType::new(".pb.Other")),
        );
        let ctx = GenerationContext::new(&Config::new(), &schema).unwrap();
        compose(&ctx, &message, &message.fields[0]).unwrap().to_string()
    }

    #[test]
    fn test_zero_value_checks() {
        assert!(compose_one(FieldDescriptor::new("b", FieldKind::Bool)).contains("if self . b {"));
        assert!(compose_one(FieldDescriptor::new("n", FieldKind::uint32()))
            .contains("if self . n != 0 {"));
        assert!(compose_one(FieldDescriptor::new("f", FieldKind::Float))
            .contains("if self . f != 0.0 {"));
        assert!(compose_one(FieldDescriptor::new("s", FieldKind::String))
            .contains("if ! self . s . is_empty () {"));
    }

    #[test]
    fn test_singular_message_checks_presence() {
        let tokens = compose_one(FieldDescriptor::new("other", FieldKind::message(".pb.Other")));
        assert!(tokens.contains("Some (v) = & self . other"));
    }

    #[test]
    fn test_repeated_and_map_shapes() {
        let repeated = compose_one(FieldDescriptor::new("xs", FieldKind::int32()).repeated());
        assert!(repeated.contains("b'['"));
        assert!(repeated.contains("self . xs . iter () . enumerate ()"));

        let map = compose_one(FieldDescriptor::new("m", FieldKind::String).map(FieldKind::uint32()));
        assert!(map.contains("for (i , (k , v)) in self . m . iter () . enumerate ()"));
        assert!(map.contains("put_uint (& mut buf , * k as u64)"));
    }

    #[test]
    fn test_key_literal() {
        let tokens = compose_one(FieldDescriptor::new("numberX", FieldKind::int64()));
        assert!(tokens.contains(r#"b"\"numberX\":""#));
        assert!(tokens.contains("self . number_x"));
    }

    #[test]
    fn test_oneof_arms() {
        let message = MessageType::new(".pb.Choice").oneof(
            "kind",
            [
                FieldDescriptor::new("text", FieldKind::String),
                FieldDescriptor::new("count", FieldKind::uint64()),
            ],
        );
        let schema =
            Schema::new().file(SchemaFile::new("t.proto", "pb").message(message.clone()));
        let ctx = GenerationContext::new(&Config::new(), &schema).unwrap();
        let tokens = compose_oneof(&ctx, &message, 0).unwrap().to_string();
        assert!(tokens.contains("match & self . kind"));
        assert!(tokens.contains("choice :: Kind :: Text (v)"));
        assert!(tokens.contains("choice :: Kind :: Count (v)"));
        assert!(tokens.contains(":: core :: option :: Option :: None => { }"));
    }
}
