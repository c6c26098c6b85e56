//! Message encoder code generation.

use proc_macro2::TokenStream;
use quote::quote;

use crate::context::GenerationContext;
use crate::schema::{Cardinality, MessageType};
use crate::Error;

use super::container::{compose, compose_oneof};

/// Generate the encoder of a message: an inherent method writing the fields
/// in declaration order, plus the `MarshalJson` impl delegating to it.
pub fn generate_message(
    ctx: &GenerationContext,
    message: &MessageType,
) -> Result<TokenStream, Error> {
    let path = ctx.rust_type(&message.name)?;
    let method = &ctx.options.encode_method;
    let writer = &ctx.options.writer_type;
    let finish = &ctx.options.finish;

    let mut fields = Vec::with_capacity(message.fields.len());
    let mut oneofs_done = Vec::new();
    for field in &message.fields {
        if ctx.options.debug {
            tracing::debug!(
                message = %message.name,
                field = %field.name,
                kind = %field.kind,
                cardinality = ?field.cardinality,
                "composing field"
            );
        }
        let tokens = match field.cardinality {
            // A oneof group is written where its first member is declared.
            Cardinality::OneofMember(index) => {
                if oneofs_done.contains(&index) {
                    continue;
                }
                oneofs_done.push(index);
                compose_oneof(ctx, message, index)?
            }
            _ => compose(ctx, message, field)?,
        };
        fields.push(tokens);
    }

    let comma_flag = if fields.is_empty() {
        quote!()
    } else {
        quote!(let mut write_comma = false;)
    };

    Ok(quote! {
        impl #path {
            #[allow(unused_mut, unused_assignments, unused_variables)]
            pub fn #method(&self) -> ::core::result::Result<::std::vec::Vec<u8>, ::protojson::EncodeError> {
                use ::protojson::bytes::BufMut as _;

                let mut buf = <#writer as ::core::default::Default>::default();
                #comma_flag
                buf.put_u8(b'{');
                #(#fields)*
                buf.put_u8(b'}');
                ::core::result::Result::Ok(#finish)
            }
        }

        impl ::protojson::MarshalJson for #path {
            fn marshal_json(&self) -> ::core::result::Result<::std::vec::Vec<u8>, ::protojson::EncodeError> {
                #path::#method(self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, FieldKind, Schema, SchemaFile};
    use crate::Config;

    fn generate(config: &Config, message: MessageType) -> String {
        let schema =
            Schema::new().file(SchemaFile::new("t.proto", "pb").message(message.clone()));
        let ctx = GenerationContext::new(config, &schema).unwrap();
        generate_message(&ctx, &message).unwrap().to_string()
    }

    #[test]
    fn test_empty_message() {
        let tokens = generate(&Config::new(), MessageType::new(".pb.Empty"));
        assert!(tokens.contains("impl Empty"));
        assert!(!tokens.contains("write_comma"));
        assert!(tokens.contains("impl :: protojson :: MarshalJson for Empty"));
    }

    #[test]
    fn test_oneof_written_once() {
        let message = MessageType::new(".pb.Choice")
            .oneof(
                "kind",
                [
                    FieldDescriptor::new("a", FieldKind::String),
                    FieldDescriptor::new("b", FieldKind::Bool),
                ],
            )
            .field(FieldDescriptor::new("after", FieldKind::int32()));
        let tokens = generate(&Config::new(), message);
        assert_eq!(tokens.matches("match & self . kind").count(), 1);
        let oneof_at = tokens.find("match & self . kind").unwrap();
        let after_at = tokens.find("self . after").unwrap();
        assert!(oneof_at < after_at);
    }

    #[test]
    fn test_custom_writer_and_method() {
        let mut config = Config::new();
        config
            .encode_method_name("to_json")
            .writer("::std::vec", "Vec<u8>", "");
        let tokens = generate(&config, MessageType::new(".pb.Empty"));
        assert!(tokens.contains("pub fn to_json (& self)"));
        assert!(tokens.contains("< :: std :: vec :: Vec < u8 > as :: core :: default :: Default > :: default ()"));
        assert!(tokens.contains("Ok (buf)"));
        assert!(tokens.contains("Empty :: to_json (self)"));
    }
}
