//! Enum code generation.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::context::{to_pascal_case, GenerationContext};
use crate::schema::EnumType;
use crate::Error;

/// Generate the `ProtoEnum` implementation for a proto enum.
///
/// The enum itself is declared next to the message types, with one variant
/// per value named in PascalCase.
pub fn generate_enum(ctx: &GenerationContext, enum_type: &EnumType) -> Result<TokenStream, Error> {
    let path = ctx.rust_type(&enum_type.name)?;

    let mut number_arms = Vec::with_capacity(enum_type.values.len());
    let mut name_arms = Vec::with_capacity(enum_type.values.len());
    for value in &enum_type.values {
        let variant = format_ident!("{}", to_pascal_case(&value.name));
        let number = proc_macro2::Literal::i32_unsuffixed(value.number);
        let name = &value.name;
        number_arms.push(quote!(Self::#variant => #number));
        name_arms.push(quote!(Self::#variant => #name));
    }

    Ok(quote! {
        impl ::protojson::ProtoEnum for #path {
            fn number(&self) -> i32 {
                match *self {
                    #(#number_arms,)*
                }
            }

            fn as_str_name(&self) -> &'static str {
                match *self {
                    #(#name_arms,)*
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaFile};
    use crate::Config;

    #[test]
    fn test_enum_impl() {
        let enum_type = EnumType::new(".pb.Type")
            .value("UNKNOWN", 0)
            .value("BOOL", 1)
            .value("NEGATIVE_ONE", -1);
        let schema = Schema::new()
            .file(SchemaFile::new("t.proto", "pb").enumeration(enum_type.clone()));
        let ctx = GenerationContext::new(&Config::new(), &schema).unwrap();

        let tokens = generate_enum(&ctx, &enum_type).unwrap().to_string();
        assert!(tokens.contains("impl :: protojson :: ProtoEnum for Type"));
        assert!(tokens.contains("Self :: Bool => 1"));
        assert!(tokens.contains("Self :: Bool => \"BOOL\""));

        // Negative literals are split into two tokens; check the formatted
        // source instead.
        let files = Config::new().generate(&schema).unwrap();
        assert_eq!(files.len(), 1);
        let content = &files[0].content;
        assert!(content.contains("Self::NegativeOne => -1,"), "{}", content);
        assert!(content.contains("Self::NegativeOne => \"NEGATIVE_ONE\","));
        assert!(content.contains("Self::Unknown => 0,"));
    }
}
