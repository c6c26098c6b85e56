//! Write instructions for single values.
//!
//! Every function takes the expression naming the value, which is always a
//! reference, and returns statements writing into `buf`.

use proc_macro2::{Ident, TokenStream};
use quote::quote;

/// Wrap `inner` in a pair of literal quotes when `quoted` is set.
fn quote_if(quoted: bool, inner: TokenStream) -> TokenStream {
    if quoted {
        quote! {
            buf.put_u8(b'"');
            #inner
            buf.put_u8(b'"');
        }
    } else {
        inner
    }
}

pub fn bool_value(value: &TokenStream, map_key: bool) -> TokenStream {
    let (yes, no) = if map_key {
        (quote!(b"\"true\""), quote!(b"\"false\""))
    } else {
        (quote!(b"true"), quote!(b"false"))
    };
    quote! {
        if *#value {
            buf.put_slice(#yes);
        } else {
            buf.put_slice(#no);
        }
    }
}

/// Every integer width goes through the same unsigned writer.
pub fn integer(value: &TokenStream, map_key: bool) -> TokenStream {
    quote_if(
        map_key,
        quote! {
            ::protojson::encode::put_uint(&mut buf, *#value as u64);
        },
    )
}

pub fn double(value: &TokenStream) -> TokenStream {
    quote! {
        ::protojson::encode::put_f64(&mut buf, *#value);
    }
}

pub fn float(value: &TokenStream) -> TokenStream {
    quote! {
        ::protojson::encode::put_f32(&mut buf, *#value);
    }
}

/// Raw contents; nothing is escaped.
pub fn string(value: &TokenStream) -> TokenStream {
    quote_if(
        true,
        quote! {
            buf.put_slice(#value.as_bytes());
        },
    )
}

pub fn bytes(value: &TokenStream) -> TokenStream {
    quote_if(
        true,
        quote! {
            ::protojson::encode::put_base64(&mut buf, #value);
        },
    )
}

pub fn enumeration(value: &TokenStream) -> TokenStream {
    quote_if(
        true,
        quote! {
            buf.put_slice(::protojson::ProtoEnum::as_str_name(#value).as_bytes());
        },
    )
}

/// Delegate to the referenced type's own encoder and copy its output.
pub fn message(value: &TokenStream, method: &Ident) -> TokenStream {
    quote! {
        let data = #value.#method()?;
        buf.put_slice(&data);
    }
}
