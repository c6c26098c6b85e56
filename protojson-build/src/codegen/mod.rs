//! Code generation from a resolved schema.

mod container;
mod dispatch;
mod enumeration;
mod message;
mod scalar;

use std::path::Path;

use proc_macro2::TokenStream;

use crate::config::Config;
use crate::context::GenerationContext;
use crate::schema::{Schema, SchemaFile};
use crate::Error;

/// One generated unit of code, produced per schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// `<file stem><suffix>`, e.g. `module.json.rs`.
    pub name: String,
    pub content: String,
}

/// Generate the encoders of every file of `schema`.
pub fn generate(config: &Config, schema: &Schema) -> Result<Vec<GeneratedFile>, Error> {
    let ctx = GenerationContext::new(config, schema)?;

    schema
        .files
        .iter()
        .map(|file| {
            tracing::debug!(
                file = %file.name,
                messages = file.messages.len(),
                enums = file.enums.len(),
                "generating encoders"
            );
            let tokens = generate_file(&ctx, file)?;
            Ok(GeneratedFile {
                name: output_name(&file.name, &ctx.options.file_name_suffix),
                content: format_code(tokens, config.skip_format)?,
            })
        })
        .collect()
}

/// Generate every unit, then write them all into the output directory.
///
/// Nothing is written unless every unit generated successfully.
pub fn write(config: &Config, schema: &Schema) -> Result<(), Error> {
    let out_dir = config
        .out_dir
        .clone()
        .or_else(|| std::env::var_os("OUT_DIR").map(Into::into))
        .ok_or(Error::MissingOutDir)?;

    let files = generate(config, schema)?;

    std::fs::create_dir_all(&out_dir)?;
    for file in files {
        let path = out_dir.join(&file.name);
        std::fs::write(&path, file.content)?;
        tracing::info!(path = %path.display(), "wrote generated encoders");
    }
    Ok(())
}

/// Generate code for a single schema file.
fn generate_file(ctx: &GenerationContext, file: &SchemaFile) -> Result<TokenStream, Error> {
    let mut tokens = TokenStream::new();

    for enum_type in &file.enums {
        tokens.extend(enumeration::generate_enum(ctx, enum_type)?);
    }

    for msg in &file.messages {
        if !ctx.is_generated(&msg.name) {
            tracing::debug!(message = %msg.name, "skipping extern message");
            continue;
        }
        tracing::debug!(message = %msg.name, fields = msg.fields.len(), "generating encoder");
        tokens.extend(message::generate_message(ctx, msg)?);
    }

    Ok(tokens)
}

/// `dir/module.proto` -> `module<suffix>`.
fn output_name(file_name: &str, suffix: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{}{}", stem, suffix)
}

fn format_code(tokens: TokenStream, skip_format: bool) -> Result<String, Error> {
    let header = "// @generated by protojson-build. DO NOT EDIT.\n\n";
    let body = if skip_format {
        tokens.to_string()
    } else {
        let file: syn::File =
            syn::parse2(tokens).map_err(|e| Error::SynParse(e.to_string()))?;
        prettyplease::unparse(&file)
    };
    Ok(format!("{}{}", header, body))
}
