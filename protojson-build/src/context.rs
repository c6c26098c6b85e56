//! Generation context: resolved options and the type registry.

use std::collections::HashMap;

use proc_macro2::TokenStream;

use crate::config::{Config, GenerationOptions};
use crate::schema::{simple_name, Cardinality, FieldKind, Schema};
use crate::Error;

/// What a fully-qualified name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Whether this is a message type (otherwise an enum).
    pub is_message: bool,
    /// Whether the encoder is written by hand instead of generated.
    pub is_extern: bool,
    /// Path to the Rust type, relative to the module the generated code is
    /// included into.
    pub rust_path: String,
}

/// Context for code generation.
pub struct GenerationContext {
    /// Options every encoder reads.
    pub options: GenerationOptions,
    /// Map from fully-qualified type name -> type info.
    pub type_registry: HashMap<String, TypeInfo>,
}

impl GenerationContext {
    /// Resolve the configuration and register every type of `schema`.
    ///
    /// Fails on invalid options, duplicate names and references that do not
    /// resolve, before any code is generated.
    pub fn new(config: &Config, schema: &Schema) -> Result<Self, Error> {
        let options = config.resolve()?;
        let mut type_registry = HashMap::new();

        for name in &config.extern_messages {
            // Extern messages live next to the generated ones when they share
            // a package with some schema file.
            let package = schema
                .files
                .iter()
                .map(|f| f.package.as_str())
                .filter(|p| {
                    !p.is_empty()
                        && name
                            .trim_start_matches('.')
                            .strip_prefix(*p)
                            .is_some_and(|rest| rest.starts_with('.'))
                })
                .max_by_key(|p| p.len())
                .unwrap_or("");
            type_registry.insert(
                name.clone(),
                TypeInfo {
                    is_message: true,
                    is_extern: true,
                    rust_path: type_path(name, package),
                },
            );
        }

        for file in &schema.files {
            for message in &file.messages {
                if config.extern_messages.contains(&message.name) {
                    continue;
                }
                register(
                    &mut type_registry,
                    &message.name,
                    TypeInfo {
                        is_message: true,
                        is_extern: false,
                        rust_path: type_path(&message.name, &file.package),
                    },
                )?;
            }
            for enum_type in &file.enums {
                register(
                    &mut type_registry,
                    &enum_type.name,
                    TypeInfo {
                        is_message: false,
                        is_extern: false,
                        rust_path: type_path(&enum_type.name, &file.package),
                    },
                )?;
            }
        }

        let ctx = Self {
            options,
            type_registry,
        };
        ctx.check_references(schema)?;
        Ok(ctx)
    }

    /// Check that every Message and Enum kind resolves to a registered type
    /// of the right sort, and that oneof members point at declared groups.
    fn check_references(&self, schema: &Schema) -> Result<(), Error> {
        for message in schema.files.iter().flat_map(|f| &f.messages) {
            for field in &message.fields {
                let mut kinds = vec![&field.kind];
                match &field.cardinality {
                    Cardinality::Map { key } => kinds.push(key),
                    Cardinality::OneofMember(index) if *index >= message.oneofs.len() => {
                        return Err(Error::UnknownOneof {
                            message: message.name.clone(),
                            field: field.name.clone(),
                            index: *index,
                        });
                    }
                    _ => {}
                }

                for kind in kinds {
                    let (type_name, want_message) = match kind {
                        FieldKind::Message(name) => (name, true),
                        FieldKind::Enum(name) => (name, false),
                        _ => continue,
                    };
                    let info = self.type_registry.get(type_name).ok_or_else(|| {
                        Error::UnknownType {
                            message: message.name.clone(),
                            field: field.name.clone(),
                            type_name: type_name.clone(),
                        }
                    })?;
                    if info.is_message != want_message {
                        return Err(Error::KindMismatch {
                            message: message.name.clone(),
                            field: field.name.clone(),
                            type_name: type_name.clone(),
                            expected: if want_message { "a message" } else { "an enum" },
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Look up a registered type.
    pub fn lookup(&self, type_name: &str) -> Option<&TypeInfo> {
        self.type_registry.get(type_name)
    }

    /// Whether an encoder should be generated for the named message.
    pub fn is_generated(&self, type_name: &str) -> bool {
        self.lookup(type_name)
            .map(|info| info.is_message && !info.is_extern)
            .unwrap_or(false)
    }

    /// Rust path of a registered type, as tokens.
    pub fn rust_type(&self, type_name: &str) -> Result<TokenStream, Error> {
        path_tokens(&self.rust_path(type_name))
    }

    /// Path of the enum holding the members of a message's oneof group.
    ///
    /// The enum lives in the module named after the message:
    /// oneof `kind` of `.pb.Outer.Inner` is `outer::inner::Kind`.
    pub fn oneof_enum_path(&self, message_name: &str, oneof_name: &str) -> Result<TokenStream, Error> {
        let module = to_rust_field_name(simple_name(message_name));
        let rust_path = self.rust_path(message_name);
        let module = match rust_path.rsplit_once("::") {
            Some((parent, _)) => format!("{}::{}", parent, module),
            None => module,
        };
        path_tokens(&format!("{}::{}", module, to_pascal_case(oneof_name)))
    }

    fn rust_path(&self, type_name: &str) -> String {
        self.lookup(type_name)
            .map(|info| info.rust_path.clone())
            .unwrap_or_else(|| type_path(type_name, ""))
    }
}

fn path_tokens(path: &str) -> Result<TokenStream, Error> {
    let path: syn::Path = syn::parse_str(path)
        .map_err(|e| Error::SynParse(format!("Invalid type path '{}': {}", path, e)))?;
    Ok(quote::quote!(#path))
}

fn register(
    registry: &mut HashMap<String, TypeInfo>,
    name: &str,
    info: TypeInfo,
) -> Result<(), Error> {
    if registry.insert(name.to_string(), info).is_some() {
        return Err(Error::DuplicateType(name.to_string()));
    }
    Ok(())
}

/// Convert a fully-qualified type name to a Rust path relative to the
/// package module.
///
/// Enclosing messages become snake_case modules:
/// - ".pb.Number" (package "pb") -> "Number"
/// - ".pb.Outer.Inner" (package "pb") -> "outer::Inner"
/// - ".Outer.Inner" (no package) -> "outer::Inner"
pub fn type_path(full_name: &str, package: &str) -> String {
    let trimmed = full_name.trim_start_matches('.');
    let relative = if package.is_empty() {
        trimmed
    } else {
        trimmed
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(trimmed)
    };

    let components: Vec<&str> = relative.split('.').filter(|c| !c.is_empty()).collect();
    match components.split_last() {
        Some((last, parents)) => parents
            .iter()
            .map(|p| to_rust_field_name(p))
            .chain(std::iter::once(to_rust_type_name(last)))
            .collect::<Vec<_>>()
            .join("::"),
        None => String::new(),
    }
}

/// Convert proto name to valid Rust type identifier.
pub fn to_rust_type_name(name: &str) -> String {
    let ident = name.to_string();
    if is_rust_keyword(&ident) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

/// Convert proto field name to Rust field name (snake_case).
pub fn to_rust_field_name(name: &str) -> String {
    let snake = to_snake_case(name);
    if is_rust_keyword(&snake) {
        format!("r#{}", snake)
    } else {
        snake
    }
}

/// Convert a string to snake_case.
///
/// Handles consecutive uppercase letters correctly:
/// - "HTTPServer" -> "http_server"
/// - "numberX" -> "number_x"
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev_lower = chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit();
                let prev_upper = chars[i - 1].is_uppercase();
                let next_lower = chars.get(i + 1).map(|c| c.is_lowercase()).unwrap_or(false);
                if prev_lower || (prev_upper && next_lower) {
                    result.push('_');
                }
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert snake_case or SCREAMING_SNAKE_CASE to PascalCase.
///
/// - "number_x" -> "NumberX"
/// - "TYPE_BOOL" -> "TypeBool"
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    let rest: String = chars.collect();
                    let rest = if word.chars().all(|c| !c.is_lowercase()) {
                        rest.to_lowercase()
                    } else {
                        rest
                    };
                    first.to_uppercase().chain(rest.chars()).collect()
                }
            }
        })
        .collect()
}

/// Check if a string is a Rust keyword.
fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break"
            | "const"
            | "continue"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "gen"
            | "macro"
            | "override"
            | "priv"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
            | "try"
    )
}
