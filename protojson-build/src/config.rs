//! Configuration for JSON encoder generation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use proc_macro2::{Ident, TokenStream};
use quote::ToTokens;

use crate::error::ConfigError;
use crate::schema::Schema;

/// Option names accepted by [`Config::from_params`].
pub const OPTION_KEYS: [&str; 6] = [
    "FileNameSuffix",
    "EncodeMethodName",
    "ImportWriter",
    "NewWriter",
    "WriteBytes",
    "Debug",
];

const DEFAULT_FILE_NAME_SUFFIX: &str = ".json.rs";
const DEFAULT_ENCODE_METHOD_NAME: &str = "marshal_json";
const DEFAULT_IMPORT_WRITER: &str = "::protojson::bytes";
const DEFAULT_NEW_WRITER: &str = "BytesMut";
const DEFAULT_WRITE_BYTES: &str = ".to_vec()";

/// Configuration for JSON encoder generation.
///
/// Options left unset fall back to their defaults when the configuration is
/// resolved, right before generation starts.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Output directory for generated files.
    pub(crate) out_dir: Option<PathBuf>,

    /// Suffix appended to the schema file stem, e.g. `.json.rs`.
    pub(crate) file_name_suffix: Option<String>,

    /// Name of the generated inherent encode method.
    pub(crate) encode_method_name: Option<String>,

    /// Module path holding the buffer type.
    pub(crate) import_writer: Option<String>,

    /// Buffer type inside `import_writer`.
    pub(crate) new_writer: Option<String>,

    /// Accessor turning the buffer into the returned `Vec<u8>`.
    pub(crate) write_bytes: Option<String>,

    /// Emit per-field tracing while generating.
    pub(crate) debug: bool,

    /// Messages whose encoders are written by hand.
    pub(crate) extern_messages: BTreeSet<String>,

    /// Disable formatting with prettyplease.
    pub(crate) skip_format: bool,
}

impl Config {
    /// Create a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat, comma-separated `key=value` parameter list.
    ///
    /// ```
    /// let config = protojson_build::Config::from_params(
    ///     "EncodeMethodName=to_json, FileNameSuffix=.enc.rs, Debug=TRUE",
    /// )
    /// .unwrap();
    /// # let _ = config;
    /// ```
    pub fn from_params(params: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for token in params.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| ConfigError::Malformed {
                    token: token.to_string(),
                })?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() {
                return Err(ConfigError::Malformed {
                    token: token.to_string(),
                });
            }
            config.set(key, value)?;
        }
        Ok(config)
    }

    /// Set a single option by name, as it would appear in a parameter list.
    pub fn set(&mut self, key: &str, value: &str) -> Result<&mut Self, ConfigError> {
        let value = (!value.is_empty()).then(|| value.to_string());
        match key {
            "FileNameSuffix" => self.file_name_suffix = value,
            "EncodeMethodName" => self.encode_method_name = value,
            "ImportWriter" => self.import_writer = value,
            "NewWriter" => self.new_writer = value,
            "WriteBytes" => self.write_bytes = value,
            "Debug" => self.debug = value.as_deref().map(parse_flag).unwrap_or(false),
            _ => {
                return Err(ConfigError::UnknownKey {
                    token: key.to_string(),
                })
            }
        }
        Ok(self)
    }

    /// Set the output directory for generated files.
    pub fn out_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.out_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Suffix of generated file names.
    pub fn file_name_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.file_name_suffix = Some(suffix.into());
        self
    }

    /// Name of the generated encode method.
    pub fn encode_method_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.encode_method_name = Some(name.into());
        self
    }

    /// Buffer used by generated encoders: `import::new_writer` is the type,
    /// `write_bytes` the accessor producing the returned `Vec<u8>`.
    ///
    /// # Example
    /// ```ignore
    /// config.writer("::std::vec", "Vec<u8>", "");
    /// ```
    pub fn writer(
        &mut self,
        import: impl Into<String>,
        new_writer: impl Into<String>,
        write_bytes: impl Into<String>,
    ) -> &mut Self {
        self.import_writer = Some(import.into());
        self.new_writer = Some(new_writer.into());
        self.write_bytes = Some(write_bytes.into());
        self
    }

    /// Emit per-field tracing events while generating.
    pub fn debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    /// Declare a message whose encoder is written by hand.
    ///
    /// Fields may reference it, but no encoder is generated for it, even when
    /// the schema declares it.
    pub fn extern_message(&mut self, name: impl Into<String>) -> &mut Self {
        self.extern_messages.insert(name.into());
        self
    }

    /// Skip formatting with prettyplease.
    pub fn skip_format(&mut self) -> &mut Self {
        self.skip_format = true;
        self
    }

    /// Generate encoders for every file of `schema`, in memory.
    pub fn generate(&self, schema: &Schema) -> Result<Vec<crate::GeneratedFile>, crate::Error> {
        crate::codegen::generate(self, schema)
    }

    /// Generate encoders and write them into the output directory.
    pub fn write(&self, schema: &Schema) -> Result<(), crate::Error> {
        crate::codegen::write(self, schema)
    }

    /// Apply defaults and validate every option.
    pub fn resolve(&self) -> Result<GenerationOptions, ConfigError> {
        let file_name_suffix = self
            .file_name_suffix
            .clone()
            .unwrap_or_else(|| DEFAULT_FILE_NAME_SUFFIX.to_string());

        let method = self
            .encode_method_name
            .as_deref()
            .unwrap_or(DEFAULT_ENCODE_METHOD_NAME);
        let encode_method: Ident =
            syn::parse_str(method).map_err(|e| ConfigError::InvalidValue {
                key: "EncodeMethodName",
                value: method.to_string(),
                reason: e.to_string(),
            })?;

        // The module and the type inside it are only meaningful as a pair.
        let (import, new_writer) = match (&self.import_writer, &self.new_writer) {
            (None, None) => (DEFAULT_IMPORT_WRITER, DEFAULT_NEW_WRITER),
            (Some(import), Some(new_writer)) => (import.as_str(), new_writer.as_str()),
            (Some(import), None) => {
                return Err(ConfigError::InvalidValue {
                    key: "ImportWriter",
                    value: import.clone(),
                    reason: "NewWriter must be set as well".to_string(),
                })
            }
            (None, Some(new_writer)) => {
                return Err(ConfigError::InvalidValue {
                    key: "NewWriter",
                    value: new_writer.clone(),
                    reason: "ImportWriter must be set as well".to_string(),
                })
            }
        };
        let writer_path = format!("{}::{}", import.trim_end_matches("::"), new_writer);
        let writer_type: syn::Type =
            syn::parse_str(&writer_path).map_err(|e| ConfigError::InvalidValue {
                key: "NewWriter",
                value: writer_path.clone(),
                reason: e.to_string(),
            })?;

        let write_bytes = self.write_bytes.as_deref().unwrap_or(DEFAULT_WRITE_BYTES);
        let finish: syn::Expr = syn::parse_str(&format!("buf{}", write_bytes)).map_err(|e| {
            ConfigError::InvalidValue {
                key: "WriteBytes",
                value: write_bytes.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(GenerationOptions {
            file_name_suffix,
            encode_method,
            writer_type: writer_type.into_token_stream(),
            finish: finish.into_token_stream(),
            debug: self.debug,
        })
    }
}

/// Options resolved from a [`Config`], in the form the generator consumes.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub file_name_suffix: String,
    /// Identifier of the generated encode method.
    pub encode_method: Ident,
    /// Buffer type, e.g. `::protojson::bytes::BytesMut`.
    pub writer_type: TokenStream,
    /// Expression over `buf` producing the returned bytes.
    pub finish: TokenStream,
    pub debug: bool,
}

/// Lenient boolean flag: `true`, `t` and `1` in any case, anything else is
/// false.
fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "t" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Config::new().resolve().unwrap();
        assert_eq!(options.file_name_suffix, ".json.rs");
        assert_eq!(options.encode_method.to_string(), "marshal_json");
        assert_eq!(
            options.writer_type.to_string(),
            ":: protojson :: bytes :: BytesMut"
        );
        assert_eq!(options.finish.to_string(), "buf . to_vec ()");
        assert!(!options.debug);
    }

    #[test]
    fn test_from_params() {
        let config = Config::from_params(
            " FileNameSuffix=.enc.rs , EncodeMethodName = to_json,ImportWriter=::std::vec,NewWriter=Vec<u8>,WriteBytes=,Debug=True,",
        )
        .unwrap();
        assert!(config.debug);
        // An empty value means "use the default".
        assert_eq!(config.write_bytes, None);

        let options = config.resolve().unwrap();
        assert_eq!(options.file_name_suffix, ".enc.rs");
        assert_eq!(options.encode_method.to_string(), "to_json");
        assert_eq!(options.writer_type.to_string(), ":: std :: vec :: Vec < u8 >");
        assert_eq!(options.finish.to_string(), "buf . to_vec ()");
    }

    #[test]
    fn test_empty_params() {
        let config = Config::from_params("").unwrap();
        assert!(config.resolve().is_ok());
        let config = Config::from_params(" , ,").unwrap();
        assert_eq!(config.encode_method_name, None);
    }

    #[test]
    fn test_vec_writer_without_accessor() {
        let mut config = Config::new();
        config.writer("::std::vec", "Vec<u8>", "");
        let options = config.resolve().unwrap();
        assert_eq!(options.finish.to_string(), "buf");
    }

    #[test]
    fn test_partial_writer_rejected() {
        let err = Config::from_params("ImportWriter=::std::vec")
            .unwrap()
            .resolve()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "ImportWriter",
                value: "::std::vec".to_string(),
                reason: "NewWriter must be set as well".to_string(),
            }
        );

        let err = Config::from_params("NewWriter=Vec<u8>")
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "NewWriter", .. }));

        // An empty value is the same as leaving the option out.
        assert!(Config::from_params("ImportWriter=,NewWriter=")
            .unwrap()
            .resolve()
            .is_ok());
    }

    #[test]
    fn test_debug_flag_values() {
        for value in ["true", "TRUE", "t", "T", "1"] {
            let config = Config::from_params(&format!("Debug={}", value)).unwrap();
            assert!(config.debug, "{} should enable debug", value);
        }
        for value in ["false", "yes", "0", "", "on"] {
            let config = Config::from_params(&format!("Debug={}", value)).unwrap();
            assert!(!config.debug, "{} should not enable debug", value);
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = Config::from_params("FileNameSuffix=.x.rs,Verbose=true").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownKey {
                token: "Verbose".to_string()
            }
        );
        assert!(err.to_string().contains("Verbose"));

        // Keys are matched exactly.
        assert!(Config::from_params("debug=true").is_err());
    }

    #[test]
    fn test_malformed_token() {
        let err = Config::from_params("EncodeMethodName=to_json,Debug").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Malformed {
                token: "Debug".to_string()
            }
        );
        assert!(Config::from_params("=value").is_err());
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_params("EncodeMethodName=to json")
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "EncodeMethodName",
                ..
            }
        ));
        assert!(err.to_string().contains("to json"));

        let err = Config::from_params("ImportWriter=::bytes,NewWriter=Bytes Mut")
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "NewWriter", .. }));

        let err = Config::from_params("WriteBytes=.(")
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "WriteBytes", .. }));
    }
}
