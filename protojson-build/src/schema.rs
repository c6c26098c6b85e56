//! Resolved schema model handed to the generator.
//!
//! The schema front-end (protoc, a descriptor decoder, a hand-written
//! `build.rs`) is responsible for producing these values. Types refer to each
//! other by fully-qualified name (e.g. `.pb.Number`), never by ownership, so
//! recursive and mutually recursive messages are representable.

use std::fmt;

/// The members of the integer family.
///
/// All of them encode identically; the distinction is kept for diagnostics
/// and for documenting the Rust type the generated code expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerKind {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
}

impl IntegerKind {
    /// The protobuf spelling of the type.
    pub fn proto_name(self) -> &'static str {
        match self {
            IntegerKind::Int32 => "int32",
            IntegerKind::Int64 => "int64",
            IntegerKind::Uint32 => "uint32",
            IntegerKind::Uint64 => "uint64",
            IntegerKind::Sint32 => "sint32",
            IntegerKind::Sint64 => "sint64",
            IntegerKind::Fixed32 => "fixed32",
            IntegerKind::Fixed64 => "fixed64",
            IntegerKind::Sfixed32 => "sfixed32",
            IntegerKind::Sfixed64 => "sfixed64",
        }
    }
}

/// The declared kind of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Integer(IntegerKind),
    Double,
    Float,
    String,
    Bytes,
    /// An enum, by fully-qualified type name.
    Enum(String),
    /// A nested message, by fully-qualified type name.
    Message(String),
    /// Deprecated proto2 group. Present in schemas, never encodable.
    Group(String),
}

impl FieldKind {
    pub fn int32() -> Self {
        FieldKind::Integer(IntegerKind::Int32)
    }

    pub fn int64() -> Self {
        FieldKind::Integer(IntegerKind::Int64)
    }

    pub fn uint32() -> Self {
        FieldKind::Integer(IntegerKind::Uint32)
    }

    pub fn uint64() -> Self {
        FieldKind::Integer(IntegerKind::Uint64)
    }

    pub fn enumeration(type_name: impl Into<String>) -> Self {
        FieldKind::Enum(type_name.into())
    }

    pub fn message(type_name: impl Into<String>) -> Self {
        FieldKind::Message(type_name.into())
    }

    /// Whether values of this kind can be JSON object keys.
    pub fn is_valid_map_key(&self) -> bool {
        matches!(
            self,
            FieldKind::Bool | FieldKind::Integer(_) | FieldKind::String
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Integer(kind) => write!(f, "{}", kind.proto_name()),
            FieldKind::Double => write!(f, "double"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Bytes => write!(f, "bytes"),
            FieldKind::Enum(name) => write!(f, "enum {}", name),
            FieldKind::Message(name) => write!(f, "message {}", name),
            FieldKind::Group(name) => write!(f, "group {}", name),
        }
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    /// Implicit presence: the field is omitted while it holds its zero value.
    Singular,
    /// Explicit presence: the field is emitted whenever it is set.
    Optional,
    Repeated,
    /// A map from `key` to values of the field's own kind.
    Map { key: FieldKind },
    /// Member of the oneof group at this index of [`MessageType::oneofs`].
    OneofMember(usize),
}

/// A single field of a message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// JSON key, already in output casing.
    pub name: String,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
}

impl FieldDescriptor {
    /// A singular field with implicit presence.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cardinality: Cardinality::Singular,
        }
    }

    pub fn optional(mut self) -> Self {
        self.cardinality = Cardinality::Optional;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    /// Turn this field into a map keyed by `key`; the field's kind becomes
    /// the value kind.
    pub fn map(mut self, key: FieldKind) -> Self {
        self.cardinality = Cardinality::Map { key };
        self
    }
}

/// A message type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageType {
    /// Fully-qualified name, e.g. `.pb.Number`.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Names of the oneof groups declared by this message.
    pub oneofs: Vec<String>,
}

impl MessageType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a oneof group. The members are appended to the field list in
    /// the given order.
    pub fn oneof(
        mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Self {
        let index = self.oneofs.len();
        self.oneofs.push(name.into());
        for mut member in members {
            member.cardinality = Cardinality::OneofMember(index);
            self.fields.push(member);
        }
        self
    }}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

/// An enum type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumType {
    /// Fully-qualified name, e.g. `.pb.Type`.
    pub name: String,
    pub values: Vec<EnumValue>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            number,
        });
        self
    }
}

/// The types declared by one schema file. Produces one generated unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaFile {
    /// File name relative to the schema root, e.g. `module.proto`.
    pub name: String,
    pub package: String,
    pub messages: Vec<MessageType>,
    pub enums: Vec<EnumType>,
}

impl SchemaFile {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn message(mut self, message: MessageType) -> Self {
        self.messages.push(message);
        self
    }

    pub fn enumeration(mut self, enum_type: EnumType) -> Self {
        self.enums.push(enum_type);
        self
    }
}

/// A fully resolved schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub files: Vec<SchemaFile>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: SchemaFile) -> Self {
        self.files.push(file);
        self
    }
}

/// The last dot-separated component of a fully-qualified type name.
pub fn simple_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oneof_members_get_group_index() {
        let msg = MessageType::new(".pb.Choice")
            .field(FieldDescriptor::new("first", FieldKind::Bool))
            .oneof(
                "kind",
                [
                    FieldDescriptor::new("a", FieldKind::String),
                    FieldDescriptor::new("b", FieldKind::int32()),
                ],
            )
            .oneof("other", [FieldDescriptor::new("c", FieldKind::Bytes)]);

        assert_eq!(msg.oneofs, vec!["kind".to_string(), "other".to_string()]);
        let cards: Vec<_> = msg.fields.iter().map(|f| f.cardinality.clone()).collect();
        assert_eq!(
            cards,
            vec![
                Cardinality::Singular,
                Cardinality::OneofMember(0),
                Cardinality::OneofMember(0),
                Cardinality::OneofMember(1),
            ]
        );
    }

    #[test]
    fn test_map_key_kinds() {
        assert!(FieldKind::Bool.is_valid_map_key());
        assert!(FieldKind::uint64().is_valid_map_key());
        assert!(FieldKind::String.is_valid_map_key());
        assert!(!FieldKind::Double.is_valid_map_key());
        assert!(!FieldKind::Bytes.is_valid_map_key());
        assert!(!FieldKind::enumeration(".pb.Type").is_valid_map_key());
        assert!(!FieldKind::message(".pb.Number").is_valid_map_key());
    }

    #[test]
    fn test_kind_display() {
        let names: Vec<_> = [
            FieldKind::Bool,
            FieldKind::Integer(IntegerKind::Sint32),
            FieldKind::Integer(IntegerKind::Sfixed64),
            FieldKind::Double,
            FieldKind::Float,
            FieldKind::String,
            FieldKind::Bytes,
            FieldKind::enumeration(".pb.Type"),
            FieldKind::message(".pb.Number"),
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();

        insta::assert_snapshot!(names.join("\n"), @r#"
        bool
        sint32
        sfixed64
        double
        float
        string
        bytes
        enum .pb.Type
        message .pb.Number
        "#);

        assert_eq!(FieldKind::Group(".pb.G".into()).to_string(), "group .pb.G");
        assert_eq!(simple_name(".pb.Outer.Inner"), "Inner");
        assert_eq!(simple_name("Bare"), "Bare");
    }
}
