use protojson_build::schema::{
    EnumType, FieldDescriptor, FieldKind, IntegerKind, MessageType, Schema, SchemaFile,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    protojson_build::Config::new()
        .extern_message(".pb.Faulty")
        .write(&module_schema())?;

    // Same generator, driven by a parameter string and writing into a plain
    // `Vec<u8>`.
    protojson_build::Config::from_params(
        "FileNameSuffix=.vec.rs,EncodeMethodName=to_json,ImportWriter=::std::vec,NewWriter=Vec<u8>,WriteBytes=",
    )?
    .write(&alt_schema())?;

    Ok(())
}

fn message(name: &str) -> FieldKind {
    FieldKind::message(format!(".pb.{}", name))
}

fn type_enum() -> FieldKind {
    FieldKind::enumeration(".pb.Type")
}

fn module_schema() -> Schema {
    let number = MessageType::new(".pb.Number")
        .field(FieldDescriptor::new("u32", FieldKind::uint32()))
        .field(FieldDescriptor::new("u64", FieldKind::uint64()))
        .field(FieldDescriptor::new("s32", FieldKind::Integer(IntegerKind::Sint32)))
        .field(FieldDescriptor::new("s64", FieldKind::Integer(IntegerKind::Sint64)))
        .field(FieldDescriptor::new("uf32", FieldKind::Integer(IntegerKind::Fixed32)))
        .field(FieldDescriptor::new("uf64", FieldKind::Integer(IntegerKind::Fixed64)))
        .field(FieldDescriptor::new("sf32", FieldKind::Integer(IntegerKind::Sfixed32)))
        .field(FieldDescriptor::new("sf64", FieldKind::Integer(IntegerKind::Sfixed64)))
        .field(FieldDescriptor::new("i32", FieldKind::int32()))
        .field(FieldDescriptor::new("i64", FieldKind::int64()))
        .field(FieldDescriptor::new("f64", FieldKind::Double))
        .field(FieldDescriptor::new("f32", FieldKind::Float));

    let text = MessageType::new(".pb.Text")
        .field(FieldDescriptor::new("str", FieldKind::String))
        .field(FieldDescriptor::new("bytes", FieldKind::Bytes));

    let flag = MessageType::new(".pb.Flag").field(FieldDescriptor::new("b", FieldKind::Bool));

    let msg = MessageType::new(".pb.Message")
        .field(FieldDescriptor::new("type", type_enum()))
        .field(FieldDescriptor::new("number", message("Number")))
        .field(FieldDescriptor::new("string", message("Text")))
        .field(FieldDescriptor::new("bool", message("Flag")));

    let array = MessageType::new(".pb.Array")
        .field(FieldDescriptor::new("numbers", message("Number")).repeated())
        .field(FieldDescriptor::new("strings", message("Text")).repeated())
        .field(FieldDescriptor::new("bools", message("Flag")).repeated())
        .field(FieldDescriptor::new("messages", message("Message")).repeated())
        .field(FieldDescriptor::new("arrays", message("Array")).repeated())
        .field(FieldDescriptor::new("types", type_enum()).repeated())
        .field(FieldDescriptor::new("u32s", FieldKind::uint32()).repeated())
        .field(FieldDescriptor::new("strs", FieldKind::String).repeated());

    let map = MessageType::new(".pb.Map")
        .field(FieldDescriptor::new("numbers", message("Number")).map(FieldKind::uint32()))
        .field(FieldDescriptor::new("strings", message("Text")).map(FieldKind::String))
        .field(FieldDescriptor::new("bools", message("Flag")).map(FieldKind::Bool))
        .field(FieldDescriptor::new("messages", message("Message")).map(FieldKind::String))
        .field(FieldDescriptor::new("arrays", message("Array")).map(FieldKind::String))
        .field(FieldDescriptor::new("types", type_enum()).map(FieldKind::int32()))
        .field(FieldDescriptor::new("u32s", FieldKind::uint32()).map(FieldKind::String))
        .field(FieldDescriptor::new("strs", FieldKind::String).map(FieldKind::String))
        .field(FieldDescriptor::new("empties", message("Empty")).map(FieldKind::String))
        .field(FieldDescriptor::new("optionals", message("Optional")).map(FieldKind::String));

    let oneof = MessageType::new(".pb.Oneof")
        .oneof(
            "oneof",
            [
                FieldDescriptor::new("string", message("Text")),
                FieldDescriptor::new("number", message("Number")),
                FieldDescriptor::new("flag", FieldKind::Bool),
            ],
        )
        .field(FieldDescriptor::new("numberX", message("Number")))
        .field(FieldDescriptor::new("stringX", message("Text")));

    let optional = MessageType::new(".pb.Optional")
        .field(FieldDescriptor::new("number", message("Number")))
        .field(FieldDescriptor::new("string", message("Text")))
        .field(FieldDescriptor::new("count", FieldKind::uint32()).optional())
        .field(FieldDescriptor::new("enabled", FieldKind::Bool).optional())
        .field(FieldDescriptor::new("label", FieldKind::String).optional())
        .field(FieldDescriptor::new("kind", type_enum()).optional());

    let node = MessageType::new(".pb.Node")
        .field(FieldDescriptor::new("value", FieldKind::int32()))
        .field(FieldDescriptor::new("next", message("Node")));

    let outer = MessageType::new(".pb.Outer")
        .field(FieldDescriptor::new("inner", message("Outer.Inner")))
        .field(FieldDescriptor::new("inners", message("Outer.Inner")).repeated());

    let inner = MessageType::new(".pb.Outer.Inner").oneof(
        "choice",
        [
            FieldDescriptor::new("text", FieldKind::String),
            FieldDescriptor::new("count", FieldKind::int64()),
        ],
    );

    let guarded = MessageType::new(".pb.Guarded")
        .field(FieldDescriptor::new("before", FieldKind::uint32()))
        .field(FieldDescriptor::new("faulty", message("Faulty")))
        .field(FieldDescriptor::new("after", FieldKind::uint32()));

    // The first value of `Mode` is a meaningful one rather than an
    // `UNKNOWN` placeholder.
    let setting = MessageType::new(".pb.Setting")
        .field(FieldDescriptor::new("mode", FieldKind::enumeration(".pb.Mode")))
        .field(FieldDescriptor::new("flag", FieldKind::Bool))
        .field(FieldDescriptor::new("modes", FieldKind::enumeration(".pb.Mode")).map(FieldKind::int32()))
        .field(FieldDescriptor::new("history", FieldKind::enumeration(".pb.Mode")).repeated());

    let modes = EnumType::new(".pb.Mode").value("BOOL", 0).value("NUMBER", 1);

    let types = EnumType::new(".pb.Type")
        .value("UNKNOWN", 0)
        .value("BOOL", 1)
        .value("NUMBER", 2)
        .value("STRING", 3);

    Schema::new().file(
        SchemaFile::new("module.proto", "pb")
            .enumeration(types)
            .enumeration(modes)
            .message(number)
            .message(text)
            .message(flag)
            .message(msg)
            .message(MessageType::new(".pb.Empty"))
            .message(array)
            .message(map)
            .message(oneof)
            .message(optional)
            .message(node)
            .message(outer)
            .message(inner)
            .message(guarded)
            .message(setting),
    )
}

fn alt_schema() -> Schema {
    Schema::new().file(
        SchemaFile::new("alt.proto", "alt").message(
            MessageType::new(".alt.Point")
                .field(FieldDescriptor::new("x", FieldKind::Double))
                .field(FieldDescriptor::new("y", FieldKind::Float))
                .field(FieldDescriptor::new("tags", FieldKind::String).repeated()),
        ),
    )
}
