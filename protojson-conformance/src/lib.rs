//! Message types exercised by the conformance tests.
//!
//! The types are declared by hand; their encoders are generated by
//! `build.rs` and included below.

use std::collections::{BTreeMap, HashMap};

use protojson::EncodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    #[default]
    Unknown,
    Bool,
    Number,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Bool,
    Number,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Setting {
    pub mode: Mode,
    pub flag: bool,
    pub modes: BTreeMap<i32, Mode>,
    pub history: Vec<Mode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Number {
    pub u32: u32,
    pub u64: u64,
    pub s32: i32,
    pub s64: i64,
    pub uf32: u32,
    pub uf64: u64,
    pub sf32: i32,
    pub sf64: i64,
    pub i32: i32,
    pub i64: i64,
    pub f64: f64,
    pub f32: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub str: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flag {
    pub b: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub r#type: Type,
    pub number: Option<Number>,
    pub string: Option<Text>,
    pub bool: Option<Flag>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Empty {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    pub numbers: Vec<Number>,
    pub strings: Vec<Text>,
    pub bools: Vec<Flag>,
    pub messages: Vec<Message>,
    pub arrays: Vec<Array>,
    pub types: Vec<Type>,
    pub u32s: Vec<u32>,
    pub strs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub numbers: HashMap<u32, Number>,
    pub strings: HashMap<String, Text>,
    pub bools: HashMap<bool, Flag>,
    pub messages: HashMap<String, Message>,
    pub arrays: HashMap<String, Array>,
    pub types: BTreeMap<i32, Type>,
    pub u32s: HashMap<String, u32>,
    pub strs: HashMap<String, String>,
    pub empties: HashMap<String, Empty>,
    pub optionals: HashMap<String, Optional>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Oneof {
    pub oneof: Option<oneof::Oneof>,
    pub number_x: Option<Number>,
    pub string_x: Option<Text>,
}

pub mod oneof {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Oneof {
        String(super::Text),
        Number(super::Number),
        Flag(bool),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Optional {
    pub number: Option<Number>,
    pub string: Option<Text>,
    pub count: Option<u32>,
    pub enabled: Option<bool>,
    pub label: Option<String>,
    pub kind: Option<Type>,
}

/// A linked list, to exercise self-referencing messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outer {
    pub inner: Option<outer::Inner>,
    pub inners: Vec<outer::Inner>,
}

pub mod outer {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Inner {
        pub choice: Option<inner::Choice>,
    }

    pub mod inner {
        #[derive(Debug, Clone, PartialEq)]
        pub enum Choice {
            Text(String),
            Count(i64),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guarded {
    pub before: u32,
    pub faulty: Option<Faulty>,
    pub after: u32,
}

/// A message with a hand-written encoder that can be told to fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Faulty {
    pub fail: bool,
}

impl Faulty {
    pub fn marshal_json(&self) -> Result<Vec<u8>, EncodeError> {
        if self.fail {
            return Err(EncodeError::message("Faulty", "refusing to encode"));
        }
        Ok(b"\"ok\"".to_vec())
    }
}

include!(concat!(env!("OUT_DIR"), "/module.json.rs"));

/// Encoded into a `Vec<u8>` by a `to_json` method.
pub mod alt {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Point {
        pub x: f64,
        pub y: f32,
        pub tags: Vec<String>,
    }

    include!(concat!(env!("OUT_DIR"), "/alt.vec.rs"));
}
