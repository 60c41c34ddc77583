//! Bro type tags and the generic value kinds they coerce to.
//!
//! Every column in a Bro log carries a type tag in the `#types` row. The
//! generated parser only distinguishes two coercions, so each tag maps to a
//! [`FieldKind`]: numbers become Lua numbers, everything else stays a string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generic value kind used when coercing a captured column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Coerced with `tonumber`, defaulting to `0`.
    Numeric,
    /// Kept verbatim, defaulting to `""`.
    Textual,
}

impl FieldKind {
    /// Classify a Bro type tag.
    ///
    /// Unknown tags are treated as text.
    pub fn classify(tag: &str) -> Self {
        tag.parse::<BroType>()
            .map(|bro_type| bro_type.kind())
            .unwrap_or(FieldKind::Textual)
    }

    /// Name of the Lua coercion helper for this kind.
    pub fn helper_name(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "toNumber",
            FieldKind::Textual => "toString",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Numeric => f.write_str("Numeric"),
            FieldKind::Textual => f.write_str("Textual"),
        }
    }
}

/// Type tags that appear in a Bro `#types` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroType {
    Void,
    Bool,
    Int,
    Count,
    Counter,
    Double,
    Time,
    Interval,
    String,
    Pattern,
    Enum,
    Port,
    Addr,
    Subnet,
    Any,
    Table,
    Set,
    Vector,
    Record,
    Opaque,
    File,
}

impl BroType {
    /// Returns the tag as written in the log header.
    pub fn as_str(&self) -> &'static str {
        match self {
            BroType::Void => "void",
            BroType::Bool => "bool",
            BroType::Int => "int",
            BroType::Count => "count",
            BroType::Counter => "counter",
            BroType::Double => "double",
            BroType::Time => "time",
            BroType::Interval => "interval",
            BroType::String => "string",
            BroType::Pattern => "pattern",
            BroType::Enum => "enum",
            BroType::Port => "port",
            BroType::Addr => "addr",
            BroType::Subnet => "subnet",
            BroType::Any => "any",
            BroType::Table => "table",
            BroType::Set => "set",
            BroType::Vector => "vector",
            BroType::Record => "record",
            BroType::Opaque => "opaque",
            BroType::File => "file",
        }
    }

    /// Generic kind the generated parser coerces this type to.
    pub fn kind(&self) -> FieldKind {
        match self {
            BroType::Int | BroType::Count | BroType::Counter | BroType::Double | BroType::Port => {
                FieldKind::Numeric
            }
            _ => FieldKind::Textual,
        }
    }
}

impl fmt::Display for BroType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BroType {
    type Err = String;

    /// Parses a tag; container spellings like `set[string]` parse as the container.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((container, rest)) = s.split_once('[')
            && rest.ends_with(']')
        {
            return match container {
                "table" => Ok(BroType::Table),
                "set" => Ok(BroType::Set),
                "vector" => Ok(BroType::Vector),
                _ => Err(format!("unknown Bro type: {s}")),
            };
        }
        match s {
            "void" => Ok(BroType::Void),
            "bool" => Ok(BroType::Bool),
            "int" => Ok(BroType::Int),
            "count" => Ok(BroType::Count),
            "counter" => Ok(BroType::Counter),
            "double" => Ok(BroType::Double),
            "time" => Ok(BroType::Time),
            "interval" => Ok(BroType::Interval),
            "string" => Ok(BroType::String),
            "pattern" => Ok(BroType::Pattern),
            "enum" => Ok(BroType::Enum),
            "port" => Ok(BroType::Port),
            "addr" => Ok(BroType::Addr),
            "subnet" => Ok(BroType::Subnet),
            "any" => Ok(BroType::Any),
            "table" => Ok(BroType::Table),
            "set" => Ok(BroType::Set),
            "vector" => Ok(BroType::Vector),
            "record" => Ok(BroType::Record),
            "opaque" => Ok(BroType::Opaque),
            "file" => Ok(BroType::File),
            _ => Err(format!("unknown Bro type: {s}")),
        }
    }
}
