//! Structured description of a parsed Bro log header.

use serde::Serialize;

use crate::types::FieldKind;

/// First capture index available to non-timestamp columns.
///
/// Index 1 of the grammar's match table always holds the timestamp.
pub const FIRST_FIELD_POSITION: usize = 2;

/// One column of a Bro log, as seen by the generated grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Column name from the `#fields` row.
    pub name: String,
    /// 1-based index into the grammar's match table.
    pub position: usize,
    /// Coercion applied to the captured value.
    pub kind: FieldKind,
    /// Type tag from the `#types` row, verbatim.
    pub type_tag: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, position: usize, type_tag: impl Into<String>) -> Self {
        let type_tag = type_tag.into();
        Self {
            name: name.into(),
            position,
            kind: FieldKind::classify(&type_tag),
            type_tag,
        }
    }
}

/// Everything the code generator needs to know about a log header.
///
/// Built once by [`crate::parse_header`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderDescriptor {
    /// Decoded column separator.
    pub separator: String,
    /// The separator as a quoted Lua literal.
    pub escaped_separator: String,
    /// Token marking a present but empty value.
    pub empty_marker: String,
    /// Token marking an unset value.
    pub unset_marker: String,
    /// Value of `#path`; becomes the message type.
    pub record_type: String,
    /// Columns between the timestamp and the last column.
    pub fields: Vec<FieldDescriptor>,
    /// Final column. Its capture may carry a trailing newline.
    pub last_field: FieldDescriptor,
    /// Header lines exactly as read.
    pub raw_lines: Vec<String>,
}

impl HeaderDescriptor {
    /// All columns after the timestamp, last column included.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().chain(std::iter::once(&self.last_field))
    }

    /// Number of columns after the timestamp.
    pub fn field_count(&self) -> usize {
        self.fields.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_follows_type_tag() {
        let field = FieldDescriptor::new("orig_bytes", 2, "count");
        assert_eq!(field.kind, FieldKind::Numeric);
        let field = FieldDescriptor::new("uid", 3, "string");
        assert_eq!(field.kind, FieldKind::Textual);
        assert_eq!(field.type_tag, "string");
    }

    #[test]
    fn descriptor_serializes() {
        let header = HeaderDescriptor {
            separator: "\t".to_string(),
            escaped_separator: "\"\\t\"".to_string(),
            empty_marker: "(empty)".to_string(),
            unset_marker: "-".to_string(),
            record_type: "conn".to_string(),
            fields: vec![FieldDescriptor::new("uid", 2, "string")],
            last_field: FieldDescriptor::new("duration", 3, "interval"),
            raw_lines: vec![],
        };
        let json = serde_json::to_value(&header).expect("serialize header");
        assert_eq!(json["record_type"], "conn");
        assert_eq!(json["fields"][0]["kind"], "Textual");
        assert_eq!(json["last_field"]["position"], 3);
        assert_eq!(header.field_count(), 2);
        assert_eq!(
            header.all_fields().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            ["uid", "duration"]
        );
    }
}
