//! Header parsing.
//!
//! A Bro log opens with a block of `#` directives:
//!
//! ```text
//! #separator \x09
//! #set_separator	,
//! #empty_field	(empty)
//! #unset_field	-
//! #path	conn
//! #open	2016-01-01-00-00-00
//! #fields	ts	uid	id.orig_h	...
//! #types	time	string	addr	...
//! ```
//!
//! `#separator` is space-delimited and hex-escaped; every other directive is
//! split on the separator it declares. Directives are looked up by name, so
//! their order in the block does not matter.

use tracing::{debug, trace};

use crate::descriptor::{FIRST_FIELD_POSITION, FieldDescriptor, HeaderDescriptor};
use crate::error::{HeaderError, Result};
use crate::literal::quote_literal;

/// Separator directive.
pub const SEPARATOR: &str = "#separator";
/// Empty-field marker directive.
pub const EMPTY_FIELD: &str = "#empty_field";
/// Unset-field marker directive.
pub const UNSET_FIELD: &str = "#unset_field";
/// Record path directive.
pub const PATH: &str = "#path";
/// Field name directive.
pub const FIELDS: &str = "#fields";
/// Field type directive.
pub const TYPES: &str = "#types";

/// Prefix of the hex escape in the `#separator` line.
const HEX_ESCAPE: &str = "\\x";

/// Parse raw header lines into a [`HeaderDescriptor`].
pub fn parse_header(lines: &[String]) -> Result<HeaderDescriptor> {
    let separator_token = separator_token(lines)?;
    let separator = decode_separator(separator_token)?;
    debug!(token = separator_token, separator = ?separator, "decoded separator");

    let directives = Directives::new(lines, &separator);
    let empty_marker = directives.value(EMPTY_FIELD)?;
    let unset_marker = directives.value(UNSET_FIELD)?;
    let record_type = directives.value(PATH)?;
    let names = directives.columns(FIELDS)?;
    let types = directives.columns(TYPES)?;

    let (fields, last_field) = build_fields(&names, &types)?;
    debug!(
        path = %record_type,
        fields = fields.len() + 1,
        "parsed header"
    );

    Ok(HeaderDescriptor {
        escaped_separator: quote_literal(&separator),
        separator,
        empty_marker,
        unset_marker,
        record_type,
        fields,
        last_field,
        raw_lines: lines.to_vec(),
    })
}

/// Locate the `#separator` line and return its value token.
fn separator_token(lines: &[String]) -> Result<&str> {
    let mut matches = lines
        .iter()
        .filter(|line| line.split(' ').next() == Some(SEPARATOR));
    let line = matches
        .next()
        .ok_or_else(|| HeaderError::missing_directive(SEPARATOR))?;
    if matches.next().is_some() {
        return Err(HeaderError::DuplicateDirective {
            directive: SEPARATOR,
        });
    }
    line.split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| HeaderError::missing_value(SEPARATOR))
}

/// Decode a `\xNN` token into the literal separator.
///
/// Consecutive escapes (`\x09\x09`) decode to a multi-byte separator.
pub fn decode_separator(token: &str) -> Result<String> {
    let Some(digits) = token.strip_prefix(HEX_ESCAPE) else {
        return Err(HeaderError::invalid_separator(
            token,
            "expected a \\x hex escape",
        ));
    };
    let bytes = hex::decode(digits.replace(HEX_ESCAPE, ""))
        .map_err(|e| HeaderError::invalid_separator(token, e.to_string()))?;
    if bytes.is_empty() {
        return Err(HeaderError::invalid_separator(token, "decodes to nothing"));
    }
    String::from_utf8(bytes).map_err(|_| HeaderError::invalid_separator(token, "not valid UTF-8"))
}

/// Header lines split on the decoded separator.
struct Directives<'a> {
    rows: Vec<Vec<&'a str>>,
}

impl<'a> Directives<'a> {
    fn new(lines: &'a [String], separator: &str) -> Self {
        let rows: Vec<Vec<&str>> = lines
            .iter()
            .filter(|line| line.starts_with('#'))
            .map(|line| line.split(separator).collect())
            .collect();
        for row in &rows {
            let name = row[0];
            if ![EMPTY_FIELD, UNSET_FIELD, PATH, FIELDS, TYPES].contains(&name)
                && name.split(' ').next() != Some(SEPARATOR)
            {
                debug!(directive = name, "ignoring header directive");
            }
        }
        Self { rows }
    }

    /// Tokens following the directive `name`.
    fn tokens(&self, name: &'static str) -> Result<&[&'a str]> {
        let mut matches = self.rows.iter().filter(|row| row[0] == name);
        let row = matches
            .next()
            .ok_or_else(|| HeaderError::missing_directive(name))?;
        if matches.next().is_some() {
            return Err(HeaderError::DuplicateDirective { directive: name });
        }
        Ok(&row[1..])
    }

    /// The single value of a `#name<sep>value` directive.
    fn value(&self, name: &'static str) -> Result<String> {
        self.tokens(name)?
            .first()
            .filter(|value| !value.is_empty())
            .map(|value| (*value).to_string())
            .ok_or_else(|| HeaderError::missing_value(name))
    }

    /// Column tokens of `#fields`/`#types`, without the timestamp column.
    fn columns(&self, name: &'static str) -> Result<Vec<&'a str>> {
        let tokens = self.tokens(name)?;
        Ok(tokens.get(1..).unwrap_or_default().to_vec())
    }
}

/// Pair names with types and assign capture positions.
fn build_fields(
    names: &[&str],
    types: &[&str],
) -> Result<(Vec<FieldDescriptor>, FieldDescriptor)> {
    if names.len() != types.len() {
        return Err(HeaderError::ColumnCountMismatch {
            fields: names.len(),
            types: types.len(),
        });
    }
    if let Some(index) = names.iter().position(|name| name.is_empty()) {
        return Err(HeaderError::EmptyFieldName { column: index + 1 });
    }
    let (Some((last_name, names)), Some((last_type, types))) =
        (names.split_last(), types.split_last())
    else {
        return Err(HeaderError::NoFields);
    };

    let fields: Vec<FieldDescriptor> = names
        .iter()
        .zip(types)
        .enumerate()
        .map(|(index, (name, type_tag))| {
            FieldDescriptor::new(*name, index + FIRST_FIELD_POSITION, *type_tag)
        })
        .collect();
    // The last capture sits one past the last regular column.
    let last_field = FieldDescriptor::new(
        *last_name,
        names.len() + FIRST_FIELD_POSITION,
        *last_type,
    );

    for field in fields.iter().chain(std::iter::once(&last_field)) {
        trace!(
            name = %field.name,
            position = field.position,
            kind = %field.kind,
            type_tag = %field.type_tag,
            "field"
        );
    }
    Ok((fields, last_field))
}
