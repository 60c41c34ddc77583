//! Heka sandbox decoder generation.
//!
//! The generated script splits each payload on the header's separator with
//! an LPeg grammar and copies every column into a Heka message field.

use std::fmt::{self, Write};

use bro_header::{FieldDescriptor, HeaderDescriptor, quote_literal};
use tracing::debug;

use crate::error::Result;

/// Message type injected for lines that are not log records.
pub const IGNORE_TYPE: &str = "IGNORE";

const PRELUDE: &str = r#"local l = require "lpeg"
local string = require "string"
"#;

const LAST_FIELD_HELPER: &str = r#"local function lastField(value)
    -- Strip the line terminator captured with the final column.
    if value and string.len(value) > 1 and string.sub(value, -1) == "\n" then
        return string.sub(value, 1, -2)
    end
    return value
end
"#;

/// Render the Lua decoder for `header`.
///
/// Output depends only on `header`, so rendering twice gives identical text.
pub fn generate_lua_script(header: &HeaderDescriptor) -> Result<String> {
    let mut script = String::new();
    write_header_comment(&mut script, &header.raw_lines)?;
    writeln!(script)?;
    write_grammar(&mut script, header)?;
    writeln!(script)?;
    write_coercions(&mut script, header)?;
    writeln!(script)?;
    script.push_str(LAST_FIELD_HELPER);
    writeln!(script)?;
    write_process_message(&mut script, header)?;
    debug!(
        path = %header.record_type,
        fields = header.field_count(),
        bytes = script.len(),
        "rendered lua script"
    );
    Ok(script)
}

/// Embed the source header in a long comment.
fn write_header_comment(out: &mut String, lines: &[String]) -> fmt::Result {
    let level = "=".repeat(long_bracket_level(lines));
    writeln!(out, "--[{level}[")?;
    writeln!(out, "SOURCE HEADER USED TO GENERATE PARSING LOGIC:")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "]{level}]")
}

/// Smallest long-bracket level whose closing bracket no line contains.
fn long_bracket_level(lines: &[String]) -> usize {
    (0..)
        .find(|&level| {
            let close = format!("]{}]", "=".repeat(level));
            !lines.iter().any(|line| line.contains(&close))
        })
        .unwrap_or_default()
}

fn write_grammar(out: &mut String, header: &HeaderDescriptor) -> fmt::Result {
    out.push_str(PRELUDE);
    writeln!(out, "local sep = l.P({})", header.escaped_separator)?;
    writeln!(out, "local elem = l.C((1 - sep)^0)")?;
    writeln!(out, "local grammar = l.Ct(elem * (sep * elem)^0)")
}

/// `toString`/`toNumber`: both markers collapse to the same default.
fn write_coercions(out: &mut String, header: &HeaderDescriptor) -> fmt::Result {
    let condition = format!(
        "value == {} or value == {}",
        quote_literal(&header.unset_marker),
        quote_literal(&header.empty_marker)
    );
    write_coercion(out, "toString", &condition, "\"\"", "value")?;
    writeln!(out)?;
    write_coercion(out, "toNumber", &condition, "0", "tonumber(value)")
}

fn write_coercion(
    out: &mut String,
    name: &str,
    condition: &str,
    default: &str,
    convert: &str,
) -> fmt::Result {
    writeln!(out, "local function {name}(value)")?;
    writeln!(out, "    if {condition} then")?;
    writeln!(out, "        return {default}")?;
    writeln!(out, "    end")?;
    writeln!(out, "    return {convert}")?;
    writeln!(out, "end")
}

fn write_process_message(out: &mut String, header: &HeaderDescriptor) -> fmt::Result {
    let ignore = format!(
        "inject_message({{Type = {}, Fields = {{}}}})",
        quote_literal(IGNORE_TYPE)
    );

    writeln!(out, "function process_message()")?;
    writeln!(out, "    local log = read_message(\"Payload\")")?;
    writeln!(out, "    local matches = grammar:match(log)")?;
    writeln!(out)?;
    writeln!(out, "    if not matches then")?;
    writeln!(out, "        -- Unparseable lines are dropped without reporting an error.")?;
    writeln!(out, "        {ignore}")?;
    writeln!(out, "        return 0")?;
    writeln!(out, "    end")?;
    writeln!(out)?;
    writeln!(out, "    if string.sub(log, 1, 1) == \"#\" then")?;
    writeln!(out, "        -- Header and footer directives.")?;
    writeln!(out, "        {ignore}")?;
    writeln!(out, "        return 0")?;
    writeln!(out, "    end")?;
    writeln!(out)?;
    writeln!(out, "    local msg = {{")?;
    writeln!(out, "        Type = {},", quote_literal(&header.record_type))?;
    writeln!(out, "        Timestamp = toNumber(matches[1]),")?;
    writeln!(out, "        Fields = {{}}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    for field in &header.fields {
        write_assignment(out, field, false)?;
    }
    write_assignment(out, &header.last_field, true)?;
    writeln!(out)?;
    writeln!(out, "    local ok, err = pcall(inject_message, msg)")?;
    writeln!(out, "    if not ok then return -1, err end")?;
    writeln!(out, "    return 0")?;
    writeln!(out, "end")
}

fn write_assignment(out: &mut String, field: &FieldDescriptor, last: bool) -> fmt::Result {
    let capture = format!("matches[{}]", field.position);
    let value = if last {
        format!("lastField({capture})")
    } else {
        capture
    };
    writeln!(
        out,
        "    msg.Fields[{}] = {}({value})",
        quote_literal(&field.name),
        field.kind.helper_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| (*line).to_string()).collect()
    }

    #[test]
    fn bracket_level_avoids_closing_sequences() {
        assert_eq!(long_bracket_level(&lines(&["#path\tconn"])), 0);
        assert_eq!(long_bracket_level(&lines(&["a]]b"])), 1);
        assert_eq!(long_bracket_level(&lines(&["]]", "]=]"])), 2);
    }

    #[test]
    fn header_comment_embeds_lines() {
        let mut out = String::new();
        write_header_comment(&mut out, &lines(&["#path\tconn", "x]]y"])).unwrap();
        assert_eq!(
            out,
            "--[=[\nSOURCE HEADER USED TO GENERATE PARSING LOGIC:\n#path\tconn\nx]]y\n]=]\n"
        );
    }

    #[test]
    fn last_field_goes_through_trim_helper() {
        let mut out = String::new();
        write_assignment(&mut out, &FieldDescriptor::new("rtt", 5, "interval"), true).unwrap();
        assert_eq!(out, "    msg.Fields[\"rtt\"] = toString(lastField(matches[5]))\n");

        let mut out = String::new();
        write_assignment(&mut out, &FieldDescriptor::new("qtype", 3, "count"), false).unwrap();
        assert_eq!(out, "    msg.Fields[\"qtype\"] = toNumber(matches[3])\n");
    }
}
