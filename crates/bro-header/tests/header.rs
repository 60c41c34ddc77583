//! Integration tests for reading and parsing headers from disk.

use std::io::Write;

use bro_header::{
    FieldDescriptor, FieldKind, HEADER_LINE_COUNT, HeaderError, load_header, parse_header,
    read_header_lines,
};
use tempfile::NamedTempFile;

const CONN_HEADER: &str = "#separator \\x09
#set_separator\t,
#empty_field\t(empty)
#unset_field\t-
#path\tconn
#open\t2016-03-08-17-00-00
#fields\tts\tid\tproto\tduration
#types\ttime\tstring\tenum\tdouble
1457456400.123456\tCk1PeA1bNmXr0wPcB1\ttcp\t0.001234
1457456401.654321\tCdOHVk2hDnUHoF0iMe\tudp\t-
";

fn write_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write log");
    file
}

#[test]
fn loads_conn_header() {
    let file = write_log(CONN_HEADER);
    let header = load_header(file.path()).expect("load header");

    assert_eq!(header.separator, "\t");
    assert_eq!(header.escaped_separator, "\"\\t\"");
    assert_eq!(header.empty_marker, "(empty)");
    assert_eq!(header.unset_marker, "-");
    assert_eq!(header.record_type, "conn");
    assert_eq!(
        header.fields,
        vec![
            FieldDescriptor::new("id", 2, "string"),
            FieldDescriptor::new("proto", 3, "enum"),
        ]
    );
    assert!(
        header
            .fields
            .iter()
            .all(|field| field.kind == FieldKind::Textual)
    );
    assert_eq!(header.last_field, FieldDescriptor::new("duration", 4, "double"));
    assert_eq!(header.last_field.kind, FieldKind::Numeric);
    assert_eq!(header.raw_lines.len(), HEADER_LINE_COUNT);
    assert!(header.raw_lines[7].starts_with("#types"));
}

#[test]
fn data_rows_are_not_read() {
    let file = write_log(CONN_HEADER);
    let lines = read_header_lines(file.path()).expect("read");
    assert_eq!(lines.len(), HEADER_LINE_COUNT);
    assert!(lines.iter().all(|line| line.starts_with('#')));
}

#[test]
fn short_file_reports_missing_directive() {
    let short: String = CONN_HEADER.lines().take(5).map(|l| format!("{l}\n")).collect();
    let file = write_log(&short);

    let lines = read_header_lines(file.path()).expect("read");
    assert_eq!(lines.len(), 5);

    let err = parse_header(&lines).unwrap_err();
    assert!(matches!(
        err,
        HeaderError::MissingDirective {
            directive: "#fields"
        }
    ));
}

#[test]
fn separator_escape_round_trips_to_literal() {
    for (token, literal) in [
        ("\\x09", "\"\\t\""),
        ("\\x2c", "\",\""),
        ("\\x7c", "\"|\""),
        ("\\x20", "\" \""),
        ("\\x01", "\"\\001\""),
    ] {
        let separator = bro_header::decode_separator(token).expect("decode");
        assert_eq!(separator.len(), 1);
        assert_eq!(bro_header::quote_literal(&separator), literal, "{token}");
    }
}

#[test]
fn comma_separated_header() {
    let contents = "#separator \\x2c
#empty_field,(empty)
#unset_field,-
#path,dns
#fields,ts,query,qtype,rtt
#types,time,string,count,interval
";
    let file = write_log(contents);
    let header = load_header(file.path()).expect("load header");
    assert_eq!(header.separator, ",");
    assert_eq!(header.record_type, "dns");
    assert_eq!(header.fields[1], FieldDescriptor::new("qtype", 3, "count"));
    assert_eq!(header.fields[1].kind, FieldKind::Numeric);
    assert_eq!(header.last_field.position, 4);
}

#[test]
fn unreadable_path_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_header(&dir.path().join("missing.log")).unwrap_err();
    assert!(matches!(err, HeaderError::FileNotFound { .. }));
}
