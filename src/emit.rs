//! Renders a version record as a C++ translation unit.
//!
//! The layout is consumed by existing build scripts and tooling, so every
//! byte of the frame is fixed: header comment, `<string>` include, the
//! `mlperf` namespace, one accessor function per record field, and the
//! closing namespace comment.

use crate::record::{Accessor, CppLiteral, VersionRecord};

/// First line of every generated file. The script name is historical;
/// downstream tooling greps for this exact marker.
pub const FILE_HEADER: &str = "// DO NOT EDIT: Autogenerated by version_generator.py.";

fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn literal(value: &CppLiteral) -> String {
    match value {
        CppLiteral::Quoted(payload) => format!("\"{}\"", escape_quoted(payload)),
        CppLiteral::Raw(payload) => format!("R\"({})\"", payload),
    }
}

/// Renders one accessor function definition, trailing blank line included.
pub fn accessor_block(accessor: Accessor, value: &CppLiteral) -> String {
    format!(
        "const std::string& Loadgen{}() {{\n  static const std::string str = {};\n  return str;\n}}\n\n",
        accessor.name(),
        literal(value)
    )
}

/// Renders the complete translation unit for a record.
pub fn render_file(record: &VersionRecord) -> String {
    let mut out = String::new();
    out.push_str(FILE_HEADER);
    out.push_str("\n\n");
    out.push_str("#include <string>\n\n");
    out.push_str("namespace mlperf {\n\n");
    for (accessor, value) in record.iter() {
        out.push_str(&accessor_block(accessor, value));
    }
    out.push_str("}  // namespace mlperf\n");
    out
}
