//! Treeviz formatter for documents
//!
//! Treeviz is a one line per node view of a parsed document, handy for checking how a
//! source was split into records. Each node is an icon and a label, truncated to a
//! configurable width, with box-drawing connectors showing nesting:
//!
//! ```text
//! ⧉ Document (2 records)
//! ├─ ¶ Notes written before the first...
//! ├─ ⫻ status/meta:0
//! │  └─ ↵ SUCCESS. Processed inputs.
//! └─ ✗ ⫻has space
//!    └─ ↵ text under a broken header
//! ```
//!
//! Icons
//!     Document: ⧉
//!     Preamble: ¶
//!     Record: ⫻
//!     Malformed record: ✗ (label is the raw header)
//!     Body line: ↵
//!
//! With line numbers enabled, preamble and record lines are prefixed with the 1-based source
//! line where they start. The number column is as wide as the largest number shown, and
//! never narrower than two digits.

use super::registry::{FormatError, Formatter};
use crate::space::ast::{Document, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    pub show_line_numbers: bool,
    /// Labels longer than this many characters are cut and get a trailing "..."
    pub label_width: usize,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            label_width: 30,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// One node of the rendered tree
struct Node {
    icon: &'static str,
    label: String,
    line: Option<usize>,
    children: Vec<Node>,
}

fn record_node(record: &Record) -> Node {
    let (icon, label) = if record.is_parse_error() {
        ("✗", record.raw_header.clone())
    } else {
        (
            "⫻",
            format!("{}/{}:{}", record.name, record.subtype, record.place),
        )
    };

    let children = if record.body.is_empty() {
        Vec::new()
    } else {
        record
            .body
            .lines()
            .map(|line| Node {
                icon: "↵",
                label: line.to_string(),
                line: None,
                children: Vec::new(),
            })
            .collect()
    };

    Node {
        icon,
        label,
        line: Some(record.location.header_line),
        children,
    }
}

fn document_label(doc: &Document) -> String {
    let errors = doc.error_count();
    if errors == 0 {
        format!("Document ({})", pluralize(doc.record_count(), "record"))
    } else {
        format!(
            "Document ({}, {})",
            pluralize(doc.record_count(), "record"),
            pluralize(errors, "parse error")
        )
    }
}

fn format_node(
    node: &Node,
    prefix: &str,
    is_last: bool,
    options: &TreevizOptions,
    number_width: usize,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };

    if options.show_line_numbers {
        match node.line {
            Some(line) => output.push_str(&format!("{:0width$} ", line + 1, width = number_width)),
            None => output.push_str(&" ".repeat(number_width + 1)),
        }
    }

    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        node.icon,
        truncate(&node.label, options.label_width)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        format_node(
            child,
            &child_prefix,
            i == child_count - 1,
            options,
            number_width,
            output,
        );
    }
}

/// Digits needed for the largest 1-based line number in the tree, at least two.
fn number_width(nodes: &[Node]) -> usize {
    let largest = nodes.iter().filter_map(|n| n.line).max().unwrap_or(0) + 1;
    largest.to_string().len().max(2)
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_options(doc, &TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(doc: &Document, options: &TreevizOptions) -> String {
    let mut nodes = Vec::with_capacity(doc.record_count() + 1);
    if !doc.preamble.is_empty() {
        nodes.push(Node {
            icon: "¶",
            label: doc.preamble.lines().next().unwrap_or_default().to_string(),
            line: Some(doc.preamble_start),
            children: Vec::new(),
        });
    }
    nodes.extend(doc.records.iter().map(record_node));

    let mut output = format!("⧉ {}\n", document_label(doc));
    let width = number_width(&nodes);
    let count = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        format_node(node, "", i == count - 1, options, width, &mut output);
    }
    output
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Default)]
pub struct TreevizFormatter {
    pub options: TreevizOptions,
}

impl TreevizFormatter {
    pub fn new(options: TreevizOptions) -> Self {
        Self { options }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(doc, &self.options))
    }

    fn description(&self) -> &str {
        "Visual tree of preamble, records and body lines"
    }
}
