use crate::app::models::ScanConfig;
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser, Point};

const DOCKERFILE_VARIANTS: [&str; 4] = [
    "dockerfile",
    "dockerfile.dev",
    "dockerfile.prod",
    "dockerfile.test",
];

/// File types whose contents can be pulled into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Python,
    Dockerfile,
    Toml,
}

impl ContentKind {
    /// Dispatch order used by the scanner.
    pub const ALL: [ContentKind; 3] = [Self::Python, Self::Dockerfile, Self::Toml];

    /// `name` must already be lowercased.
    pub fn matches(self, name: &str) -> bool {
        match self {
            Self::Python => name.ends_with(".py"),
            Self::Dockerfile => is_dockerfile(name),
            Self::Toml => name.ends_with(".toml"),
        }
    }

    pub fn is_enabled(self, config: &ScanConfig) -> bool {
        match self {
            Self::Python => config.show_py_content,
            Self::Dockerfile => config.show_docker_content,
            Self::Toml => config.show_toml_content,
        }
    }

    /// Never fails: read and parse errors come back as an `Error reading ...` line.
    pub fn extract(self, path: &Path) -> String {
        let result = match self {
            Self::Python => extract_python_classes(path),
            Self::Dockerfile | Self::Toml => read_text(path),
        };

        result.unwrap_or_else(|cause| {
            log::error!("Error reading {:?} file {}: {}", self, path.display(), cause);
            format!("Error reading {}: {}", path.display(), cause)
        })
    }
}

fn is_dockerfile(name: &str) -> bool {
    DOCKERFILE_VARIANTS.contains(&name) || name.starts_with("dockerfile.")
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| e.to_string())
}

/// Lists every top-level class with the source lines it spans.
fn extract_python_classes(path: &Path) -> Result<String, String> {
    let source = read_text(path)?;

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| e.to_string())?;
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| "parser produced no syntax tree".to_string())?;

    let root = tree.root_node();
    if root.has_error() {
        let line = first_error(root).map_or(1, |node| node.start_position().row + 1);
        return Err(format!("invalid syntax (line {line})"));
    }
    if let Some(node) = first_legacy_statement(root) {
        let keyword = if node.kind() == "exec_statement" { "exec" } else { "print" };
        return Err(format!(
            "Missing parentheses in call to '{keyword}' (line {})",
            node.start_position().row + 1
        ));
    }

    let file_lines: Vec<&str> = source.lines().collect();
    let mut lines = Vec::new();
    let mut cursor = root.walk();

    for node in root.named_children(&mut cursor) {
        let Some(class) = class_definition(node) else {
            continue;
        };

        let name = class
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source.as_bytes()).ok())
            .unwrap_or_default();
        lines.push(format!("Class: {name}"));

        let start = class.start_position().row;
        let mut end = last_row(class).min(file_lines.len().saturating_sub(1));
        while end > start && file_lines[end].trim().is_empty() {
            end -= 1;
        }
        if start < file_lines.len() {
            lines.push(file_lines[start..=end].join("\n"));
        }
    }

    Ok(lines.join("\n"))
}

/// Decorators are not part of the span, matching how Python reports a class's first line.
fn class_definition(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "class_definition" => Some(node),
        "decorated_definition" => node
            .child_by_field_name("definition")
            .filter(|def| def.kind() == "class_definition"),
        _ => None,
    }
}

/// Last row holding code. Trailing comments inside the body are not part of the span.
fn last_row(node: Node<'_>) -> usize {
    let start = node.start_position();
    let end = code_end(node);
    if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    }
}

/// Descends into the trailing child while it decides where `node` ends.
/// Inside a `block` the last statement decides, whatever comments follow it.
fn code_end(node: Node<'_>) -> Point {
    let mut cursor = node.walk();
    let last = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .last();

    match last {
        Some(child) if node.kind() == "block" || child.end_byte() == node.end_byte() => {
            code_end(child)
        }
        _ => node.end_position(),
    }
}

/// Python 2 statements the grammar still accepts but Python 3 rejects.
fn first_legacy_statement(node: Node<'_>) -> Option<Node<'_>> {
    if matches!(node.kind(), "print_statement" | "exec_statement") {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(first_legacy_statement)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}
