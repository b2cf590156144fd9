use std::path::Path;

const CONTENT_HEADER: &str = "\n----- Python / Additional Contents -----\n";

pub struct OutputGenerator;

impl OutputGenerator {
    /// Name of the scanned folder as shown on the first output line.
    /// Empty for a filesystem root, which has no last component.
    pub fn root_name(root: &Path) -> String {
        let absolute = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        absolute
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn format_tree_only(root_name: &str, tree: &str) -> String {
        [root_name, tree].join("\n")
    }

    pub fn format_full_output(root_name: &str, tree: &str, content: &str) -> String {
        let mut out = Self::format_tree_only(root_name, tree);

        if !content.trim().is_empty() {
            out.push('\n');
            out.push_str(CONTENT_HEADER);
            out.push_str(content);
        }

        out
    }
}
