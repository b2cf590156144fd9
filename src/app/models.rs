use std::path::{Path, PathBuf};

/// Toggles that shape a single scan. Copied into the scan thread, never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanConfig {
    pub skip_git: bool,
    pub skip_venv: bool,
    pub skip_python_aux: bool,
    pub show_py_content: bool,
    pub show_docker_content: bool,
    pub show_toml_content: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_git: true,
            skip_venv: true,
            skip_python_aux: false,
            show_py_content: false,
            show_docker_content: false,
            show_toml_content: false,
        }
    }
}

impl ScanConfig {
    pub fn with_all_content(mut self) -> Self {
        self.show_py_content = true;
        self.show_docker_content = true;
        self.show_toml_content = true;
        self
    }
}

/// Tree text and aggregated file contents produced by one scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanResult {
    pub tree: String,
    pub content: String,
}

/// Identifies a scan result: the absolute root plus every toggle that affects output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub root: PathBuf,
    pub config: ScanConfig,
}

impl CacheKey {
    pub fn new(root: &Path, config: ScanConfig) -> Self {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        Self { root, config }
    }
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scan: ScanConfig,
    pub tree_only_output: bool,
    pub show_progress: bool,
}
