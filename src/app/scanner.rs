use crate::app::extractors::ContentKind;
use crate::app::models::{ScanConfig, ScanResult};
use ignore::WalkBuilder;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Directory names treated as Python virtual environments (compared lowercase).
pub const VENV_NAMES: [&str; 4] = ["venv", ".venv", "env", ".env"];

const GIT_NAME: &str = ".git";
const PYCACHE_NAME: &str = "__pycache__";
const PYTHON_AUX_SUFFIXES: [&str; 3] = [".pyc", ".pyo", ".pyd"];

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan cancelled")]
    Cancelled,
    #[error("Failed to list directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Scan thread exited without a result")]
    WorkerLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    Venv,
    Git,
    PythonAux,
}

impl SkipReason {
    fn label(self) -> &'static str {
        match self {
            Self::Venv => "venv skipped",
            Self::Git => "git skipped",
            Self::PythonAux => "python aux skipped",
        }
    }
}

/// `name` must already be lowercased.
fn skip_reason(name: &str, is_dir: bool, config: &ScanConfig) -> Option<SkipReason> {
    if config.skip_venv && is_dir && VENV_NAMES.contains(&name) {
        return Some(SkipReason::Venv);
    }
    if config.skip_git && name == GIT_NAME {
        return Some(SkipReason::Git);
    }
    if config.skip_python_aux {
        let aux = if is_dir {
            name == PYCACHE_NAME
        } else {
            PYTHON_AUX_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        };
        if aux {
            return Some(SkipReason::PythonAux);
        }
    }
    None
}

type ProgressFn = Box<dyn FnMut(usize) + Send>;

/// Walks a directory, drawing the ASCII tree and collecting extracted file contents.
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
    processed: usize,
    on_progress: Option<ProgressFn>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            root: root.into(),
            config,
            processed: 0,
            on_progress: None,
            cancel: None,
        }
    }

    /// Called with the running entry count each time an entry is visited.
    pub fn with_progress(mut self, callback: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Checked before every entry; once set, the walk stops with [`ScanError::Cancelled`].
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Counts files and folders under the root, pruning entries the builder would skip.
    ///
    /// Only sizes the progress bar. Pruned entries are not counted even though
    /// the builder ticks them, so the figure can come in under the real count.
    pub fn estimate_total(&self) -> usize {
        let config = self.config;

        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let name = entry.file_name().to_string_lossy().to_lowercase();
                skip_reason(&name, is_dir, &config).is_none()
            })
            .build()
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::debug!("Skipping entry while counting: {}", err);
                    None
                }
            })
            .filter(|entry| entry.depth() > 0)
            .count()
    }

    /// Runs a full scan from the root, resetting the progress counter first.
    pub fn scan(&mut self) -> Result<ScanResult, ScanError> {
        self.processed = 0;
        let root = self.root.clone();
        let (tree, content) = self.build(&root, "")?;
        Ok(ScanResult { tree, content })
    }

    /// Returns the tree lines and content blocks for the subtree at `path`.
    pub fn build(&mut self, path: &Path, prefix: &str) -> Result<(String, String), ScanError> {
        let mut names = match read_names(path) {
            Ok(names) => names,
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                log::warn!("Permission denied when accessing: {}", path.display());
                return Ok((format!("[Access Denied]: {}", path.display()), String::new()));
            }
            Err(source) => {
                return Err(ScanError::ReadDir {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        names.sort();

        let mut tree_lines = Vec::new();
        let mut file_contents = Vec::new();
        let count = names.len();

        for (i, name) in names.into_iter().enumerate() {
            self.check_cancelled()?;

            let is_last = i + 1 == count;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            let full_path = path.join(&name);
            let display = name.to_string_lossy();
            let lower = display.to_lowercase();

            self.tick();

            let is_dir = full_path.is_dir();

            if let Some(reason) = skip_reason(&lower, is_dir, &self.config) {
                tree_lines.push(format!("{prefix}{connector}{display} [{}]", reason.label()));
                continue;
            }

            tree_lines.push(format!("{prefix}{connector}{display}"));

            if is_dir {
                if full_path.is_symlink() {
                    log::debug!("Not following symlinked directory {}", full_path.display());
                    continue;
                }

                let sub_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
                let (sub_tree, sub_content) = self.build(&full_path, &sub_prefix)?;
                if !sub_tree.is_empty() {
                    tree_lines.push(sub_tree);
                }
                if !sub_content.is_empty() {
                    file_contents.push(sub_content);
                }
            } else {
                for kind in ContentKind::ALL {
                    if !kind.is_enabled(&self.config) || !kind.matches(&lower) {
                        continue;
                    }
                    let text = kind.extract(&full_path);
                    if !text.trim().is_empty() {
                        file_contents.push(format!("File: {}\n{}\n------", full_path.display(), text));
                    }
                }
            }
        }

        Ok((tree_lines.join("\n"), file_contents.join("\n")))
    }

    fn tick(&mut self) {
        self.processed += 1;
        if let Some(callback) = self.on_progress.as_mut() {
            callback(self.processed);
        }
    }

    fn check_cancelled(&self) -> Result<(), ScanError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(ScanError::Cancelled),
            _ => Ok(()),
        }
    }
}

fn read_names(path: &Path) -> std::io::Result<Vec<std::ffi::OsString>> {
    fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect()
}
