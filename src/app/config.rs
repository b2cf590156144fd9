use crate::app::cli::Cli;
use crate::app::models::{RuntimeConfig, ScanConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(deny_unknown_fields)]
struct PresetConfig {
    skip_git: Option<bool>,
    skip_venv: Option<bool>,
    skip_python_aux: Option<bool>,
    show_py_content: Option<bool>,
    show_docker_content: Option<bool>,
    show_toml_content: Option<bool>,
    tree_only: Option<bool>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("prompt_tree")
        .join("presets.toml"))
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", path))?;

    Ok(parsed.presets)
}

/// Later layers win: defaults, then the preset, then explicit CLI values.
fn merge_scan_config(preset: &PresetConfig, cli: &Cli) -> ScanConfig {
    let defaults = ScanConfig::default();
    let pick = |cli_value: Option<bool>, preset_value: Option<bool>, default: bool| {
        cli_value.or(preset_value).unwrap_or(default)
    };

    let mut config = ScanConfig {
        skip_git: pick(cli.skip_git, preset.skip_git, defaults.skip_git),
        skip_venv: pick(cli.skip_venv, preset.skip_venv, defaults.skip_venv),
        skip_python_aux: pick(
            cli.skip_python_aux,
            preset.skip_python_aux,
            defaults.skip_python_aux,
        ),
        show_py_content: pick(cli.py, preset.show_py_content, defaults.show_py_content),
        show_docker_content: pick(
            cli.docker,
            preset.show_docker_content,
            defaults.show_docker_content,
        ),
        show_toml_content: pick(cli.toml, preset.show_toml_content, defaults.show_toml_content),
    };

    if cli.all {
        config = config.with_all_content();
    }
    config
}

pub fn resolve_config(cli: &Cli, project_name: Option<&str>) -> Result<RuntimeConfig> {
    resolve_config_from(cli, project_name, &presets_path()?)
}

fn resolve_config_from(
    cli: &Cli,
    project_name: Option<&str>,
    presets_file: &Path,
) -> Result<RuntimeConfig> {
    let presets = load_presets_file(presets_file)?;

    // Determine preset to use: CLI flag > Auto-detect > None
    let preset_key = cli.preset.as_deref().or(project_name);
    let found = preset_key.and_then(|k| presets.get(k)).copied();

    if let (Some(name), None) = (cli.preset.as_deref(), found) {
        log::warn!("Preset '{}' not found in {:?}", name, presets_file);
    }
    let preset = found.unwrap_or_default();

    Ok(RuntimeConfig {
        scan: merge_scan_config(&preset, cli),
        tree_only_output: cli.tree || preset.tree_only.unwrap_or(false),
        show_progress: !cli.no_progress && !cli.quiet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("prompt_tree").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_presets_file() {
        let dir = tempdir().unwrap();
        let config =
            resolve_config_from(&cli(&[]), Some("demo"), &dir.path().join("none.toml")).unwrap();

        assert_eq!(config.scan, ScanConfig::default());
        assert!(!config.tree_only_output);
        assert!(config.show_progress);
    }

    #[test]
    fn project_preset_applies_and_cli_overrides() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("presets.toml");
        fs::write(
            &file,
            "[demo]\nshow_py_content = true\nshow_toml_content = true\nskip_venv = false\n",
        )
        .unwrap();

        let config = resolve_config_from(&cli(&["--toml=false"]), Some("demo"), &file).unwrap();

        assert!(config.scan.show_py_content);
        assert!(!config.scan.show_toml_content);
        assert!(!config.scan.skip_venv);
        assert!(config.scan.skip_git);
    }

    #[test]
    fn explicit_preset_beats_project_name() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("presets.toml");
        fs::write(&file, "[demo]\nshow_py_content = true\n\n[docs]\ntree_only = true\n").unwrap();

        let config =
            resolve_config_from(&cli(&["--preset", "docs"]), Some("demo"), &file).unwrap();

        assert!(!config.scan.show_py_content);
        assert!(config.tree_only_output);
    }

    #[test]
    fn all_flag_enables_every_extractor() {
        let dir = tempdir().unwrap();
        let config =
            resolve_config_from(&cli(&["--all", "-q"]), None, &dir.path().join("x.toml")).unwrap();

        assert_eq!(config.scan, ScanConfig::default().with_all_content());
        assert!(!config.show_progress);
    }

    #[test]
    fn malformed_presets_are_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("presets.toml");
        fs::write(&file, "[demo]\nshow_py_content = \"yes\"\n").unwrap();

        let err = resolve_config_from(&cli(&[]), Some("demo"), &file).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
