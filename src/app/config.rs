use crate::app::cli::Cli;
use crate::app::models::{
    CopyErrorPolicy, FilterConfig, RuntimeConfig, DEFAULT_TARGET_DIR_NAME,
};
use crate::app::paths::absolutize;
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

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PresetConfig {
    exclude_dirs: Option<Vec<String>>,
    exclude_files: Option<Vec<String>>,
    include_extensions: Option<Vec<String>>,
}

fn default_presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("context_consolidate")
        .join("presets.toml"))
}

/// Loads named presets. A missing file means no presets.
pub fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }
    read_presets_file(config_path)
}

/// Loads named presets from a file that must exist.
pub fn read_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content)
        .with_context(|| format!("Failed to parse presets at {:?}", config_path))
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

/// Preset entries then CLI entries, deduplicated keeping the first occurrence.
/// `None` when neither side supplied the list.
fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Option<Vec<String>> {
    if preset_vec.is_none() && cli_vec.is_none() {
        return None;
    }
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    Some(combined)
}

pub fn resolve_config(cli: Cli, current_dir: &Path) -> Result<RuntimeConfig> {
    let presets = match &cli.presets_file {
        Some(path) => read_presets_file(&absolutize(path, current_dir))?,
        None => load_presets_file(&default_presets_path()?)?,
    };
    resolve_with_presets(cli, current_dir, &presets)
}

fn resolve_with_presets(
    cli: Cli,
    current_dir: &Path,
    presets: &HashMap<String, PresetConfig>,
) -> Result<RuntimeConfig> {
    let source = absolutize(cli.source.as_deref().unwrap_or(current_dir), current_dir);
    let target = match &cli.target {
        Some(target) => absolutize(target, current_dir),
        None => current_dir.join(DEFAULT_TARGET_DIR_NAME),
    };

    // Determine preset to use: CLI flag > Auto-detect from source folder name > None
    let project_name = source.file_name().and_then(|n| n.to_str());
    let preset = match cli.preset.as_deref() {
        Some(name) => presets
            .get(name)
            .cloned()
            .with_context(|| format!("Unknown preset: {}", name))?,
        None => project_name
            .and_then(|name| presets.get(name))
            .cloned()
            .unwrap_or_default(),
    };

    let defaults = FilterConfig::default();
    let filter = FilterConfig {
        excluded_dir_names: merge_vecs(preset.exclude_dirs, cli.exclude_dirs)
            .unwrap_or(defaults.excluded_dir_names),
        excluded_file_patterns: merge_vecs(preset.exclude_files, cli.exclude_files)
            .unwrap_or(defaults.excluded_file_patterns),
        included_extensions: merge_vecs(preset.include_extensions, cli.include_extensions),
    };

    Ok(RuntimeConfig {
        source,
        target,
        filter,
        on_copy_error: if cli.keep_going {
            CopyErrorPolicy::Skip
        } else {
            CopyErrorPolicy::Abort
        },
    })
}
