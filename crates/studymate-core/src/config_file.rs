use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub chunking: Option<ChunkingSection>,
    pub responses: Option<ResponsesSection>,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkingSection {
    pub max_chunk_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesSection {
    pub max_length: Option<usize>,
    pub context_chunks: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySection {
    pub color: Option<bool>,
}

/// Platform config directory path: `<config_dir>/studymate/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("studymate").join("config.toml"))
}

/// Load config by cascading CWD `.studymate.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".studymate.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        chunking: Some(ChunkingSection {
            max_chunk_chars: overlay
                .chunking
                .as_ref()
                .and_then(|c| c.max_chunk_chars)
                .or_else(|| base.chunking.as_ref().and_then(|c| c.max_chunk_chars)),
        }),
        responses: Some(ResponsesSection {
            max_length: overlay
                .responses
                .as_ref()
                .and_then(|r| r.max_length)
                .or_else(|| base.responses.as_ref().and_then(|r| r.max_length)),
            context_chunks: overlay
                .responses
                .as_ref()
                .and_then(|r| r.context_chunks)
                .or_else(|| base.responses.as_ref().and_then(|r| r.context_chunks)),
        }),
        display: Some(DisplaySection {
            color: overlay
                .display
                .as_ref()
                .and_then(|d| d.color)
                .or_else(|| base.display.as_ref().and_then(|d| d.color)),
        }),
    }
}

/// Save the config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Write the config to `path`, creating parent directories as needed.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))
}
