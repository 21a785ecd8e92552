/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub player_data: PathBuf,
    pub title_delay_ms: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub buffer_size: usize,  // bytes accepted by the single roster read
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    server: TomlServer,
    #[serde(default)]
    storage: TomlStorage,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlServer {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_buffer_size")]
    buffer_size: usize,
}

#[derive(Deserialize, Debug)]
struct TomlStorage {
    #[serde(default = "default_player_data")]
    player_data: String,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_title_delay")]
    title_delay_ms: u64,
}

// ── Defaults ──

fn default_host() -> String { "localhost".into() }
fn default_port() -> u16 { 8080 }
fn default_buffer_size() -> usize { 2048 }
fn default_player_data() -> String { "../player_data.json".into() }
fn default_title_delay() -> u64 { 2000 }

impl Default for TomlServer {
    fn default() -> Self {
        TomlServer {
            host: default_host(),
            port: default_port(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl Default for TomlStorage {
    fn default() -> Self {
        TomlStorage { player_data: default_player_data() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { title_delay_ms: default_title_delay() }
    }
}

// ── Loading ──

impl ClientConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/pokecat`.
    pub fn load() -> Self {
        load_toml(&candidate_dirs())
    }

    /// Parse a config document; absent keys take their defaults.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Self::from_toml)
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        let buffer_size = if cfg.server.buffer_size == 0 {
            log::warn!("server.buffer_size = 0 is unusable, using {}", default_buffer_size());
            default_buffer_size()
        } else {
            cfg.server.buffer_size
        };

        ClientConfig {
            server: ServerConfig {
                host: cfg.server.host,
                port: cfg.server.port,
                buffer_size,
            },
            // Relative paths stay relative to the CWD, like the save file always was.
            player_data: PathBuf::from(cfg.storage.player_data),
            title_delay_ms: cfg.general.title_delay_ms,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data home (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/pokecat");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> ClientConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match ClientConfig::parse(&text) {
                    Ok(cfg) => {
                        log::debug!("loaded {}", path.display());
                        return cfg;
                    }
                    Err(e) => {
                        log::warn!("config.toml parse error: {e}");
                        log::warn!("Using default settings.");
                        return ClientConfig::from_toml(TomlConfig::default());
                    }
                },
                Err(e) => {
                    log::warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    ClientConfig::from_toml(TomlConfig::default())
}
