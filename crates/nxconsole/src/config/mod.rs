//! Configuration loading and merging.
//!
//! Config is loaded from two sources with the local file taking precedence:
//! 1. User-level: `$XDG_CONFIG_HOME/nxconsole/config.toml`
//!    (or `~/.config/nxconsole/config.toml`)
//! 2. Local: `<cwd>/.nxconsole/config.toml`, or the file given with `--config`
//!
//! Missing or unreadable files fall back to defaults key by key.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::connection::DEFAULT_CONNECT_TIMEOUT;
use crate::terminal::{
    SurfaceOptions, DEFAULT_HISTORY_LIMIT, DEFAULT_SCROLLBACK, DEFAULT_SETTLE_DELAY,
};

const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:8000";
const DEFAULT_SERVER_PATH: &str = "/ws/{device_id}";
const DEFAULT_CLOSE_SESSION: &str = "ctrl+]";
const DEFAULT_QUIT: &str = "q";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub terminal: TerminalConfig,
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub url: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    pub history_limit: usize,
    pub settle_delay: Duration,
    pub scrollback: usize,
    pub convert_eol: bool,
    pub connect_timeout: Duration,
}

impl TerminalConfig {
    pub fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions {
            scrollback: self.scrollback,
            convert_eol: self.convert_eol,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeymapConfig {
    pub close_session: String,
    pub quit: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    server: Option<RawServer>,
    api: Option<RawApi>,
    terminal: Option<RawTerminal>,
    keymap: Option<RawKeymap>,
}

#[derive(Debug, Default, Deserialize)]
struct RawServer {
    url: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawApi {
    #[serde(alias = "baseUrl")]
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTerminal {
    #[serde(alias = "historyLimit")]
    history_limit: Option<usize>,
    #[serde(alias = "settleDelayMs")]
    settle_delay_ms: Option<u64>,
    scrollback: Option<usize>,
    #[serde(alias = "convertEol")]
    convert_eol: Option<bool>,
    #[serde(alias = "connectTimeoutMs")]
    connect_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeymap {
    #[serde(alias = "closeSession")]
    close_session: Option<String>,
    quit: Option<String>,
}

fn read_toml(path: &Path) -> Option<RawConfig> {
    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }
    match toml::from_str::<RawConfig>(&contents) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring invalid config: {err}");
            None
        }
    }
}

fn merge_config(user: Option<RawConfig>, local: Option<RawConfig>) -> Config {
    let local_server = local.as_ref().and_then(|c| c.server.as_ref());
    let user_server = user.as_ref().and_then(|c| c.server.as_ref());
    let url = local_server
        .and_then(|s| s.url.clone())
        .or_else(|| user_server.and_then(|s| s.url.clone()))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let path = local_server
        .and_then(|s| s.path.clone())
        .or_else(|| user_server.and_then(|s| s.path.clone()))
        .unwrap_or_else(|| DEFAULT_SERVER_PATH.to_string());

    let local_api = local.as_ref().and_then(|c| c.api.as_ref());
    let user_api = user.as_ref().and_then(|c| c.api.as_ref());
    let base_url = local_api
        .and_then(|a| a.base_url.clone())
        .or_else(|| user_api.and_then(|a| a.base_url.clone()))
        .filter(|url| !url.trim().is_empty());

    let local_terminal = local.as_ref().and_then(|c| c.terminal.as_ref());
    let user_terminal = user.as_ref().and_then(|c| c.terminal.as_ref());
    let history_limit = local_terminal
        .and_then(|t| t.history_limit)
        .or_else(|| user_terminal.and_then(|t| t.history_limit))
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_HISTORY_LIMIT);
    let settle_delay = local_terminal
        .and_then(|t| t.settle_delay_ms)
        .or_else(|| user_terminal.and_then(|t| t.settle_delay_ms))
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SETTLE_DELAY);
    let scrollback = local_terminal
        .and_then(|t| t.scrollback)
        .or_else(|| user_terminal.and_then(|t| t.scrollback))
        .unwrap_or(DEFAULT_SCROLLBACK);
    let convert_eol = local_terminal
        .and_then(|t| t.convert_eol)
        .or_else(|| user_terminal.and_then(|t| t.convert_eol))
        .unwrap_or(true);
    let connect_timeout = local_terminal
        .and_then(|t| t.connect_timeout_ms)
        .or_else(|| user_terminal.and_then(|t| t.connect_timeout_ms))
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_CONNECT_TIMEOUT);

    let local_keymap = local.as_ref().and_then(|c| c.keymap.as_ref());
    let user_keymap = user.as_ref().and_then(|c| c.keymap.as_ref());
    let close_session = local_keymap
        .and_then(|k| k.close_session.clone())
        .or_else(|| user_keymap.and_then(|k| k.close_session.clone()))
        .unwrap_or_else(|| DEFAULT_CLOSE_SESSION.to_string());
    let quit = local_keymap
        .and_then(|k| k.quit.clone())
        .or_else(|| user_keymap.and_then(|k| k.quit.clone()))
        .unwrap_or_else(|| DEFAULT_QUIT.to_string());

    Config {
        server: ServerConfig { url, path },
        api: ApiConfig { base_url },
        terminal: TerminalConfig {
            history_limit,
            settle_delay,
            scrollback,
            convert_eol,
            connect_timeout,
        },
        keymap: KeymapConfig {
            close_session,
            quit,
        },
    }
}

pub fn local_config_path(root: &Path) -> PathBuf {
    root.join(".nxconsole").join("config.toml")
}

pub fn user_config_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
    Some(base.join("nxconsole").join("config.toml"))
}

/// Load config for `root`. `override_path` replaces the local file.
pub fn load_config(root: &Path, override_path: Option<&Path>) -> Config {
    let local_path = override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| local_config_path(root));
    let local_config = read_toml(&local_path);
    let user_config = user_config_path().and_then(|path| read_toml(&path));

    merge_config(user_config, local_config)
}
