use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_CATALOG_URL: &str = "https://api.dive.edito.eu/data";
pub const PROJECT_CONFIG_DIR: &str = ".stac-title-search";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_url: String,
    pub http: HttpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// `limit` sent with item listings; 0 leaves the page size to the server.
    pub page_limit: u32,
    /// Upper bound on pages fetched for one listing.
    pub max_pages: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            request_timeout_ms: 60_000,
            page_limit: 100,
            max_pages: 1_000,
            user_agent: concat!("stac-title-search/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub catalog_url: Option<String>,
    pub http: Option<PartialHttpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialHttpConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub page_limit: Option<u32>,
    pub max_pages: Option<usize>,
    pub user_agent: Option<String>,
}

/// Values taken from the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub catalog_url: Option<String>,
}

impl AppConfig {
    /// Resolve the configuration: CLI > `STAC_CATALOG_URL` > project file >
    /// global file > defaults.
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self> {
        let project_root = std::env::current_dir().context("resolve current dir")?;
        let project_cfg = load_project_config(&project_root).unwrap_or_default();
        let file_cfg = load_file_config().unwrap_or_default();
        let env_url = std::env::var("STAC_CATALOG_URL").ok();
        Ok(Self::layered(overrides, env_url, project_cfg, file_cfg))
    }

    pub fn layered(
        overrides: ConfigOverrides,
        env_url: Option<String>,
        project_cfg: FileConfig,
        file_cfg: FileConfig,
    ) -> Self {
        let catalog_url = overrides
            .catalog_url
            .or(env_url)
            .or(project_cfg.catalog_url)
            .or(file_cfg.catalog_url)
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        let defaults = HttpConfig::default();
        let project_http = project_cfg.http.unwrap_or_default();
        let file_http = file_cfg.http.unwrap_or_default();
        let http = HttpConfig {
            connect_timeout_ms: project_http
                .connect_timeout_ms
                .or(file_http.connect_timeout_ms)
                .unwrap_or(defaults.connect_timeout_ms),
            request_timeout_ms: project_http
                .request_timeout_ms
                .or(file_http.request_timeout_ms)
                .unwrap_or(defaults.request_timeout_ms),
            page_limit: project_http
                .page_limit
                .or(file_http.page_limit)
                .unwrap_or(defaults.page_limit),
            max_pages: project_http
                .max_pages
                .or(file_http.max_pages)
                .unwrap_or(defaults.max_pages),
            user_agent: project_http
                .user_agent
                .or(file_http.user_agent)
                .unwrap_or(defaults.user_agent),
        };

        Self { catalog_url, http }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Ok(p) = std::env::var("STAC_SEARCH_CONFIG") {
        v.push(PathBuf::from(p));
    }
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        v.push(Path::new(&xdg_home).join("stac-title-search/config.toml"));
    } else if let Some(dir) = dirs::config_dir() {
        v.push(dir.join("stac-title-search/config.toml"));
    }
    v
}

pub fn load_file_config() -> Result<FileConfig> {
    for p in candidate_paths() {
        if p.exists() {
            let s = fs::read_to_string(&p)
                .with_context(|| format!("read config file: {}", p.display()))?;
            match toml::from_str::<FileConfig>(&s) {
                Ok(cfg) => {
                    info!(path=%p.display(), "loaded config file");
                    return Ok(cfg);
                }
                Err(e) => {
                    warn!(path=%p.display(), error=%e.to_string(), "parse config failed");
                    continue;
                }
            }
        }
    }
    Ok(FileConfig::default())
}

/// Load project-specific configuration from .stac-title-search/config.toml
pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    let path = project_root.join(PROJECT_CONFIG_DIR).join("config.toml");
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let s = fs::read_to_string(&path)
        .with_context(|| format!("read project config file: {}", path.display()))?;
    match toml::from_str::<FileConfig>(&s) {
        Ok(cfg) => {
            info!(path=%path.display(), "loaded project config file");
            Ok(cfg)
        }
        Err(e) => {
            warn!(path=%path.display(), error=%e.to_string(), "parse project config failed");
            Ok(FileConfig::default())
        }
    }
}

#[cfg(test)]
mod tests;
