use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub tube: TubeConfig,

    #[serde(default)]
    pub windows: WindowsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Sampling tick interval in milliseconds
    pub tick_ms: u64,
    /// How many ticks of history the delta buffer retains
    pub capacity: usize,
    /// Persist the cumulative count across runs
    pub persist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeConfig {
    /// Detector sensitivity: counts per minute produced by a 1 µSv/h field
    pub cpm_per_usv_h: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowsConfig {
    /// Short window (ticks): the "instantaneous" rate
    pub short_ticks: usize,
    /// Long window (ticks): the smoothed average rate
    pub long_ticks: usize,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            tube:    TubeConfig::default(),
            windows: WindowsConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { tick_ms: 1000, capacity: 900, persist: true }
    }
}

impl Default for TubeConfig {
    fn default() -> Self {
        // SBM-20-class tube
        Self { cpm_per_usv_h: 153.8 }
    }
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self { short_ticks: 10, long_ticks: 60 }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("geigermon").join("geigermon.toml"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# geigermon configuration\n# Generated on first run — edit freely\n\n{}", text))?;
    Ok(())
}
