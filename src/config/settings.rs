use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_name() -> String {
    "Peter Macharia".to_string()
}
fn default_email() -> String {
    "peter.macharia@email.com".to_string()
}
fn default_initials() -> String {
    "PM".to_string()
}
fn default_true() -> bool {
    true
}
fn default_counter_ms() -> u64 {
    1200
}
fn default_entrance_ms() -> u64 {
    800
}
fn default_entrance_offset() -> u16 {
    3
}
fn default_bar_ms() -> u64 {
    800
}
fn default_stagger_ms() -> u64 {
    150
}
fn default_spin_ms() -> u64 {
    600
}
fn default_glow_half_period_ms() -> u64 {
    2000
}
fn default_glow_min() -> f64 {
    0.3
}
fn default_glow_max() -> f64 {
    0.8
}
fn default_tick_rate_ms() -> u64 {
    33
}
fn default_chart_height() -> u16 {
    8
}
fn default_error_display_ms() -> u64 {
    4000
}
fn default_refresh_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_initials")]
    pub avatar_initials: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: default_email(),
            avatar_initials: default_initials(),
        }
    }
}

impl ProfileConfig {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("there")
    }
}

/// Starting values of the Profile toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub sound_effects: bool,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            notifications: true,
            sound_effects: true,
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_counter_ms")]
    pub counter_duration_ms: u64,
    #[serde(default = "default_entrance_ms")]
    pub entrance_duration_ms: u64,
    /// Rows the progress page slides up from on entrance.
    #[serde(default = "default_entrance_offset")]
    pub entrance_offset_rows: u16,
    #[serde(default = "default_bar_ms")]
    pub bar_duration_ms: u64,
    #[serde(default = "default_stagger_ms")]
    pub bar_stagger_ms: u64,
    #[serde(default = "default_stagger_ms")]
    pub badge_stagger_ms: u64,
    #[serde(default = "default_spin_ms")]
    pub badge_spin_duration_ms: u64,
    #[serde(default = "default_glow_half_period_ms")]
    pub glow_half_period_ms: u64,
    #[serde(default = "default_glow_min")]
    pub glow_min_opacity: f64,
    #[serde(default = "default_glow_max")]
    pub glow_max_opacity: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: default_counter_ms(),
            entrance_duration_ms: default_entrance_ms(),
            entrance_offset_rows: default_entrance_offset(),
            bar_duration_ms: default_bar_ms(),
            bar_stagger_ms: default_stagger_ms(),
            badge_stagger_ms: default_stagger_ms(),
            badge_spin_duration_ms: default_spin_ms(),
            glow_half_period_ms: default_glow_half_period_ms(),
            glow_min_opacity: default_glow_min(),
            glow_max_opacity: default_glow_max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_chart_height")]
    pub chart_height_rows: u16,
    #[serde(default = "default_error_display_ms")]
    pub error_display_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            chart_height_rows: default_chart_height(),
            error_display_ms: default_error_display_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Simulated latency before the provider is consulted on refresh.
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            refresh_delay_ms: default_refresh_delay_ms(),
        }
    }
}

impl DataConfig {
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "luminara").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        log::info!("loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.animation.badge_stagger_ms, 150);
        assert_eq!(config.ui.tick_rate_ms, 33);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[animation]\nbar_stagger_ms = 90\n\n[preferences]\ndark_mode = true\n")
            .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.animation.bar_stagger_ms, 90);
        assert_eq!(config.animation.badge_stagger_ms, 150);
        assert!(config.preferences.dark_mode);
        assert!(config.preferences.notifications);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.profile.name = "Ada Lovelace".to_string();
        config.data.refresh_delay_ms = 0;

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_first_name() {
        assert_eq!(ProfileConfig::default().first_name(), "Peter");
    }
}
