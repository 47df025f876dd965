use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use standkit::Argb;
use standkit::geometry::Insets;
use standkit::slider::{DEFAULT_TAP_TIMEOUT, DEFAULT_TOUCH_SLOP, SliderStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SliderConfig {
    pub bar_height: f64,
    pub thumb_radius: f64,
    pub notch_radius: f64,
    pub text_size: f64,
    pub text_offset: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "tap_timeout_ms")]
    pub tap_timeout: Duration,
    pub touch_slop: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        let style = SliderStyle::default();
        Self {
            bar_height: style.bar_height,
            thumb_radius: style.thumb_radius,
            notch_radius: style.notch_radius,
            text_size: style.text_size,
            text_offset: style.text_offset,
            tap_timeout: DEFAULT_TAP_TIMEOUT,
            touch_slop: DEFAULT_TOUCH_SLOP,
        }
    }
}

impl SliderConfig {
    /// Metrics from the config, colors from `base`.
    pub fn style(&self, base: SliderStyle) -> SliderStyle {
        SliderStyle {
            bar_height: self.bar_height,
            thumb_radius: self.thumb_radius,
            notch_radius: self.notch_radius,
            text_size: self.text_size,
            text_offset: self.text_offset,
            ..base
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Fill color used until one has been saved.
    pub default_color: Argb,
    pub animate: bool,
    pub padding: f64,
    pub slider: SliderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_color: Argb::MAGENTA,
            animate: true,
            padding: 16.0,
            slider: SliderConfig::default(),
        }
    }
}

impl Config {
    pub fn diagram_padding(&self) -> Insets {
        Insets::uniform(self.padding.max(0.0))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "standstats", "standstats")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("STANDSTATS")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

/// Writes the bundled config next to where it is loaded from, leaving an existing file alone.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if write_default_config_to(&path)? {
        log::info!("Wrote default configuration to {}", path.display());
    }
    Ok(path)
}

fn write_default_config_to(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

type WatchEvents = async_channel::Receiver<notify::Result<Event>>;

/// Watches the directory holding `config_path`; editors often replace the file.
fn watch_config_dir(config_path: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    let config_dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, bridge_rx))
}

fn is_config_change(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Sends `AppEvent::ConfigReload` whenever the config file changes on disk.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let watched = get_config_path()
        .and_then(|path| watch_config_dir(&path).map(|watch| (path, watch)));
    // the watcher stops when dropped, so it lives as long as this loop
    let (config_path, (_watcher, events)) = match watched {
        Ok(watched) => watched,
        Err(e) => {
            log::error!("Config watcher disabled: {}", e);
            return;
        }
    };

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                log::debug!("Config file changed: {:?}", event.kind);
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", ConfigError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_matches_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r##"
            default_color = "#80112233"
            animate = false

            [slider]
            tap_timeout_ms = 150
            "##,
        )
        .unwrap();
        assert_eq!(parsed.default_color, Argb::new(0x8011_2233));
        assert!(!parsed.animate);
        assert_eq!(parsed.padding, Config::default().padding);
        assert_eq!(parsed.slider.tap_timeout, Duration::from_millis(150));
        assert_eq!(parsed.slider.touch_slop, DEFAULT_TOUCH_SLOP);
    }

    #[test]
    fn test_opaque_shorthand_color() {
        let parsed: Config = serde_json::from_str(r##"{"default_color": "#00FF00"}"##).unwrap();
        assert_eq!(parsed.default_color, Argb::new(0xFF00_FF00));
    }

    #[test]
    fn test_slider_style_keeps_base_colors() {
        let base = SliderStyle {
            selected: Argb::WHITE,
            ..Default::default()
        };
        let config = SliderConfig {
            thumb_radius: 14.0,
            ..Default::default()
        };
        let style = config.style(base);
        assert_eq!(style.thumb_radius, 14.0);
        assert_eq!(style.selected, Argb::WHITE);
    }

    #[test]
    fn test_default_config_is_written_once() {
        let dir = std::env::temp_dir().join(format!("standstats-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        assert!(write_default_config_to(&path).unwrap());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs_err::write(&path, "animate = false\n").unwrap();
        assert!(!write_default_config_to(&path).unwrap());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "animate = false\n");

        let _ = fs_err::remove_dir_all(&dir);
    }

    #[test]
    fn test_only_config_file_changes_reload() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let config_path = PathBuf::from("/tmp/standstats/config.toml");
        let modified = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(config_path.clone());
        assert!(is_config_change(&modified, &config_path));

        let created = Event::new(EventKind::Create(CreateKind::File)).add_path(config_path.clone());
        assert!(is_config_change(&created, &config_path));

        let sibling = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/tmp/standstats/config.toml.swp"));
        assert!(!is_config_change(&sibling, &config_path));

        let read = Event::new(EventKind::Access(AccessKind::Any)).add_path(config_path.clone());
        assert!(!is_config_change(&read, &config_path));
    }
}
