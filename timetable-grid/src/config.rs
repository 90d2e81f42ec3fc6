use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::schedule::types::GridDimensions;

pub const DEFAULT_CONFIG_FILE: &str = "timetable.toml";

/// One teaching period with its display name and bell times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    pub name: String,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl PeriodConfig {
    fn new(name: &str, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            name: name.to_string(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap_or_default(),
        }
    }

    /// "08:00-08:45"
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Day and period domain of the weekly grid. Labels and times are only used
/// for display; the grid itself only cares about the counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableConfig {
    pub days: Vec<String>,
    pub periods: Vec<PeriodConfig>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            days: ["周一", "周二", "周三", "周四", "周五"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            periods: vec![
                PeriodConfig::new("第一节", (8, 0), (8, 45)),
                PeriodConfig::new("第二节", (8, 55), (9, 40)),
                PeriodConfig::new("第三节", (10, 0), (10, 45)),
                PeriodConfig::new("第四节", (10, 55), (11, 40)),
                PeriodConfig::new("第五节", (14, 0), (14, 45)),
                PeriodConfig::new("第六节", (14, 55), (15, 40)),
                PeriodConfig::new("第七节", (16, 0), (16, 45)),
                PeriodConfig::new("第八节", (16, 55), (17, 40)),
            ],
        }
    }
}

impl TimetableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days.is_empty() {
            return Err(ConfigError::Empty("day"));
        }
        if self.periods.is_empty() {
            return Err(ConfigError::Empty("period"));
        }
        if self.days.len() > u8::MAX as usize {
            return Err(ConfigError::TooMany("days"));
        }
        if self.periods.len() > u8::MAX as usize {
            return Err(ConfigError::TooMany("periods"));
        }
        if let Some(p) = self.periods.iter().find(|p| p.end <= p.start) {
            return Err(ConfigError::InvertedPeriod { name: p.name.clone() });
        }
        Ok(())
    }

    /// Valid coordinate range; only meaningful after `validate`
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(
            self.days.len().min(u8::MAX as usize) as u8,
            self.periods.len().min(u8::MAX as usize) as u8,
        )
    }

    pub fn day_label(&self, day: u8) -> Option<&str> {
        self.days.get(day as usize).map(String::as_str)
    }

    pub fn period(&self, period: u8) -> Option<&PeriodConfig> {
        self.periods.get(period as usize)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: TimetableConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Reads `TIMETABLE_CONFIG`, then `timetable.toml`, falling back to the
/// built-in 5x8 week when neither exists
pub fn load_timetable_config() -> Result<TimetableConfig, ConfigError> {
    if let Ok(path) = std::env::var("TIMETABLE_CONFIG") {
        return TimetableConfig::from_toml_file(Path::new(&path));
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return TimetableConfig::from_toml_file(default_path);
    }
    Ok(TimetableConfig::default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Defaults, then environment, then the port given on the command line
pub fn load_server_settings(port_arg: Option<u16>) -> ServerSettings {
    let mut settings = ServerSettings::default();

    if let Ok(v) = std::env::var("TIMETABLE_BIND") {
        settings.bind = v;
    }
    if let Some(port) = std::env::var("TIMETABLE_PORT").ok().and_then(|p| p.parse().ok()) {
        settings.port = port;
    }
    if let Ok(v) = std::env::var("TIMETABLE_STATIC_DIR") {
        settings.static_dir = PathBuf::from(v);
    }
    if let Some(port) = port_arg {
        settings.port = port;
    }

    settings
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}
