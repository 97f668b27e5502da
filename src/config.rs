use crate::error::{PlannerError, PlannerResult};
use crate::project::DEFAULT_PROJECT_COLOR;
use crate::schedule::PlanMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const ENV_HTTP_ADDR: &str = "PLANNER_TOOL_HTTP_ADDR";
pub const ENV_DAILY_HOURS: &str = "PLANNER_TOOL_DAILY_HOURS";
pub const ENV_HORIZON_DAYS: &str = "PLANNER_TOOL_HORIZON_DAYS";
pub const ENV_LOG: &str = "PLANNER_TOOL_LOG";

/// Session defaults. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_daily_hours")]
    pub daily_hours: f64,

    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    #[serde(default)]
    pub plan_mode: PlanMode,

    /// Project assigned to tasks added without one
    #[serde(default = "default_project")]
    pub default_project: String,

    #[serde(default = "default_project_color")]
    pub default_project_color: String,

    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_daily_hours() -> f64 {
    3.0
}

fn default_horizon_days() -> u32 {
    7
}

fn default_project() -> String {
    "Inbox".to_string()
}

fn default_project_color() -> String {
    DEFAULT_PROJECT_COLOR.to_string()
}

fn default_http_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_hours: default_daily_hours(),
            horizon_days: default_horizon_days(),
            plan_mode: PlanMode::default(),
            default_project: default_project(),
            default_project_color: default_project_color(),
            http_addr: default_http_addr(),
            log_level: default_log_level(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(contents: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// File (when given) plus process environment overrides.
    pub fn load(path: Option<&Path>) -> PlannerResult<Self> {
        let config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_env_overrides<F>(mut self, lookup: F) -> PlannerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_HTTP_ADDR) {
            self.http_addr = addr;
        }
        if let Some(hours) = lookup(ENV_DAILY_HOURS) {
            self.daily_hours = hours.trim().parse().map_err(|_| {
                PlannerError::invalid(format!("{ENV_DAILY_HOURS} is not a number: '{hours}'"))
            })?;
        }
        if let Some(days) = lookup(ENV_HORIZON_DAYS) {
            self.horizon_days = days.trim().parse().map_err(|_| {
                PlannerError::invalid(format!("{ENV_HORIZON_DAYS} is not a day count: '{days}'"))
            })?;
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }
        Ok(self)
    }
}
