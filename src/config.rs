use log::LevelFilter;

use crate::bridge::BridgeOptions;
use crate::error::SessionError;

pub const DEFAULT_INDEX_URL: &str = "https://cdn.jsdelivr.net/pyodide/v0.21.3/full/";
pub const DEFAULT_PACKAGE: &str = "pygame";
pub const SURFACE_ID: &str = "pygame-canvas";
// must match the game's WIDTH/HEIGHT
pub const SURFACE_WIDTH: u32 = 800;
pub const SURFACE_HEIGHT: u32 = 600;

/// Game entry point handed to the runtime once startup completes.
pub const ENTRY_CODE: &str = include_str!("python/entry.py");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            id: SURFACE_ID.to_string(),
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub index_url: String,
    pub package: String,
    pub surface: SurfaceConfig,
    pub entry_code: String,
    pub log_level: LevelFilter,
    pub bridge: BridgeOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            index_url: DEFAULT_INDEX_URL.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
            surface: SurfaceConfig::default(),
            entry_code: ENTRY_CODE.to_string(),
            log_level: LevelFilter::Warn,
            bridge: BridgeOptions::default(),
        }
    }
}

impl SessionConfig {
    /// Defaults overlaid with the config file bundled into the binary.
    pub fn bundled() -> Result<Self, SessionError> {
        Self::from_json(include_str!("../assets/session.json"))
    }

    /// Parses a JSON config. Absent or mistyped fields keep their default.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        let doc = json::parse(text).map_err(|e| SessionError::Config(e.to_string()))?;
        let mut config = SessionConfig::default();

        if let Some(val) = doc["index_url"].as_str() {
            config.index_url = val.to_string();
        }
        if let Some(val) = doc["package"].as_str() {
            config.package = val.to_string();
        }
        if let Some(val) = doc["entry_code"].as_str() {
            config.entry_code = val.to_string();
        }
        if let Some(val) = doc["log_level"].as_str() {
            config.set("log_level", val)?;
        }
        if let Some(val) = doc["suppress_key_default"].as_bool() {
            config.bridge.suppress_key_default = val;
        }

        let surface = &doc["surface"];
        if let Some(val) = surface["id"].as_str() {
            config.surface.id = val.to_string();
        }
        if let Some(val) = surface["width"].as_u32() {
            config.surface.width = val;
        }
        if let Some(val) = surface["height"].as_u32() {
            config.surface.height = val;
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies one `key=value` override, e.g. from the page's query string.
    /// Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        match key {
            "index_url" => self.index_url = value.to_string(),
            "package" => self.package = value.to_string(),
            "log_level" => {
                self.log_level = value
                    .parse()
                    .map_err(|_| SessionError::Config(format!("unknown log level `{value}`")))?
            }
            "suppress_key_default" => {
                self.bridge.suppress_key_default = matches!(value, "1" | "true" | "yes")
            }
            _ => log::debug!("ignoring unknown config key `{key}`"),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.surface.id.is_empty() {
            return Err(SessionError::Config("surface id is empty".to_string()));
        }
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(SessionError::Config(format!(
                "surface size {}x{} is empty",
                self.surface.width, self.surface.height
            )));
        }
        if self.package.is_empty() {
            return Err(SessionError::Config("package name is empty".to_string()));
        }
        Ok(())
    }
}
