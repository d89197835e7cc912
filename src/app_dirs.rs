use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "jlpt-trend";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("jlpt_trend_config.json"))
    }
}
