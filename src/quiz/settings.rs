use anyhow::{Context, Result};
use directories_next::BaseDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const APP_DIRECTORY: &str = "testgenius";
const SETTINGS_FILE: &str = "settings.toml";
const SETTINGS_PATH_VAR: &str = "TESTGENIUS_SETTINGS";
const QUESTIONS_PATH_VAR: &str = "TESTGENIUS_QUESTIONS";
const ANSWERS_PATH_VAR: &str = "TESTGENIUS_ANSWERS";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Markers {
    pub question: String,
    pub options: Vec<String>,
    pub answer_delimiter: String,
    pub answer_separator: String,
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            question: "Вопрос №".to_owned(),
            options: ["a)", "b)", "c)", "d)", "e)"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            answer_delimiter: "]".to_owned(),
            answer_separator: ",".to_owned(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    pub test_duration_seconds: Option<u64>,
    pub sample_size: Option<usize>,
    pub auto_advance_delay_ms: Option<u64>,
    pub tick_interval_ms: Option<u64>,
    pub questions_path: Option<PathBuf>,
    pub answers_path: Option<PathBuf>,
    #[serde(default)]
    pub markers: Markers,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub test_duration: Duration,
    pub sample_size: usize,
    pub auto_advance_delay: Duration,
    pub tick_interval: Duration,
    pub questions_path: PathBuf,
    pub answers_path: PathBuf,
    pub markers: Markers,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            test_duration: Duration::from_secs(30 * 60),
            sample_size: 30,
            auto_advance_delay: Duration::from_millis(800),
            tick_interval: Duration::from_millis(100),
            questions_path: PathBuf::from("questions.txt"),
            answers_path: PathBuf::from("answers.txt"),
            markers: Default::default(),
        }
    }
}

impl From<RawSettings> for Settings {
    fn from(raw_settings: RawSettings) -> Self {
        let defaults = Settings::default();
        Settings {
            test_duration: raw_settings
                .test_duration_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.test_duration),
            sample_size: raw_settings.sample_size.unwrap_or(defaults.sample_size),
            auto_advance_delay: raw_settings
                .auto_advance_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.auto_advance_delay),
            tick_interval: raw_settings
                .tick_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            questions_path: raw_settings
                .questions_path
                .unwrap_or(defaults.questions_path),
            answers_path: raw_settings.answers_path.unwrap_or(defaults.answers_path),
            markers: raw_settings.markers,
        }
    }
}

fn get_app_dir(base: fn(&BaseDirs) -> &Path) -> Result<PathBuf> {
    let mut dir = base(&BaseDirs::new().context("could not locate system directories")?).to_path_buf();
    dir.push(APP_DIRECTORY);
    Ok(dir)
}

impl Settings {
    pub fn parse(source: &str) -> Result<Settings> {
        let raw_settings: RawSettings = toml::from_str(source).context("Invalid settings")?;
        Ok(raw_settings.into())
    }

    pub fn open(path: &Path) -> Result<Settings> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings file {}", path.display()))?;
        Settings::parse(&source).with_context(|| format!("In settings file {}", path.display()))
    }

    /// Relative document paths resolve against the user data directory.
    pub fn load() -> Result<Settings> {
        let settings_path = match env::var_os(SETTINGS_PATH_VAR) {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let mut path = get_app_dir(BaseDirs::config_dir)?;
                path.push(SETTINGS_FILE);
                Some(path).filter(|p| p.exists())
            }
        };

        let mut settings = match settings_path {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                Settings::open(&path)?
            }
            None => Settings::default(),
        };

        let data_dir = get_app_dir(BaseDirs::data_dir)?;
        if settings.questions_path.is_relative() {
            settings.questions_path = data_dir.join(&settings.questions_path);
        }
        if settings.answers_path.is_relative() {
            settings.answers_path = data_dir.join(&settings.answers_path);
        }
        if let Some(path) = env::var_os(QUESTIONS_PATH_VAR) {
            settings.questions_path = PathBuf::from(path);
        }
        if let Some(path) = env::var_os(ANSWERS_PATH_VAR) {
            settings.answers_path = PathBuf::from(path);
        }

        Ok(settings)
    }
}
