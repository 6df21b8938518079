use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::{
    core::pagination::DEFAULT_PAGE_SIZE,
    currency::{AmountPolicy, LocaleConfig, TypeVocabulary},
    domain::summary::{DashboardOptions, DEFAULT_RECENT_LIMIT, DEFAULT_TOP_CATEGORIES},
    errors::LedgerResult,
    period::{month_names_for, MonthNames},
};

const HOME_ENV: &str = "FINANCY_CORE_HOME";
const DEFAULT_DIR_NAME: &str = ".financy_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_PERIOD_OPTIONS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub page_size: u64,
    pub recent_limit: usize,
    pub top_categories: usize,
    /// Months offered by the period picker.
    pub period_options: usize,
    pub amount_policy: AmountPolicy,
    /// Type literals used when writing records back to the store.
    pub write_vocabulary: TypeVocabulary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            page_size: DEFAULT_PAGE_SIZE,
            recent_limit: DEFAULT_RECENT_LIMIT,
            top_categories: DEFAULT_TOP_CATEGORIES,
            period_options: DEFAULT_PERIOD_OPTIONS,
            amount_policy: AmountPolicy::default(),
            write_vocabulary: TypeVocabulary::default(),
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale, &self.currency)
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            recent_limit: self.recent_limit,
            top_categories: self.top_categories,
        }
    }

    pub fn month_names(&self) -> &'static dyn MonthNames {
        month_names_for(&self.locale)
    }
}

/// Returns the application data directory, defaulting to `~/.financy_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            path: base.into().join(CONFIG_FILE),
        }
    }

    /// Reads the config file; a missing file yields defaults.
    pub fn load(&self) -> LedgerResult<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &Config) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> LedgerResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
