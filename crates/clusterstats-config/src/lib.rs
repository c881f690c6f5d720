use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = include_str!("defaults.yaml");

/// File name looked up in the working directory and in the user config dir.
pub const CONFIG_FILE_NAME: &str = "conf.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root directory of the per-cluster kubeconfig files.
    pub kubeconfig_path: PathBuf,
    /// ConfigMaps strictly larger than this many bytes are reported.
    pub configmap_large_size: u64,
    pub concurrency: usize,
}

/// On-disk shape. Every key is optional so a partial file only overrides
/// what it names.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default, alias = "kubeconfig-path", alias = "kubeconfig_path")]
    kubeconfigpath: Option<PathBuf>,
    #[serde(default, alias = "configmap-large-size", alias = "configmap_large_size")]
    configmaplargesize: Option<u64>,
    #[serde(default)]
    concurrency: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self { kubeconfig_path: PathBuf::new(), configmap_large_size: 0, concurrency: 1 };
        let defaults: SettingsFile = serde_yaml::from_str(DEFAULT_CONFIG).expect("embedded defaults must parse");
        settings.merge(defaults);
        settings
    }
}

impl Settings {
    /// Resolves the settings for one run.
    ///
    /// An explicit `path` must exist and parse. Without one, `./conf.yaml`
    /// and then the user config dir are tried; when neither exists the
    /// embedded defaults are used. A file that exists but does not parse is
    /// always an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "loading settings");
                return Self::load_from(&candidate);
            }
        }

        tracing::warn!("no {CONFIG_FILE_NAME} found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("could not read settings {}", path.display()))?;
        let mut settings = Self::default();
        // An empty document deserializes to unit, not to a map.
        if !contents.trim().is_empty() {
            let user: SettingsFile = serde_yaml::from_str(&contents)
                .with_context(|| format!("invalid settings at {}", path.display()))?;
            settings.merge(user);
        }
        Ok(settings)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("clusterstats").join(CONFIG_FILE_NAME)
    }

    fn search_paths() -> Vec<PathBuf> {
        vec![PathBuf::from(CONFIG_FILE_NAME), Self::default_path()]
    }

    fn merge(&mut self, user: SettingsFile) {
        if let Some(path) = user.kubeconfigpath {
            self.kubeconfig_path = path;
        }
        if let Some(size) = user.configmaplargesize {
            self.configmap_large_size = size;
        }
        if let Some(concurrency) = user.concurrency {
            self.concurrency = concurrency;
        }
    }

    /// Applies command-line overrides on top of whatever the file supplied.
    pub fn with_overrides(
        mut self,
        kubeconfig_path: Option<PathBuf>,
        large_size: Option<u64>,
        concurrency: Option<usize>,
    ) -> Self {
        self.merge(SettingsFile { kubeconfigpath: kubeconfig_path, configmaplargesize: large_size, concurrency });
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        if self.kubeconfig_path.as_os_str().is_empty() {
            anyhow::bail!("kubeconfigpath is empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
