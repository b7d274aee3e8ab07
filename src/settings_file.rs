//! # Settings File Module
//!
//! ## Purpose
//! Keeps the local settings in `setting.json`, the file the C++ pathway code reads its
//! solver, network and propagator options from. The JSON keys are the ones the C++ side
//! expects (`"system"`, `"network"`, `"propagator"`, `"traj_max_t"`, ... `"tag"`).
//!
//! ## Key Features
//! - **Default Fallback**: a missing or unreadable file gives the built-in local settings
//! - **Validation**: files are validated after parsing, setters validate before saving
//! - **Persistence**: every successful update is written back to the file
//!
//! ## Usage
//! ```rust, ignore
//! use KiPath::settings_file::SettingsFile;
//!
//! let mut file = SettingsFile::with_config_file("./setting.json");
//! file.set_atom_followed("HA4")?;
//! file.set_path_filters(Some("S(25|27)".to_string()), None)?;
//! ```

use crate::LocalSettings::settings_error::SettingsError;
use crate::LocalSettings::system_settings::{LocalSettings, get_local_settings};
use log::{info, warn};
use std::fs;
use std::path::Path;

pub const DEFAULT_SETTINGS_FILE: &str = "setting.json";

/// Local settings bound to the JSON file they are persisted in.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    config: LocalSettings,
    config_file: String,
}

impl SettingsFile {
    /// Loads `setting.json` from the current directory, or uses the default settings.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_SETTINGS_FILE)
    }

    /// Loads settings from `config_file`. Missing or invalid files give the default settings.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "could not use settings from '{}' ({}), falling back to defaults",
                    config_file, e
                );
                get_local_settings()
            }
        };
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// Reads and validates settings from a JSON file.
    ///
    /// # Returns
    /// * `Ok(LocalSettings)` - parsed settings, or the defaults if the file does not exist
    /// * `Err(SettingsError)` - on I/O, JSON or validation errors
    pub fn load_config(config_file: &str) -> Result<LocalSettings, SettingsError> {
        if !Path::new(config_file).exists() {
            return Ok(get_local_settings());
        }
        let content = fs::read_to_string(config_file)?;
        let config: LocalSettings = serde_json::from_str(&content)?;
        config.validate()?;
        info!("local settings loaded from '{}'", config_file);
        Ok(config)
    }

    pub fn save_config(&self) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        info!("local settings written to '{}'", self.config_file);
        Ok(())
    }

    pub fn get_config(&self) -> &LocalSettings {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Replaces the settings if they pass validation, then saves them.
    pub fn update(&mut self, config: LocalSettings) -> Result<(), SettingsError> {
        config.validate()?;
        self.config = config;
        self.save_config()
    }

    pub fn set_atom_followed(&mut self, atom_followed: &str) -> Result<(), SettingsError> {
        let mut config = self.config.clone();
        config.atom_f = atom_followed.trim().to_string();
        self.update(config)
    }

    pub fn set_init_species(&mut self, init_s: usize) -> Result<(), SettingsError> {
        let mut config = self.config.clone();
        config.init_s = init_s;
        self.update(config)
    }

    pub fn set_path_filters(
        &mut self,
        path_reg: Option<String>,
        no_path_reg: Option<String>,
    ) -> Result<(), SettingsError> {
        let mut config = self.config.clone();
        config.path_reg = path_reg;
        config.no_path_reg = no_path_reg;
        self.update(config)
    }

    /// `begin_t` and `end_t` as fractions of `tau`
    pub fn set_time_window(&mut self, begin_t: f64, end_t: f64) -> Result<(), SettingsError> {
        let mut config = self.config.clone();
        config.begin_t = begin_t;
        config.end_t = end_t;
        self.update(config)
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.config = get_local_settings();
        self.save_config()
    }
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setting.json");
        let file = SettingsFile::with_config_file(path.to_str().unwrap());
        assert_eq!(file.get_config(), &get_local_settings());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setting.json");
        let path = path.to_str().unwrap();

        let mut file = SettingsFile::with_config_file(path);
        file.set_atom_followed("HA4").unwrap();
        file.set_init_species(60).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("\"atom_f\": \"HA4\""));
        assert!(content.contains("\"merge_chatterings\": \"yes\""));
        assert!(content.contains("\"sub_type\": \"time_propagator_cv_s2m_pgt\""));

        let reloaded = SettingsFile::with_config_file(path);
        assert_eq!(reloaded.get_config().atom_f, "HA4");
        assert_eq!(reloaded.get_config().init_s, 60);
        assert_eq!(reloaded.get_config().tau, get_local_settings().tau);
        assert_eq!(reloaded.get_config().traj_max_t, 0.779074999626780951);
    }

    #[test]
    fn test_invalid_update_is_not_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setting.json");
        let mut file = SettingsFile::with_config_file(path.to_str().unwrap());

        let res = file.set_path_filters(Some("S(25".to_string()), None);
        assert!(matches!(res, Err(SettingsError::InvalidRegex { .. })));
        assert_eq!(file.get_config().path_reg, None);
        assert!(!path.exists());

        let res = file.set_time_window(0.9, 0.1);
        assert!(matches!(res, Err(SettingsError::InvalidTime(_))));
        assert_eq!(file.get_config().begin_t, 0.0);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{\"system\": ").unwrap();
        let path = temp_file.path().to_str().unwrap();

        assert!(matches!(
            SettingsFile::load_config(path),
            Err(SettingsError::Serde(_))
        ));
        let file = SettingsFile::with_config_file(path);
        assert_eq!(file.get_config(), &get_local_settings());
    }

    #[test]
    fn test_file_failing_validation_is_rejected() {
        let mut settings = get_local_settings();
        settings.begin_t = 1.0;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(serde_json::to_string(&settings).unwrap().as_bytes())
            .unwrap();
        let res = SettingsFile::load_config(temp_file.path().to_str().unwrap());
        assert!(matches!(res, Err(SettingsError::InvalidTime(_))));
    }

    #[test]
    fn test_reset_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setting.json");
        let mut file = SettingsFile::with_config_file(path.to_str().unwrap());
        file.set_atom_followed("O").unwrap();
        file.reset_to_defaults().unwrap();
        assert_eq!(file.get_config().atom_f, "C");
        let reloaded = SettingsFile::load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(reloaded, get_local_settings());
    }
}
