/// Filters for pathway names like `S61R1096S80R1097S61`, built from the `path_reg`
/// and `no_path_reg` settings. A pathway is kept when it contains `path_reg` (or
/// `path_reg` is not set) and does not contain `no_path_reg` (or it is not set).
/// Typical values: `path_reg = "S(25|27)"`, `no_path_reg = "S(60R|60$)"` to drop
/// the primary cycles.
use super::settings_error::SettingsError;
use super::system_settings::LocalSettings;
use log::trace;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct PathwayFilter {
    pub path_reg: Option<Regex>,
    pub no_path_reg: Option<Regex>,
}

fn compile(field: &'static str, pattern: &Option<String>) -> Result<Option<Regex>, SettingsError> {
    match pattern {
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|source| SettingsError::InvalidRegex { field, source }),
        None => Ok(None),
    }
}

impl PathwayFilter {
    pub fn new(
        path_reg: Option<String>,
        no_path_reg: Option<String>,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            path_reg: compile("path_reg", &path_reg)?,
            no_path_reg: compile("no_path_reg", &no_path_reg)?,
        })
    }

    pub fn from_settings(settings: &LocalSettings) -> Result<Self, SettingsError> {
        Self::new(settings.path_reg.clone(), settings.no_path_reg.clone())
    }

    pub fn accepts(&self, path_name: &str) -> bool {
        let wanted = self
            .path_reg
            .as_ref()
            .is_none_or(|re| re.is_match(path_name));
        let banned = self
            .no_path_reg
            .as_ref()
            .is_some_and(|re| re.is_match(path_name));
        trace!(
            "pathway {} wanted: {}, banned: {}",
            path_name, wanted, banned
        );
        wanted && !banned
    }

    /// keeps the accepted pathway names in their original order
    pub fn filter<'a>(&self, path_names: &[&'a str]) -> Vec<&'a str> {
        path_names
            .iter()
            .copied()
            .filter(|name| self.accepts(name))
            .collect()
    }
}
