/// Common interface of the three settings records, so the CLI and the settings file can
/// print, check and export them without knowing which one they hold.
use super::chattering_species::{ChatteringSpecies, get_chattering_species};
use super::sensitivity_analysis::{SensitivityAnalysisSettings, get_s_a_setting};
use super::settings_error::SettingsError;
use super::system_settings::{LocalSettings, get_local_settings};
use enum_dispatch::enum_dispatch;
use log::info;
use prettytable::Table;

#[enum_dispatch]
pub trait SettingsSection {
    fn section_name(&self) -> String;
    fn check(&self) -> Result<(), SettingsError>;
    fn to_table(&self) -> Table;
    fn to_json(&self) -> Result<String, SettingsError>;
    fn pretty_print(&self);
}

impl SettingsSection for LocalSettings {
    fn section_name(&self) -> String {
        "local settings".to_string()
    }
    fn check(&self) -> Result<(), SettingsError> {
        self.validate()
    }
    fn to_table(&self) -> Table {
        self.create_table()
    }
    fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    fn pretty_print(&self) {
        info!("{}", self.section_name());
        self.create_table().printstd();
    }
}

impl SettingsSection for ChatteringSpecies {
    fn section_name(&self) -> String {
        "chattering species".to_string()
    }
    fn check(&self) -> Result<(), SettingsError> {
        self.validate()
    }
    fn to_table(&self) -> Table {
        self.create_table()
    }
    fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    fn pretty_print(&self) {
        info!("{}: {} pairs", self.section_name(), self.len());
        self.create_table().printstd();
    }
}

impl SettingsSection for SensitivityAnalysisSettings {
    fn section_name(&self) -> String {
        "sensitivity analysis settings".to_string()
    }
    fn check(&self) -> Result<(), SettingsError> {
        self.validate()
    }
    fn to_table(&self) -> Table {
        self.create_table()
    }
    fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    fn pretty_print(&self) {
        info!("{}", self.section_name());
        self.create_table().printstd();
    }
}

#[derive(Clone, Debug)]
#[enum_dispatch(SettingsSection)]
pub enum SettingsEnum {
    System(LocalSettings),
    Chattering(ChatteringSpecies),
    SensitivityAnalysis(SensitivityAnalysisSettings),
}

pub enum SettingsType {
    System,
    Chattering,
    SensitivityAnalysis,
}

/// default record of the given type; `atom_followed` is only used for chattering species
pub fn create_settings(settings_type: SettingsType, atom_followed: &str) -> SettingsEnum {
    match settings_type {
        SettingsType::System => SettingsEnum::System(get_local_settings()),
        SettingsType::Chattering => {
            SettingsEnum::Chattering(get_chattering_species(atom_followed))
        }
        SettingsType::SensitivityAnalysis => {
            SettingsEnum::SensitivityAnalysis(get_s_a_setting())
        }
    }
}

pub fn all_sections(atom_followed: &str) -> Vec<SettingsEnum> {
    vec![
        create_settings(SettingsType::System, atom_followed),
        create_settings(SettingsType::Chattering, atom_followed),
        create_settings(SettingsType::SensitivityAnalysis, atom_followed),
    ]
}

/// checks every section and returns the names of the failed ones with their errors
pub fn check_all(sections: &[SettingsEnum]) -> Vec<(String, SettingsError)> {
    sections
        .iter()
        .filter_map(|section| section.check().err().map(|e| (section.section_name(), e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_names() {
        let names: Vec<String> = all_sections("C").iter().map(|s| s.section_name()).collect();
        assert_eq!(
            names,
            vec![
                "local settings",
                "chattering species",
                "sensitivity analysis settings"
            ]
        );
    }

    #[test]
    fn test_check_all_reports_variable_count() {
        let failed = check_all(&all_sections("C"));
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, "sensitivity analysis settings");
        assert!(matches!(
            failed[0].1,
            SettingsError::InconsistentVariableCount { .. }
        ));
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let section = create_settings(SettingsType::Chattering, "O");
        let direct = get_chattering_species("O");
        assert_eq!(section.to_json().unwrap(), serde_json::to_string_pretty(&direct).unwrap());
        assert_eq!(section.to_table().len(), direct.create_table().len());

        let section: SettingsEnum = get_local_settings().into();
        assert!(section.check().is_ok());
        assert!(section.to_json().unwrap().contains("\"merge_chatterings\": \"yes\""));
    }
}
