//! # System Settings Module
//!
//! ## Purpose
//! Settings handed to the C++ pathway code through `setting.json`: which ODE solver and
//! initializer to use, how the reaction network is reduced (merging and condensing of
//! chattering species), how the time propagator is configured, and which pathways are
//! picked for the analysis (followed atom, initial species, regular expression filters,
//! top-N counts, number of Monte-Carlo and path integral trajectories).
//!
//! ## Main Data Structures
//! - `LocalSettings`: the whole record, serialized with exactly the key names the C++ side reads
//! - `SystemSection`, `NetworkSection`, `PropagatorSection`: nested blocks
//! - `FixedTime`: whether `t0` or `tf` is fixed when pathways are sampled
//! - `ConcentrationTag`: molar concentration (`"M"`) or mole fraction (`"fraction"`)
//!
//! ## Time markers
//! `mc_t`, `begin_t` and `end_t` are fractions of the reference time `tau` (for a combustion
//! system `tau` is the ignition delay, here the time where dT/dt is maximal). The absolute
//! times are given by `mc_time()`, `begin_time()` and `end_time()`.
//!
//! ## Usage
//! ```rust
//! use KiPath::LocalSettings::system_settings::get_local_settings;
//! let settings = get_local_settings();
//! assert_eq!(settings.atom_f, "C");
//! assert!(settings.validate().is_ok());
//! ```

use super::pathway_filter::PathwayFilter;
use super::serde_flags::{true_false, yes_no};
use super::settings_error::SettingsError;
use log::debug;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};

/// solver identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSection {
    /// "cv" - constant volume
    pub condition: String,
    pub initializer: String,
}

/// reaction network reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSection {
    #[serde(with = "yes_no")]
    pub merge_chatterings: bool,
    #[serde(with = "yes_no")]
    pub condense_chatterings: bool,
    /// species a pathway is not allowed to leave through
    pub not_allowed_out_species: Vec<usize>,
    #[serde(with = "true_false")]
    pub spe_branching: bool,
    #[serde(with = "true_false")]
    pub terminal_sp: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagatorSection {
    pub primary_type: String,
    #[serde(rename = "type")]
    pub propagator_type: String,
    pub sub_type: String,
    #[serde(with = "yes_no")]
    pub convert_molar_concentration_to_mole_fraction: bool,
    #[serde(with = "yes_no")]
    pub normalize_initial_concentration: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixedTime {
    #[serde(rename = "t0")]
    T0,
    #[serde(rename = "tf")]
    Tf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcentrationTag {
    #[serde(rename = "M")]
    Molar,
    #[serde(rename = "fraction")]
    Fraction,
}

/// settings for the C++ codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSettings {
    pub system: SystemSection,
    pub network: NetworkSection,
    pub propagator: PropagatorSection,
    /// trajectory max time, used to solve the reference trajectory
    pub traj_max_t: f64,
    /// trajectory critical time, after which more data points are printed out
    pub traj_critical_t: f64,
    /// reference time
    pub tau: f64,
    /// time at which MC generates the pathway list, time = mc_t * tau
    pub mc_t: f64,
    pub begin_t: f64,
    pub end_t: f64,
    pub fixed_t0_or_tf: FixedTime,
    /// if true, pick pathways ending with the top_n species, otherwise just top n pathways
    pub spe_oriented: bool,
    /// condensed species path, no reactions
    pub species_path: bool,
    /// atom followed
    pub atom_f: String,
    pub init_s: usize,
    #[serde(default)]
    pub terminal_spe: Option<Vec<usize>>,
    /// pathways must contain this expression
    #[serde(default)]
    pub path_reg: Option<String>,
    /// pathways must not contain this expression
    #[serde(default)]
    pub no_path_reg: Option<String>,
    /// initial species indices for species passage time evaluation
    #[serde(default)]
    pub init_s_idx: Option<Vec<usize>>,
    #[serde(default)]
    pub end_s_idx: Option<Vec<usize>>,
    pub top_n_p: usize,
    /// top n pathways for gephi to generate coordinates
    pub top_n_p_gephi: usize,
    pub top_n_s: usize,
    pub mc_n_traj: f64,
    /// path integral number of trajectories
    pub pi_n_traj: usize,
    pub pi_n_time: usize,
    pub tag: ConcentrationTag,
}

/// Returns a fresh copy of the local settings.
#[allow(clippy::excessive_precision)]
pub fn get_local_settings() -> LocalSettings {
    LocalSettings {
        system: SystemSection {
            condition: "cv".to_string(),
            initializer: "dlsode".to_string(),
        },
        network: NetworkSection {
            merge_chatterings: true,
            condense_chatterings: true,
            not_allowed_out_species: vec![10],
            spe_branching: false,
            terminal_sp: false,
        },
        propagator: PropagatorSection {
            primary_type: "from_file".to_string(),
            propagator_type: "dlsode".to_string(),
            sub_type: "time_propagator_cv_s2m_pgt".to_string(),
            convert_molar_concentration_to_mole_fraction: false,
            normalize_initial_concentration: true,
        },
        traj_max_t: 0.779074999626780951,
        traj_critical_t: 0.751999999880706205,
        tau: 0.777660157519,
        mc_t: 0.9,
        begin_t: 0.0,
        end_t: 0.9,
        fixed_t0_or_tf: FixedTime::T0,
        spe_oriented: false,
        species_path: false,
        atom_f: "C".to_string(),
        init_s: 61,
        terminal_spe: Some(vec![]),
        path_reg: None,
        no_path_reg: None,
        init_s_idx: Some(vec![]),
        end_s_idx: None,
        top_n_p: 100,
        top_n_p_gephi: 500,
        top_n_s: 5,
        mc_n_traj: 1e8,
        pi_n_traj: 10000,
        pi_n_time: 1,
        tag: ConcentrationTag::Molar,
    }
}

impl Default for LocalSettings {
    fn default() -> Self {
        get_local_settings()
    }
}

impl LocalSettings {
    /// absolute time at which MC generates the pathway list
    pub fn mc_time(&self) -> f64 {
        self.mc_t * self.tau
    }

    pub fn begin_time(&self) -> f64 {
        self.begin_t * self.tau
    }

    pub fn end_time(&self) -> f64 {
        self.end_t * self.tau
    }

    /// `mc_n_traj` is stored as a float (1e8), the trajectory count is its integer part
    pub fn mc_n_traj_count(&self) -> u64 {
        self.mc_n_traj as u64
    }

    /// compiles `path_reg` and `no_path_reg`
    pub fn pathway_filter(&self) -> Result<PathwayFilter, SettingsError> {
        PathwayFilter::from_settings(self)
    }

    /// Checks the time markers, the followed atom and the pathway regular expressions.
    ///
    /// # Returns
    /// * `Ok(())` - settings are usable by the C++ code
    /// * `Err(SettingsError)` - first violated condition
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tau > 0.0) {
            return Err(SettingsError::InvalidTime(format!(
                "tau must be positive, found {}",
                self.tau
            )));
        }
        if !(0.0 <= self.begin_t && self.begin_t <= self.end_t) {
            return Err(SettingsError::InvalidTime(format!(
                "expected 0 <= begin_t <= end_t, found begin_t = {}, end_t = {}",
                self.begin_t, self.end_t
            )));
        }
        if self.traj_critical_t > self.traj_max_t {
            return Err(SettingsError::InvalidTime(format!(
                "traj_critical_t = {} exceeds traj_max_t = {}",
                self.traj_critical_t, self.traj_max_t
            )));
        }
        if self.atom_f.trim().is_empty() {
            return Err(SettingsError::EmptyAtomTag);
        }
        self.pathway_filter()?;
        debug!("local settings validated, atom followed: {}", self.atom_f);
        Ok(())
    }

    pub fn create_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["condition", self.system.condition]);
        table.add_row(row!["initializer", self.system.initializer]);
        table.add_row(row!["merge_chatterings", self.network.merge_chatterings]);
        table.add_row(row!["condense_chatterings", self.network.condense_chatterings]);
        table.add_row(row![
            "not_allowed_out_species",
            format!("{:?}", self.network.not_allowed_out_species)
        ]);
        table.add_row(row!["spe_branching", self.network.spe_branching]);
        table.add_row(row!["terminal_sp", self.network.terminal_sp]);
        table.add_row(row!["primary_type", self.propagator.primary_type]);
        table.add_row(row!["propagator", self.propagator.propagator_type]);
        table.add_row(row!["sub_type", self.propagator.sub_type]);
        table.add_row(row![
            "convert_molar_concentration_to_mole_fraction",
            self.propagator.convert_molar_concentration_to_mole_fraction
        ]);
        table.add_row(row![
            "normalize_initial_concentration",
            self.propagator.normalize_initial_concentration
        ]);
        table.add_row(row!["traj_max_t", self.traj_max_t]);
        table.add_row(row!["traj_critical_t", self.traj_critical_t]);
        table.add_row(row!["tau", self.tau]);
        table.add_row(row!["mc_t", format!("{} ({:.6e} s)", self.mc_t, self.mc_time())]);
        table.add_row(row![
            "begin_t",
            format!("{} ({:.6e} s)", self.begin_t, self.begin_time())
        ]);
        table.add_row(row!["end_t", format!("{} ({:.6e} s)", self.end_t, self.end_time())]);
        table.add_row(row!["fixed_t0_or_tf", format!("{:?}", self.fixed_t0_or_tf)]);
        table.add_row(row!["spe_oriented", self.spe_oriented]);
        table.add_row(row!["species_path", self.species_path]);
        table.add_row(row!["atom_f", self.atom_f]);
        table.add_row(row!["init_s", self.init_s]);
        table.add_row(row!["terminal_spe", format!("{:?}", self.terminal_spe)]);
        table.add_row(row!["path_reg", format!("{:?}", self.path_reg)]);
        table.add_row(row!["no_path_reg", format!("{:?}", self.no_path_reg)]);
        table.add_row(row!["init_s_idx", format!("{:?}", self.init_s_idx)]);
        table.add_row(row!["end_s_idx", format!("{:?}", self.end_s_idx)]);
        table.add_row(row!["top_n_p", self.top_n_p]);
        table.add_row(row!["top_n_p_gephi", self.top_n_p_gephi]);
        table.add_row(row!["top_n_s", self.top_n_s]);
        table.add_row(row!["mc_n_traj", format!("{:e}", self.mc_n_traj)]);
        table.add_row(row!["pi_n_traj", self.pi_n_traj]);
        table.add_row(row!["pi_n_time", self.pi_n_time]);
        table.add_row(row!["tag", format!("{:?}", self.tag)]);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::Value;

    #[test]
    fn test_literal_values() {
        let s = get_local_settings();
        assert_eq!(s.system.condition, "cv");
        assert_eq!(s.system.initializer, "dlsode");
        assert!(s.network.merge_chatterings);
        assert!(s.network.condense_chatterings);
        assert_eq!(s.network.not_allowed_out_species, vec![10]);
        assert!(!s.network.spe_branching);
        assert!(!s.network.terminal_sp);
        assert_eq!(s.propagator.primary_type, "from_file");
        assert_eq!(s.propagator.propagator_type, "dlsode");
        assert_eq!(s.propagator.sub_type, "time_propagator_cv_s2m_pgt");
        assert!(!s.propagator.convert_molar_concentration_to_mole_fraction);
        assert!(s.propagator.normalize_initial_concentration);
        assert_eq!(s.traj_max_t, 0.779074999626780951);
        assert_eq!(s.traj_critical_t, 0.751999999880706205);
        assert_eq!(s.tau, 0.777660157519);
        assert_eq!(s.mc_t, 0.9);
        assert_eq!(s.begin_t, 0.0);
        assert_eq!(s.end_t, 0.9);
        assert_eq!(s.fixed_t0_or_tf, FixedTime::T0);
        assert!(!s.spe_oriented);
        assert!(!s.species_path);
        assert_eq!(s.atom_f, "C");
        assert_eq!(s.init_s, 61);
        assert_eq!(s.terminal_spe, Some(vec![]));
        assert_eq!(s.path_reg, None);
        assert_eq!(s.no_path_reg, None);
        assert_eq!(s.init_s_idx, Some(vec![]));
        assert_eq!(s.end_s_idx, None);
        assert_eq!(s.top_n_p, 100);
        assert_eq!(s.top_n_p_gephi, 500);
        assert_eq!(s.top_n_s, 5);
        assert_eq!(s.mc_n_traj, 1e8);
        assert_eq!(s.pi_n_traj, 10000);
        assert_eq!(s.pi_n_time, 1);
        assert_eq!(s.tag, ConcentrationTag::Molar);
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let mut first = get_local_settings();
        first.network.not_allowed_out_species.push(99);
        first.atom_f = "H".to_string();
        let second = get_local_settings();
        assert_eq!(second.network.not_allowed_out_species, vec![10]);
        assert_eq!(second.atom_f, "C");
        assert_eq!(get_local_settings(), get_local_settings());
    }

    #[test]
    fn test_absolute_times() {
        let s = get_local_settings();
        assert_relative_eq!(s.mc_time(), 0.9 * 0.777660157519, epsilon = 1e-15);
        assert_eq!(s.begin_time(), 0.0);
        assert_relative_eq!(s.end_time(), 0.6998941417671, epsilon = 1e-12);
        assert_eq!(s.mc_n_traj_count(), 100_000_000);
    }

    #[test]
    fn test_json_key_names() {
        let value = serde_json::to_value(get_local_settings()).unwrap();
        assert_eq!(value["system"]["condition"], "cv");
        assert_eq!(value["network"]["merge_chatterings"], "yes");
        assert_eq!(value["network"]["spe_branching"], "false");
        assert_eq!(value["propagator"]["type"], "dlsode");
        assert_eq!(
            value["propagator"]["convert_molar_concentration_to_mole_fraction"],
            "no"
        );
        assert_eq!(value["fixed_t0_or_tf"], "t0");
        assert_eq!(value["tag"], "M");
        assert_eq!(value["spe_oriented"], Value::Bool(false));
        assert_eq!(value["path_reg"], Value::Null);
        assert_eq!(value["terminal_spe"], serde_json::json!([]));
        assert_eq!(value["init_s"], 61);
        assert_eq!(value.as_object().unwrap().len(), 26);
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(get_local_settings().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_reversed_window() {
        let mut s = get_local_settings();
        s.begin_t = 0.95;
        assert!(matches!(s.validate(), Err(SettingsError::InvalidTime(_))));
    }

    #[test]
    fn test_validate_rejects_nan_window() {
        let mut s = get_local_settings();
        s.begin_t = f64::NAN;
        assert!(matches!(s.validate(), Err(SettingsError::InvalidTime(_))));

        let mut s = get_local_settings();
        s.end_t = f64::NAN;
        assert!(matches!(s.validate(), Err(SettingsError::InvalidTime(_))));
    }

    #[test]
    fn test_validate_rejects_bad_tau_and_atom() {
        let mut s = get_local_settings();
        s.tau = 0.0;
        assert!(matches!(s.validate(), Err(SettingsError::InvalidTime(_))));

        let mut s = get_local_settings();
        s.atom_f = " ".to_string();
        assert!(matches!(s.validate(), Err(SettingsError::EmptyAtomTag)));
    }

    #[test]
    fn test_validate_rejects_bad_regex() {
        let mut s = get_local_settings();
        s.no_path_reg = Some("S(60R|60$".to_string());
        match s.validate() {
            Err(SettingsError::InvalidRegex { field, .. }) => assert_eq!(field, "no_path_reg"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_table_has_row_per_parameter() {
        let table = get_local_settings().create_table();
        // header + 35 parameters
        assert_eq!(table.len(), 36);
        let names: Vec<String> = table
            .row_iter()
            .filter_map(|row| row.get_cell(0).map(|cell| cell.get_content()))
            .collect();
        for name in [
            "spe_branching",
            "terminal_sp",
            "primary_type",
            "convert_molar_concentration_to_mole_fraction",
            "normalize_initial_concentration",
        ] {
            assert!(names.iter().any(|n| n == name), "missing row {}", name);
        }
    }
}
