//! # Sensitivity Analysis Settings Module
//!
//! ## Purpose
//! Parameters of the Monte-Carlo sensitivity analysis: rate constant uncertainties are
//! sampled in an `n_dim` dimensional space (dimensions listed in `exclude` are kept at
//! their nominal values), every sample is integrated by the external solver and the
//! target (e.g. ignition delay at `target_temp`) is fitted by least square regression
//! with polynomials of order `Nth_order_1st` / `Nth_order_2nd` in `N_variable` variables.
//!
//! ## Nominal initial condition
//! `spe_idx_conc` maps species index to its nominal concentration at 1.0e-5 s.
//! Keys are written as string-encoded integers in JSON.
//!
//! ## Consistency
//! `N_variable` should equal `n_dim - len(exclude)`. The stored value (8) does not
//! (8 - 2 = 6) and is kept as it is; `validate()` reports the mismatch and
//! `with_derived_n_variable()` gives a consistent copy.

use super::settings_error::SettingsError;
use log::{debug, warn};
use nalgebra::DVector;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// largest species index accepted in `spe_idx_conc`
pub const MAX_SPECIES_INDEX: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAnalysisSettings {
    /// number of runs (samples)
    pub n_run: usize,
    /// seconds; a single MC run taking longer is terminated
    pub timeout: u64,
    /// space dimensionality
    pub n_dim: usize,
    /// dimensions that are not sampled
    #[serde(default)]
    pub exclude: Option<Vec<usize>>,
    #[serde(rename = "N_variable")]
    pub n_variable: usize,
    #[serde(rename = "Nth_order_1st")]
    pub nth_order_1st: usize,
    #[serde(rename = "Nth_order_2nd")]
    pub nth_order_2nd: usize,
    pub default_uncertainty: f64,
    /// K
    pub init_temp: u32,
    pub critical_temp: u32,
    pub end_temp: u32,
    pub target_temp: u32,
    /// species index -> nominal concentration
    pub spe_idx_conc: BTreeMap<usize, f64>,
}

/// Returns a fresh copy of the sensitivity analysis parameters.
#[allow(clippy::excessive_precision)]
pub fn get_s_a_setting() -> SensitivityAnalysisSettings {
    let spe_idx_conc = BTreeMap::from([
        (0, 2.25322792340927307e-05),
        (1, 1.06745743007354256e-13),
        (2, 4.50645594093571151e-05),
        (3, 8.72629092217001897e-15),
        (4, 4.96216242705939368e-15),
        (5, 1.92864677174077298e-16),
        (6, 6.22838831591819596e-13),
        (7, 5.71763673264164999e-16),
    ]);
    SensitivityAnalysisSettings {
        n_run: 5000,
        timeout: 300,
        n_dim: 8,
        exclude: Some(vec![0, 2]),
        n_variable: 8,
        nth_order_1st: 2,
        nth_order_2nd: 2,
        default_uncertainty: 100.0,
        init_temp: 1000,
        critical_temp: 1100,
        end_temp: 1900,
        target_temp: 1800,
        spe_idx_conc,
    }
}

impl Default for SensitivityAnalysisSettings {
    fn default() -> Self {
        get_s_a_setting()
    }
}

impl SensitivityAnalysisSettings {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn n_excluded(&self) -> usize {
        self.exclude.as_ref().map_or(0, |e| e.len())
    }

    /// dimensions that are sampled, in ascending order
    pub fn sampled_dimensions(&self) -> Vec<usize> {
        let excluded = self.exclude.as_deref().unwrap_or(&[]);
        (0..self.n_dim).filter(|d| !excluded.contains(d)).collect()
    }

    /// Nominal concentrations indexed by species, species without an entry get 0.0.
    pub fn nominal_concentrations(&self) -> Result<DVector<f64>, SettingsError> {
        let n = match self.spe_idx_conc.keys().next_back() {
            Some(&max) if max > MAX_SPECIES_INDEX => {
                return Err(SettingsError::SpeciesIndexOutOfRange {
                    index: max,
                    limit: MAX_SPECIES_INDEX,
                });
            }
            Some(&max) => max + 1,
            None => 0,
        };
        let mut conc = DVector::zeros(n);
        for (&idx, &c) in &self.spe_idx_conc {
            conc[idx] = c;
        }
        Ok(conc)
    }

    /// copy with `N_variable` recomputed from `n_dim` and `exclude`
    pub fn with_derived_n_variable(&self) -> Self {
        let mut settings = self.clone();
        settings.n_variable = self.n_dim.saturating_sub(self.n_excluded());
        settings
    }

    /// Checks the variable count, the excluded dimensions, the concentrations and the
    /// temperature markers. Stops at the first problem.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(exclude) = &self.exclude {
            if let Some(&index) = exclude.iter().find(|&&i| i >= self.n_dim) {
                return Err(SettingsError::IndexOutOfRange {
                    what: "excluded dimension",
                    index,
                    n_dim: self.n_dim,
                });
            }
            let mut seen = BTreeSet::new();
            if let Some(&index) = exclude.iter().find(|&&i| !seen.insert(i)) {
                return Err(SettingsError::DuplicateExcludedDimension(index));
            }
        }
        let excluded = self.n_excluded();
        if self.n_dim.checked_sub(excluded) != Some(self.n_variable) {
            warn!(
                "N_variable = {}, expected {}",
                self.n_variable,
                self.n_dim.saturating_sub(excluded)
            );
            return Err(SettingsError::InconsistentVariableCount {
                n_variable: self.n_variable,
                n_dim: self.n_dim,
                excluded,
            });
        }
        if let Some(&index) = self.spe_idx_conc.keys().find(|&&i| i > MAX_SPECIES_INDEX) {
            return Err(SettingsError::SpeciesIndexOutOfRange {
                index,
                limit: MAX_SPECIES_INDEX,
            });
        }
        if let Some((idx, c)) = self
            .spe_idx_conc
            .iter()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(SettingsError::InvalidConcentration {
                species: *idx,
                value: *c,
            });
        }
        if !(self.init_temp < self.critical_temp
            && self.critical_temp <= self.target_temp
            && self.target_temp <= self.end_temp)
        {
            return Err(SettingsError::InvalidTemperatureOrder(format!(
                "expected init_temp < critical_temp <= target_temp <= end_temp, found {} {} {} {}",
                self.init_temp, self.critical_temp, self.target_temp, self.end_temp
            )));
        }
        debug!(
            "sensitivity analysis settings validated: {} runs, {} variables",
            self.n_run, self.n_variable
        );
        Ok(())
    }

    pub fn create_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["n_run", self.n_run]);
        table.add_row(row!["timeout, s", self.timeout]);
        table.add_row(row!["n_dim", self.n_dim]);
        table.add_row(row!["exclude", format!("{:?}", self.exclude)]);
        table.add_row(row!["N_variable", self.n_variable]);
        table.add_row(row!["Nth_order_1st", self.nth_order_1st]);
        table.add_row(row!["Nth_order_2nd", self.nth_order_2nd]);
        table.add_row(row!["default_uncertainty", self.default_uncertainty]);
        table.add_row(row!["init_temp, K", self.init_temp]);
        table.add_row(row!["critical_temp, K", self.critical_temp]);
        table.add_row(row!["end_temp, K", self.end_temp]);
        table.add_row(row!["target_temp, K", self.target_temp]);
        for (idx, c) in &self.spe_idx_conc {
            table.add_row(row![format!("conc[{}]", idx), format!("{:.17e}", c)]);
        }
        table
    }
}
