//! # Local Settings
//!
//! Settings of the reaction pathway analysis of the propane oxidation mechanism:
//! - `system_settings`: solver, network reduction, propagator and pathway selection
//!   options for the C++ code (`get_local_settings`)
//! - `chattering_species`: fast transitions and the chattering species pairs for a
//!   followed atom (`get_chattering_species`)
//! - `sensitivity_analysis`: Monte-Carlo sampling and regression parameters (`get_s_a_setting`)
//!
//! Every provider builds a fresh value on each call, nothing is cached or shared.
//!
//! # Examples
//! ```
//! use KiPath::LocalSettings::chattering_species::get_chattering_species;
//! use KiPath::LocalSettings::sensitivity_analysis::get_s_a_setting;
//! use KiPath::LocalSettings::system_settings::get_local_settings;
//!
//! let settings = get_local_settings();
//! let chattering = get_chattering_species(&settings.atom_f);
//! assert_eq!(chattering.get("11"), Some([45, 47]));
//!
//! let sa = get_s_a_setting();
//! // the stored N_variable does not match n_dim - len(exclude)
//! assert!(sa.validate().is_err());
//! assert!(sa.with_derived_n_variable().validate().is_ok());
//! ```

/// fast transitions and chattering species pairs
pub mod chattering_species;
/// regular expression filters of pathway names
pub mod pathway_filter;
/// Monte-Carlo sensitivity analysis parameters
pub mod sensitivity_analysis;
/// "yes"/"no" and "true"/"false" flags of the C++ settings file
pub mod serde_flags;
/// common interface of the settings records
pub mod settings_api;
pub mod settings_error;
/// solver, network, propagator and pathway selection settings
pub mod system_settings;
