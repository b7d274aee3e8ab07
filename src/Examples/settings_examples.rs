use crate::LocalSettings::chattering_species::{ATOM_TAGS, get_chattering_species};
use crate::LocalSettings::sensitivity_analysis::get_s_a_setting;
use crate::LocalSettings::settings_api::{SettingsSection, all_sections, check_all};
use crate::LocalSettings::system_settings::get_local_settings;

pub fn settings_examples(task: usize) {
    match task {
        0 => {
            // LOCAL SETTINGS FOR THE C++ CODE
            let settings = get_local_settings();
            settings.pretty_print();
            println!(
                "pathways sampled from {:.6e} s to {:.6e} s, MC at {:.6e} s",
                settings.begin_time(),
                settings.end_time(),
                settings.mc_time()
            );
        }
        1 => {
            // chattering species for every atom-following scheme
            for tag in ATOM_TAGS {
                let chattering = get_chattering_species(tag);
                println!("atom followed: {}", tag);
                println!("{}", serde_json::to_string(&chattering).unwrap_or_default());
            }
        }
        2 => {
            // sensitivity analysis: the stored N_variable against n_dim - len(exclude)
            let sa = get_s_a_setting();
            sa.pretty_print();
            println!("sampled dimensions: {:?}", sa.sampled_dimensions());
            if let Err(e) = sa.validate() {
                println!("{}", e);
                let derived = sa.with_derived_n_variable();
                println!("derived N_variable = {}", derived.n_variable);
            }
            match sa.nominal_concentrations() {
                Ok(conc) => println!("nominal initial condition: {}", conc),
                Err(e) => println!("{}", e),
            }
        }
        3 => {
            // all sections through the common interface
            let sections = all_sections("C");
            for section in &sections {
                section.pretty_print();
            }
            for (name, e) in check_all(&sections) {
                println!("{}: {}", name, e);
            }
        }
        _ => println!("no such example"),
    }
}
