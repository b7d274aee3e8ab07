use crate::Examples::settings_examples::settings_examples;
use crate::LocalSettings::chattering_species::get_chattering_species;
use crate::LocalSettings::sensitivity_analysis::get_s_a_setting;
use crate::LocalSettings::settings_api::{SettingsSection, all_sections, check_all};
use crate::LocalSettings::system_settings::get_local_settings;
use crate::settings_file::SettingsFile;
use log::error;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => get_local_settings().pretty_print(),
            "2" => chattering_menu(),
            "3" => get_s_a_setting().pretty_print(),
            "4" => export_settings(),
            "5" => validate_all(),
            "6" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - header
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompt
Reset (\x1b[0m)
*/
fn show_main_menu() {
    println!("\x1b[34m\n KiPath: local settings for reaction pathway analysis \n\x1b[0m");
    println!("\x1b[33m1. Local settings (C++ solver)\x1b[0m");
    println!("\x1b[33m2. Chattering species\x1b[0m");
    println!("\x1b[33m3. Sensitivity analysis settings\x1b[0m");
    println!("\x1b[33m4. Export setting.json\x1b[0m");
    println!("\x1b[33m5. Validate all settings\x1b[0m");
    println!("\x1b[33m6. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

fn chattering_menu() {
    prompt("Atom followed (H, C, O, HA1..HA6) [C]: ");
    let atom = get_user_input().unwrap_or_default();
    let atom = match atom.trim() {
        "" => "C",
        tag => tag,
    };
    let chattering = get_chattering_species(atom);
    if chattering.is_empty() {
        println!("No chattering species for atom '{}'", atom);
    } else {
        chattering.pretty_print();
    }
}

fn export_settings() {
    let file = SettingsFile::new();
    match file.save_config() {
        Ok(()) => println!("Settings written to {}", file.config_file()),
        Err(e) => error!("failed to write {}: {}", file.config_file(), e),
    }
}

fn validate_all() {
    let failed = check_all(&all_sections(&get_local_settings().atom_f));
    if failed.is_empty() {
        println!("All settings are consistent");
    }
    for (name, e) in failed {
        println!("\x1b[31m{}: {}\x1b[0m", name, e);
    }
}

fn examples_menu() {
    println!("\n=== Examples ===");
    println!("0. Local settings and absolute times");
    println!("1. Chattering species for every atom");
    println!("2. Sensitivity analysis settings");
    println!("3. All sections");
    prompt("Enter your choice: ");
    if let Some(choice) = get_user_input() {
        match choice.trim().parse::<usize>() {
            Ok(task) => settings_examples(task),
            Err(_) => println!("Invalid choice."),
        }
    }
}

/// `None` on end of input or a read error
fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}
