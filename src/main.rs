use KiPath::Utils::logger::{init_logger, level_from_verbosity};
use KiPath::cli::cli_main::run_interactive_menu;

pub fn main() {
    // KIPATH_VERBOSITY: 0 - warnings ... 3 - trace
    let verbosity = std::env::var("KIPATH_VERBOSITY")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(1);
    if let Err(e) = init_logger(level_from_verbosity(verbosity), None) {
        eprintln!("{}", e);
    }
    run_interactive_menu();
}
