/// printing and checking the built-in settings
pub mod settings_examples;
