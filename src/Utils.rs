/// logging setup for the binary
pub mod logger;
