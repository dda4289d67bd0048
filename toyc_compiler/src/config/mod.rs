//! Limits baked in at build time plus preferences read at run time

// Generated by build.rs from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    FileProcessorPreferences, LexicalPreferences, LoggingPreferences, ReportKind,
    ReportPreferences, RuntimeConfig,
};

/// Where the compile-time limits came from
pub mod build_info {
    pub fn profile() -> &'static str {
        option_env!("TOYC_BUILD_PROFILE").unwrap_or("development")
    }

    pub fn config_dir() -> &'static str {
        option_env!("TOYC_CONFIG_DIR").unwrap_or("config")
    }

    /// `config/development.toml` style description for startup logs
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
