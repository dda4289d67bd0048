// build.rs - bakes the limits of config/<profile>.toml into `config::compile_time`
use std::collections::BTreeMap;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Every limit the crate reads: (section, key, rust type)
const SCHEMA: &[(&str, &str, &str)] = &[
    ("file_processing", "max_file_size", "u64"),
    ("file_processing", "large_file_threshold", "u64"),
    ("file_processing", "max_line_count_for_analysis", "usize"),
    ("lexical", "max_string_size", "usize"),
    ("lexical", "max_identifier_length", "usize"),
    ("lexical", "max_token_count", "usize"),
    ("cst", "max_tree_nodes", "usize"),
    ("symbols", "max_symbols", "usize"),
    ("symbols", "max_routines", "usize"),
    ("logging", "log_buffer_size", "usize"),
    ("logging", "max_log_message_length", "usize"),
];

#[derive(serde::Deserialize)]
struct Profile {
    #[serde(flatten)]
    sections: BTreeMap<String, BTreeMap<String, u64>>,
}

impl Profile {
    fn get(&self, section: &str, key: &str) -> u64 {
        self.sections
            .get(section)
            .and_then(|values| values.get(key))
            .copied()
            .unwrap_or_else(|| panic!("LIMITS: missing [{}] {}", section, key))
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TOYC_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=TOYC_CONFIG_DIR");

    let profile_name = env::var("TOYC_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("TOYC_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let config_path = profile_path(&config_dir, &profile_name);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));
    let profile: Profile = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&profile, &profile_name);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(
        Path::new(&out_dir).join("constants.rs"),
        render_constants(&profile, &profile_name),
    )
    .expect("Failed to write generated constants");
}

/// `<workspace>/<config_dir>/<profile>.toml`; the workspace is the parent
/// of this crate
fn profile_path(config_dir: &str, profile_name: &str) -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Crate has no parent directory");
    workspace_root
        .join(config_dir)
        .join(format!("{}.toml", profile_name))
}

fn validate_limits(profile: &Profile, profile_name: &str) {
    for (section, key, _) in SCHEMA {
        profile.get(section, key);
    }

    let max_file_size = profile.get("file_processing", "max_file_size");
    if max_file_size > 1_000_000_000 {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }
    if profile.get("file_processing", "large_file_threshold") > max_file_size {
        panic!("LIMITS: large_file_threshold cannot exceed max_file_size");
    }
    if profile.get("lexical", "max_token_count") == 0
        || profile.get("lexical", "max_identifier_length") == 0
    {
        panic!("LIMITS: lexical limits must be non-zero");
    }
    // Every token becomes exactly one tree node
    if profile.get("cst", "max_tree_nodes") < profile.get("lexical", "max_token_count") {
        panic!("LIMITS: max_tree_nodes must be at least max_token_count");
    }
    if profile.get("symbols", "max_routines") > profile.get("symbols", "max_symbols") {
        panic!("LIMITS: max_routines cannot exceed max_symbols");
    }
    if profile.get("logging", "log_buffer_size") == 0 {
        panic!("LIMITS: log_buffer_size must be non-zero");
    }
    if profile_name == "production" && max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn render_constants(profile: &Profile, profile_name: &str) -> String {
    let mut code = format!(
        "// Generated by build.rs from the `{}` profile. Do not edit.\n\npub mod compile_time {{\n",
        profile_name
    );

    let mut current_section = "";
    for (section, key, ty) in SCHEMA {
        if *section != current_section {
            if !current_section.is_empty() {
                code.push_str("    }\n\n");
            }
            let _ = writeln!(code, "    pub mod {} {{", section);
            current_section = section;
        }
        let _ = writeln!(
            code,
            "        pub const {}: {} = {};",
            key.to_uppercase(),
            ty,
            profile.get(section, key)
        );
    }
    code.push_str("    }\n}\n");
    code
}
