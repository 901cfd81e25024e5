//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{CURRENT_SCHEMA_VERSION, GameplayDefaults};

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a single RON struct from disk.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_single(&contents, &file_name)
}

fn parse_single<T>(contents: &str, file_name: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Parses gameplay defaults and rejects schema versions from newer builds.
pub fn parse_gameplay_defaults(
    contents: &str,
    file_name: &str,
) -> Result<GameplayDefaults, ContentLoadError> {
    let defaults: GameplayDefaults = parse_single(contents, file_name)?;
    check_schema(defaults, file_name)
}

pub fn load_gameplay_defaults(path: &Path) -> Result<GameplayDefaults, ContentLoadError> {
    let defaults: GameplayDefaults = load_single_file(path)?;
    check_schema(defaults, &path.display().to_string())
}

fn check_schema(
    defaults: GameplayDefaults,
    file_name: &str,
) -> Result<GameplayDefaults, ContentLoadError> {
    if defaults.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file_name.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected at most {})",
                defaults.schema_version, CURRENT_SCHEMA_VERSION
            ),
        });
    }
    Ok(defaults)
}
