//! Declarative application settings and their projection into the build
//! descriptor.
//!
//! The settings document is a YAML file whose only field consumed here is
//! `general_settings.name`. [`apply`] rewrites the name token of the
//! `project(<name> <LANG>)` declaration in `CMakeLists.txt`, preserving the
//! language tag, any trailing comment, and every other line. The rewrite is
//! idempotent: applying it twice with the same settings produces byte-identical
//! output.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::SettingsError;
use crate::logging::Logger;

/// Top-level shape of the settings document.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub general_settings: GeneralSettings,
}

/// The `general_settings` block.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralSettings {
    /// Application name projected into the build descriptor.
    pub name: String,
}

impl Settings {
    /// Load and validate the settings document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read, is not valid
    /// YAML of the required shape, or carries an empty name.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_yaml::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if settings.general_settings.name.trim().is_empty() {
            return Err(SettingsError::EmptyName {
                path: path.to_path_buf(),
            });
        }
        Ok(settings)
    }

    /// The configured application name.
    #[must_use]
    pub fn application_name(&self) -> &str {
        &self.general_settings.name
    }
}

/// Convenience accessor: load the settings and return the application name
/// without touching the descriptor.
///
/// # Errors
///
/// Propagates any [`SettingsError`] from [`Settings::load`].
pub fn get_application_name(settings_path: &Path) -> Result<String, SettingsError> {
    Ok(Settings::load(settings_path)?.application_name().to_string())
}

/// Matches `project(<name> <LANG>)` where `<LANG>` is a single uppercase
/// language tag, optionally followed by a trailing comment. Only the name
/// capture is rewritten.
#[allow(clippy::expect_used)]
fn project_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)(^\s*project\s*\()\s*([^\s)]+)(\s+[A-Z]\s*\).*)")
            .expect("project declaration pattern is valid")
    })
}

/// Rewrite the project name inside descriptor `content`, returning the new
/// content and whether a declaration was matched.
#[must_use]
pub fn rewrite_project_name(content: &str, app_name: &str) -> (String, bool) {
    let mut matched = false;
    let rewritten = project_decl().replace_all(content, |caps: &regex::Captures<'_>| {
        matched = true;
        format!("{}{app_name}{}", &caps[1], &caps[3])
    });
    (rewritten.into_owned(), matched)
}

/// Project `general_settings.name` into the build descriptor at
/// `descriptor_path`.
///
/// When the descriptor contains no matching declaration a warning is printed
/// and the file is left untouched; this is deliberately not a hard failure
/// since an uncustomized descriptor still configures and builds.
///
/// # Errors
///
/// Returns [`SettingsError`] on any settings or descriptor I/O or parse
/// failure.
pub fn apply(
    settings_path: &Path,
    descriptor_path: &Path,
    log: &Logger,
) -> Result<(), SettingsError> {
    let settings = Settings::load(settings_path)?;
    let app_name = settings.application_name();

    let content =
        std::fs::read_to_string(descriptor_path).map_err(|source| SettingsError::Io {
            path: descriptor_path.to_path_buf(),
            source,
        })?;

    let (rewritten, matched) = rewrite_project_name(&content, app_name);
    if !matched {
        log.warn(&format!(
            "no project() declaration found in {}; descriptor left unchanged",
            descriptor_path.display()
        ));
        return Ok(());
    }

    if rewritten != content {
        std::fs::write(descriptor_path, rewritten).map_err(|source| SettingsError::Io {
            path: descriptor_path.to_path_buf(),
            source,
        })?;
        log.debug(&format!("project name set to '{app_name}'"));
    } else {
        log.debug("descriptor already up to date");
    }
    Ok(())
}
