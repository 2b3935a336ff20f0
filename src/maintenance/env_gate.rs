//! Startup check for required environment variables.
//!
//! The required names are whatever the template file declares, so adding a
//! variable to the template is enough to make it mandatory.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error_handling::EnvGateError;

/// Names declared in an env template.
///
/// Accepts `NAME=value` and `export NAME=value` lines; blank lines, comments
/// and lines without `=` are ignored.
pub fn required_variables(template: &str) -> BTreeSet<String> {
    template
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (name, _) = line.split_once('=')?;
            let name = name.trim();
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_');
            valid.then(|| name.to_string())
        })
        .collect()
}

/// Names from `required` that `lookup` has no non-empty value for.
pub fn missing_variables<F>(required: &BTreeSet<String>, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    required
        .iter()
        .filter(|name| lookup(name).map_or(true, |value| value.trim().is_empty()))
        .cloned()
        .collect()
}

/// Checks the process environment against the template at `template_path`.
///
/// # Errors
///
/// Returns `EnvGateError::TemplateRead` if the template cannot be read and
/// `EnvGateError::Missing` with the sorted missing names otherwise.
pub fn check_environment(template_path: &Path) -> Result<(), EnvGateError> {
    let template =
        std::fs::read_to_string(template_path).map_err(|source| EnvGateError::TemplateRead {
            path: template_path.to_path_buf(),
            source,
        })?;

    let required = required_variables(&template);
    log::debug!(
        "{} required environment variable(s) declared in {}",
        required.len(),
        template_path.display()
    );

    let missing = missing_variables(&required, |name| std::env::var(name).ok());
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EnvGateError::Missing(missing))
    }
}
