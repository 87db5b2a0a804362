//! Configuration loading and validation.
//!
//! All command-line input is validated once into an immutable [`Settings`]
//! value, which is then passed to the walker. Validation runs in a fixed
//! order (auth file, labels file, reposlugs) and stops at the first problem.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use ini::{Ini, ParseOption};
use secrecy::SecretString;

use crate::error::{Error, Result};
use crate::filter::PullRequestFilter;
use crate::model::StateFilter;
use crate::reposlug::Reposlug;
use crate::rules::RuleSet;

/// Raw, unvalidated inputs as collected by the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsArgs {
    pub state: StateFilter,
    pub delete_old: bool,
    pub base: Option<String>,
    pub config_auth: Option<PathBuf>,
    pub config_labels: Option<PathBuf>,
    pub reposlugs: Vec<String>,
}

/// Validated settings for one labeling run.
#[derive(Debug)]
pub struct Settings {
    /// GitHub token.
    pub token: SecretString,

    /// Label rules, in configuration order.
    pub rules: RuleSet,

    /// Repositories to process, in command-line order.
    pub reposlugs: Vec<Reposlug>,

    /// Which pull requests to label.
    pub filter: PullRequestFilter,

    /// Strip rule-governed labels instead of adding matches.
    pub delete_old: bool,
}

impl Settings {
    /// Validate raw arguments into settings.
    ///
    /// # Errors
    /// Returns the first configuration or validation error encountered.
    pub fn from_args(args: SettingsArgs) -> Result<Self> {
        let auth_path = args.config_auth.ok_or(Error::AuthNotSupplied)?;
        let token = load_token(&auth_path)?;

        let labels_path = args.config_labels.ok_or(Error::LabelsNotSupplied)?;
        let rules = load_rules(&labels_path)?;

        let reposlugs = args
            .reposlugs
            .into_iter()
            .map(Reposlug::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            token,
            rules,
            reposlugs,
            filter: PullRequestFilter::new(args.state, args.base),
            delete_old: args.delete_old,
        })
    }
}

/// Parse an INI document the way the configuration files are written:
/// indented lines continue the previous value, quotes and backslashes are
/// literal, and each section may appear only once.
fn parse_ini(text: &str) -> std::result::Result<Ini, String> {
    let opt = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(text, opt).map_err(|e| e.to_string())?;

    let mut seen = HashSet::new();
    for name in ini.sections().flatten() {
        if !seen.insert(name) {
            return Err(format!("section '{name}' appears more than once"));
        }
    }

    Ok(ini)
}

/// Entries of a section with keys folded to lowercase, in file order.
///
/// Returns `Ok(None)` if the section is absent.
fn section_entries<'a>(
    ini: &'a Ini,
    name: &str,
) -> std::result::Result<Option<IndexMap<String, &'a str>>, String> {
    let Some(properties) = ini.section(Some(name)) else {
        return Ok(None);
    };

    let mut entries = IndexMap::new();
    for (key, value) in properties.iter() {
        let key = key.trim().to_lowercase();
        if entries.insert(key.clone(), value).is_some() {
            return Err(format!(
                "option '{key}' in section '{name}' appears more than once"
            ));
        }
    }

    Ok(Some(entries))
}

/// Read the GitHub token from the `[github]` section of an auth file.
///
/// # Errors
/// Returns [`Error::AuthNotUsable`] if the file cannot be read or parsed,
/// or if it has no non-empty `token`.
pub fn load_token(path: &Path) -> Result<SecretString> {
    let unusable = |reason: String| Error::AuthNotUsable { reason };

    let text = fs::read_to_string(path)
        .map_err(|e| unusable(format!("{}: {e}", path.display())))?;
    let ini = parse_ini(&text).map_err(unusable)?;

    let entries = section_entries(&ini, "github")
        .map_err(unusable)?
        .ok_or_else(|| unusable("missing [github] section".to_string()))?;
    let token = entries
        .get("token")
        .map(|t| t.trim())
        .ok_or_else(|| unusable("missing 'token' in [github] section".to_string()))?;
    if token.is_empty() {
        return Err(unusable("empty token".to_string()));
    }

    Ok(SecretString::from(token.to_string()))
}

/// Read the label rules from the `[labels]` section of a labels file.
///
/// Label names are folded to lowercase.
///
/// # Errors
/// Returns [`Error::LabelsNotUsable`] if the file cannot be read or parsed,
/// lacks the section or repeats a section or label.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let unusable = |reason: String| Error::LabelsNotUsable { reason };

    let text = fs::read_to_string(path)
        .map_err(|e| unusable(format!("{}: {e}", path.display())))?;
    let ini = parse_ini(&text).map_err(unusable)?;

    let entries = section_entries(&ini, "labels")
        .map_err(unusable)?
        .ok_or_else(|| unusable("missing [labels] section".to_string()))?;

    RuleSet::from_label_patterns(entries.iter().map(|(k, v)| (k.as_str(), *v)))
        .map_err(|e| unusable(e.to_string()))
}
