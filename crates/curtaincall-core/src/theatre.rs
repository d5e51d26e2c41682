//! Theatre configuration file: location, search radii, recommendation
//! categories per show phase, and operator allow/deny lists.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::show::Phase;
use crate::ConfigError;

/// Promoted-tier radius used when the config does not set one.
pub const DEFAULT_WHITELIST_RADIUS_METERS: u32 = 1500;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when both components are finite and inside their degree ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A recommendation bucket such as "Dinner" searched with keyword "restaurant".
/// Identity is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keyword: String,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyword: keyword.into(),
        }
    }
}

/// Operator-maintained allow/deny substrings.
///
/// Terms are always stored trimmed and lowercased with blanks removed, so
/// matching only has to lowercase the candidate name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ListTerms")]
pub struct ListConfig {
    whitelist: Vec<String>,
    blacklist: Vec<String>,
}

impl ListConfig {
    #[must_use]
    pub fn new<W, B>(whitelist: W, blacklist: B) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Self {
            whitelist: normalize_terms(whitelist),
            blacklist: normalize_terms(blacklist),
        }
    }

    #[must_use]
    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    #[must_use]
    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }
}

#[derive(Deserialize)]
struct ListTerms {
    #[serde(default, deserialize_with = "null_as_default")]
    whitelist: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    blacklist: Vec<String>,
}

impl From<ListTerms> for ListConfig {
    fn from(terms: ListTerms) -> Self {
        ListConfig::new(terms.whitelist, terms.blacklist)
    }
}

fn normalize_terms<I>(terms: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// YAML `key:` with no value deserializes as null; treat that like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Distance bounds for the two candidate tiers.
///
/// Ordinary candidates must fall within `base_radius_meters`, promoted ones
/// within `whitelist_radius_meters`. The promoted radius is normally the
/// larger of the two but nothing enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadiusConfig {
    pub base_radius_meters: u32,
    pub whitelist_radius_meters: u32,
}

impl RadiusConfig {
    #[must_use]
    pub fn new(base_radius_meters: u32, whitelist_radius_meters: Option<u32>) -> Self {
        Self {
            base_radius_meters,
            whitelist_radius_meters: whitelist_radius_meters
                .unwrap_or(DEFAULT_WHITELIST_RADIUS_METERS),
        }
    }

    /// Radius sent to the provider: wide enough to cover both tiers.
    #[must_use]
    pub fn search_radius_meters(&self) -> u32 {
        self.base_radius_meters.max(self.whitelist_radius_meters)
    }

    /// Maximum allowed distance for a candidate of the given tier.
    #[must_use]
    pub fn bound_for(&self, promoted: bool) -> f64 {
        if promoted {
            f64::from(self.whitelist_radius_meters)
        } else {
            f64::from(self.base_radius_meters)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Theatre {
    #[serde(default)]
    pub name: Option<String>,
    pub location: Coordinate,
    pub radius_meters: u32,
    #[serde(default = "default_whitelist_radius")]
    pub whitelist_radius_meters: u32,
}

fn default_whitelist_radius() -> u32 {
    DEFAULT_WHITELIST_RADIUS_METERS
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessCategories {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pre_show: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_show: Vec<Category>,
}

/// Top-level theatre configuration file.
///
/// Unknown top-level keys (branding, mail settings, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TheatreConfig {
    pub theatre: Theatre,
    #[serde(default)]
    pub business_categories: BusinessCategories,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lists: ListConfig,
}

impl TheatreConfig {
    #[must_use]
    pub fn radius(&self) -> RadiusConfig {
        RadiusConfig::new(
            self.theatre.radius_meters,
            Some(self.theatre.whitelist_radius_meters),
        )
    }

    #[must_use]
    pub fn categories(&self, phase: Phase) -> &[Category] {
        match phase {
            Phase::PreShow => &self.business_categories.pre_show,
            Phase::PostShow => &self.business_categories.post_show,
        }
    }
}

/// Load and validate a theatre configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_theatre_config(path: &Path) -> Result<TheatreConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_theatre_config(&content)
}

/// Parse and validate a theatre configuration from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::TheatreParse`] for malformed YAML and
/// [`ConfigError::Validation`] for semantically invalid values.
pub fn parse_theatre_config(content: &str) -> Result<TheatreConfig, ConfigError> {
    let config: TheatreConfig = serde_yaml::from_str(content)?;
    validate_theatre_config(&config)?;
    Ok(config)
}

fn validate_theatre_config(config: &TheatreConfig) -> Result<(), ConfigError> {
    let theatre = &config.theatre;

    if !theatre.location.is_valid() {
        return Err(ConfigError::Validation(format!(
            "theatre location ({}, {}) is out of range",
            theatre.location.latitude, theatre.location.longitude
        )));
    }

    if theatre.radius_meters == 0 {
        return Err(ConfigError::Validation(
            "radius_meters must be greater than 0".to_string(),
        ));
    }

    if theatre.whitelist_radius_meters == 0 {
        return Err(ConfigError::Validation(
            "whitelist_radius_meters must be greater than 0".to_string(),
        ));
    }

    for phase in Phase::ALL {
        let mut seen_names = HashSet::new();
        for category in config.categories(phase) {
            if category.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{phase} category name must be non-empty"
                )));
            }
            if category.keyword.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{phase} category '{}' has an empty keyword",
                    category.name
                )));
            }
            if !seen_names.insert(category.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate {phase} category name: '{}'",
                    category.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "theatre_test.rs"]
mod tests;
