//! Profiles and properties of a handling context
//!
//! The environment is an owned value: the builder creates it, applies the
//! requested profiles, and hands it to the context it instantiates.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Error, Result};

/// Profile that is in effect when no profile has been activated.
pub const DEFAULT_PROFILE: &str = "default";

/// Active profiles plus string properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    active_profiles: BTreeSet<String>,
    default_profiles: BTreeSet<String>,
    properties: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            active_profiles: BTreeSet::new(),
            default_profiles: BTreeSet::from([DEFAULT_PROFILE.to_string()]),
            properties: BTreeMap::new(),
        }
    }

    /// Add profiles to the active set.
    ///
    /// All names are validated before any is added.
    pub fn activate_profiles<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        for name in &names {
            validate_profile(name)?;
        }
        for name in names {
            tracing::debug!(profile = %name, "Activating profile");
            self.active_profiles.insert(name);
        }
        Ok(())
    }

    /// Replace the profiles that apply when none are active.
    pub fn set_default_profiles<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        for name in &names {
            validate_profile(name)?;
        }
        self.default_profiles = names;
        Ok(())
    }

    pub fn active_profiles(&self) -> &BTreeSet<String> {
        &self.active_profiles
    }

    pub fn default_profiles(&self) -> &BTreeSet<String> {
        &self.default_profiles
    }

    /// Whether a single profile is in effect.
    ///
    /// Default profiles only count while no profile is active.
    pub fn is_profile_active(&self, name: &str) -> bool {
        if self.active_profiles.is_empty() {
            self.default_profiles.contains(name)
        } else {
            self.active_profiles.contains(name)
        }
    }

    /// Evaluate a profile condition.
    ///
    /// An empty condition always matches. Otherwise at least one entry must
    /// hold, where `name` holds when the profile is in effect and `!name`
    /// holds when it is not.
    pub fn accepts_profiles<S: AsRef<str>>(&self, condition: &[S]) -> bool {
        if condition.is_empty() {
            return true;
        }
        condition.iter().any(|entry| {
            let entry = entry.as_ref();
            match entry.strip_prefix('!') {
                Some(negated) => !self.is_profile_active(negated),
                None => self.is_profile_active(entry),
            }
        })
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject names that cannot be activated.
pub fn validate_profile(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::configuration("profile names must not be empty"));
    }
    if name.starts_with('!') {
        return Err(Error::configuration(format!(
            "profile name '{name}' must not start with '!'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_profile_applies_until_something_is_activated() {
        let mut env = Environment::new();
        assert!(env.is_profile_active("default"));
        assert!(env.accepts_profiles(&["default"]));

        env.activate_profiles(["dev"]).unwrap();
        assert!(!env.is_profile_active("default"));
        assert!(env.is_profile_active("dev"));
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&["dev"], true)]
    #[case(&["prod"], false)]
    #[case(&["!prod"], true)]
    #[case(&["!dev"], false)]
    #[case(&["prod", "dev"], true)]
    #[case(&["prod", "!dev"], false)]
    fn conditions_against_dev(#[case] condition: &[&str], #[case] expected: bool) {
        let mut env = Environment::new();
        env.activate_profiles(["dev"]).unwrap();

        assert_eq!(env.accepts_profiles(condition), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("!dev")]
    fn invalid_profile_names_are_rejected(#[case] name: &str) {
        let mut env = Environment::new();

        let err = env.activate_profiles(["ok", name]).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        // Validation happens before anything is applied.
        assert!(env.active_profiles().is_empty());
    }

    #[test]
    fn properties_round_trip() {
        let mut env = Environment::new();
        env.set_property("app.name", "music");

        assert_eq!(env.property("app.name"), Some("music"));
        assert_eq!(env.property("missing"), None);
    }
}
