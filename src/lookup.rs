//! Parameter and profile lookup
//!
//! Resolves a search term within a profile by tag, then parameter name,
//! then register number. The first match wins.

use crate::models::{Catalog, Parameter, Profile};
use crate::record::parse_leading_int;

impl Profile {
    /// Find a parameter by tag, name or register number
    ///
    /// # Examples
    /// ```
    /// # use modbus_profiles::profile::parse_profile;
    /// # use std::path::Path;
    /// let csv = "param_name,register,tag\nt_suction,40007,To\n";
    /// let profile = parse_profile(csv, Path::new("ak-pc-781.csv")).unwrap();
    ///
    /// let by_tag = profile.find_parameter("To").unwrap();
    /// let by_register = profile.find_parameter("40007").unwrap();
    /// assert_eq!(by_tag, by_register);
    /// ```
    pub fn find_parameter(&self, term: &str) -> Option<&Parameter> {
        self.by_tag(term)
            .or_else(|| self.by_param_name(term))
            .or_else(|| {
                parse_leading_int(term)
                    .and_then(|n| u32::try_from(n).ok())
                    .and_then(|register| self.by_register(register))
            })
    }
}

/// Find a parameter in an optional profile
///
/// A missing profile resolves to `None` rather than an error, so the result
/// of `Catalog::get_profile` can be passed straight through.
pub fn find_parameter<'a>(profile: Option<&'a Profile>, term: &str) -> Option<&'a Parameter> {
    profile?.find_parameter(term)
}

impl Catalog {
    /// Get the profile loaded for a controller
    pub fn get_profile(&self, controller: &str) -> Option<&Profile> {
        self.profiles.get(controller)
    }

    /// Controller identifiers in sorted order
    pub fn controllers(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    /// Resolve a parameter of a controller in one step
    pub fn find_parameter(&self, controller: &str, term: &str) -> Option<&Parameter> {
        find_parameter(self.get_profile(controller), term)
    }
}
