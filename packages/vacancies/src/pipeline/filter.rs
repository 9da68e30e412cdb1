//! Employer filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::listing::Listing;

/// Employer excluded when no other set is configured.
pub const DEFAULT_EXCLUDED_EMPLOYER: &str = "aston";

/// Case-insensitive set of employer names to drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExcludedEmployers {
    names: BTreeSet<String>,
}

impl Default for ExcludedEmployers {
    fn default() -> Self {
        Self::new([DEFAULT_EXCLUDED_EMPLOYER])
    }
}

impl ExcludedEmployers {
    /// Build a set from names; matching ignores case.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// An empty set that excludes nothing.
    pub fn none() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn contains(&self, employer: &str) -> bool {
        self.names.contains(&employer.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for ExcludedEmployers {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<ExcludedEmployers> for Vec<String> {
    fn from(excluded: ExcludedEmployers) -> Self {
        excluded.names.into_iter().collect()
    }
}

/// Keep listings whose employer is not excluded, preserving order.
///
/// A listing without an employer has the empty name, which is only
/// excluded if `""` was put in the set explicitly.
pub fn filter_listings(listings: Vec<Listing>, excluded: &ExcludedEmployers) -> Vec<Listing> {
    if excluded.is_empty() {
        return listings;
    }

    listings
        .into_iter()
        .filter(|l| !excluded.contains(l.employer_name()))
        .collect()
}
