//! Vacancy records as returned by the remote search and detail endpoints.

use serde::{Deserialize, Serialize};

/// Placeholder used when a vacancy carries no responsibility snippet.
pub const DESCRIPTION_PLACEHOLDER: &str = "Description not specified";

/// A `{ "name": ... }` reference object (employer, area, experience, schedule).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Free-text fragments attached to a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub responsibility: Option<String>,

    #[serde(default)]
    pub requirement: Option<String>,
}

/// A single vacancy from one search page.
///
/// Nested objects are optional because the API omits or nulls them freely;
/// the accessor methods flatten them to plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Opaque identifier, used to build the detail URL
    pub id: String,

    /// Vacancy title
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub snippet: Option<Snippet>,

    /// Canonical human-facing URL
    #[serde(default)]
    pub alternate_url: String,

    #[serde(default)]
    pub employer: Option<NamedRef>,

    #[serde(default)]
    pub area: Option<NamedRef>,

    #[serde(default)]
    pub experience: Option<NamedRef>,

    #[serde(default)]
    pub schedule: Option<NamedRef>,
}

fn ref_name(r: &Option<NamedRef>) -> &str {
    r.as_ref().and_then(|r| r.name.as_deref()).unwrap_or("")
}

impl Listing {
    /// Create a listing with an id and title; everything else empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            snippet: None,
            alternate_url: String::new(),
            employer: None,
            area: None,
            experience: None,
            schedule: None,
        }
    }

    /// Set the employer name.
    pub fn with_employer(mut self, employer: impl Into<String>) -> Self {
        self.employer = Some(NamedRef::new(employer));
        self
    }

    /// Set the area name.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(NamedRef::new(area));
        self
    }

    /// Set the canonical URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.alternate_url = url.into();
        self
    }

    /// Set the responsibility snippet.
    pub fn with_responsibility(mut self, text: impl Into<String>) -> Self {
        let snippet = self.snippet.get_or_insert_with(Snippet::default);
        snippet.responsibility = Some(text.into());
        self
    }

    /// Set experience and schedule labels.
    pub fn with_labels(mut self, experience: impl Into<String>, schedule: impl Into<String>) -> Self {
        self.experience = Some(NamedRef::new(experience));
        self.schedule = Some(NamedRef::new(schedule));
        self
    }

    /// Employer name, empty when absent.
    pub fn employer_name(&self) -> &str {
        ref_name(&self.employer)
    }

    /// Area name, empty when absent.
    pub fn area_name(&self) -> &str {
        ref_name(&self.area)
    }

    /// Experience-level label, empty when absent.
    pub fn experience_label(&self) -> &str {
        ref_name(&self.experience)
    }

    /// Schedule label, empty when absent.
    pub fn schedule_label(&self) -> &str {
        ref_name(&self.schedule)
    }

    /// Responsibility snippet if present and non-empty.
    pub fn responsibility(&self) -> Option<&str> {
        self.snippet
            .as_ref()
            .and_then(|s| s.responsibility.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Responsibility snippet or [`DESCRIPTION_PLACEHOLDER`].
    pub fn description(&self) -> &str {
        self.responsibility().unwrap_or(DESCRIPTION_PLACEHOLDER)
    }
}

/// Flat-file projection of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub name: String,
    pub snippet: String,
    pub url: String,
}

impl From<&Listing> for ListingSummary {
    fn from(listing: &Listing) -> Self {
        Self {
            name: listing.name.clone(),
            snippet: listing.description().to_string(),
            url: listing.alternate_url.clone(),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<Listing>,

    /// Total number of pages the search spans
    #[serde(default)]
    pub pages: u32,

    /// Total number of matching vacancies
    #[serde(default)]
    pub found: u64,
}

/// A declared skill in a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySkill {
    pub name: String,
}

/// Detail record for one vacancy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingDetail {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub key_skills: Vec<KeySkill>,
}

impl ListingDetail {
    /// Build a detail record from skill names.
    pub fn with_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            key_skills: skills
                .into_iter()
                .map(|name| KeySkill { name: name.into() })
                .collect(),
        }
    }

    /// Declared skill names in source order.
    pub fn skill_names(&self) -> Vec<String> {
        self.key_skills.iter().map(|s| s.name.clone()).collect()
    }
}
