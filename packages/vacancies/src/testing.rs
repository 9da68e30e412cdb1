//! Fixtures for tests of code built on this library.
//!
//! Mock sources live in [`crate::sources`]; this module builds batches and
//! API payloads without any network.

use serde_json::{json, Value};

use crate::pipeline::skills::skill_table;
use crate::types::batch::{Batch, EnrichedListing};
use crate::types::config::SearchQuery;
use crate::types::listing::Listing;

/// A listing with an id, employer and canonical URL.
pub fn listing(id: &str, employer: &str) -> Listing {
    Listing::new(id, format!("Vacancy {id}"))
        .with_employer(employer)
        .with_url(format!("https://hh.ru/vacancy/{id}"))
}

/// A batch of `(id, skills)` entries with its frequency table filled in.
pub fn batch_of(entries: Vec<(&str, Vec<&str>)>) -> Batch {
    let listings: Vec<EnrichedListing> = entries
        .into_iter()
        .map(|(id, skills)| {
            EnrichedListing::new(
                listing(id, "Acme"),
                skills.into_iter().map(String::from).collect(),
            )
        })
        .collect();

    Batch {
        query: SearchQuery::new("QA", "noExperience", "remote"),
        skills: skill_table(&listings),
        listings,
        skipped: Vec::new(),
    }
}

/// JSON body of a search page in the remote API's shape.
pub fn search_page_json(listings: &[Listing], pages: u32) -> Value {
    json!({
        "items": listings,
        "found": listings.len(),
        "pages": pages,
    })
}

/// JSON body of a detail record in the remote API's shape.
pub fn detail_json(id: &str, skills: &[&str]) -> Value {
    json!({
        "id": id,
        "key_skills": skills.iter().map(|s| json!({ "name": s })).collect::<Vec<_>>(),
    })
}
