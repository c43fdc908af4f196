//! Bundled reference data for the search form.
//!
//! Both lists are compiled into the binary and parsed once at startup; they
//! are read-only for the life of the process and keep their file order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
}

const LOCATIONS_JSON: &str = include_str!("../data/locations.json");
const JOB_SKILLS_JSON: &str = include_str!("../data/jobSkills.json");

/// Parses the bundled location list.
pub fn locations() -> Vec<Location> {
    serde_json::from_str(LOCATIONS_JSON).expect("failed to parse bundled locations.json")
}

/// Parses the bundled skill list.
pub fn job_skills() -> Vec<String> {
    serde_json::from_str(JOB_SKILLS_JSON).expect("failed to parse bundled jobSkills.json")
}
