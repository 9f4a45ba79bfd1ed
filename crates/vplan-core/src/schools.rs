//! Packaged school directory backing the login form's autocomplete.
//!
//! The list ships with the app, grouped by district. It is parsed once
//! behind an explicit one-shot guard; lookups afterwards are plain slice
//! scans.

use std::sync::OnceLock;

use serde::Deserialize;

const EMBEDDED_DIRECTORY: &str = include_str!("../assets/schools.json");

/// Suggestions are capped like a dropdown would be.
const MAX_RESULTS: usize = 7;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct School {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Ort")]
    pub town: String,
}

#[derive(Debug, Deserialize)]
struct District {
    #[serde(rename = "Schulen", default)]
    schools: Vec<School>,
}

/// Flattened, searchable school list.
#[derive(Debug, Default)]
pub struct SchoolDirectory {
    schools: Vec<School>,
}

impl SchoolDirectory {
    /// The packaged directory, parsed on first use.
    pub fn shared() -> &'static SchoolDirectory {
        static DIRECTORY: OnceLock<SchoolDirectory> = OnceLock::new();
        DIRECTORY.get_or_init(|| {
            SchoolDirectory::from_json(EMBEDDED_DIRECTORY).unwrap_or_else(|err| {
                tracing::error!(%err, "packaged school directory is unreadable");
                SchoolDirectory::default()
            })
        })
    }

    /// Parse a district-grouped directory into a flat list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let districts: Vec<District> = serde_json::from_str(json)?;
        let schools = districts.into_iter().flat_map(|d| d.schools).collect();
        Ok(Self { schools })
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }

    /// Case-insensitive substring search over id, name and town. At most
    /// seven suggestions, formatted for the school-id input field.
    pub fn search(&self, query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        self.schools
            .iter()
            .filter(|school| {
                school.id.to_lowercase().contains(&query)
                    || school.name.to_lowercase().contains(&query)
                    || school.town.to_lowercase().contains(&query)
            })
            .take(MAX_RESULTS)
            .map(|school| format!("{} - {} - {}", school.id, school.name, school.town))
            .collect()
    }
}
