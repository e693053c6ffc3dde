use std::path::Path;

use crate::config::ConfigError;
use crate::models::{Activity, ActivityCatalog};

/// The activities offered when no seed file is configured.
pub fn default_activities() -> ActivityCatalog {
    let mut catalog = ActivityCatalog::new();
    catalog.insert(
        "Chess Club".to_string(),
        Activity::new(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
    );
    catalog.insert(
        "Programming Class".to_string(),
        Activity::new(
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
    );
    catalog.insert(
        "Gym Class".to_string(),
        Activity::new(
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        ),
    );
    catalog.insert(
        "Basketball Team".to_string(),
        Activity::new(
            "Practice and compete in inter-school basketball games",
            "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
            15,
            &["james@mergington.edu"],
        ),
    );
    catalog.insert(
        "Swimming Club".to_string(),
        Activity::new(
            "Improve swimming technique and train for competitions",
            "Mondays and Wednesdays, 5:00 PM - 6:30 PM",
            20,
            &["ava@mergington.edu", "liam@mergington.edu"],
        ),
    );
    catalog.insert(
        "Art Workshop".to_string(),
        Activity::new(
            "Explore painting, drawing and sculpture with guest artists",
            "Thursdays, 3:30 PM - 5:00 PM",
            18,
            &["mia@mergington.edu"],
        ),
    );
    catalog.insert(
        "Drama Club".to_string(),
        Activity::new(
            "Act, direct and produce the school's seasonal plays",
            "Wednesdays, 3:30 PM - 5:30 PM",
            25,
            &["noah@mergington.edu", "isabella@mergington.edu"],
        ),
    );
    catalog.insert(
        "Science Club".to_string(),
        Activity::new(
            "Hands-on experiments and preparation for the science fair",
            "Tuesdays, 3:30 PM - 5:00 PM",
            16,
            &["ethan@mergington.edu", "amelia@mergington.edu"],
        ),
    );
    catalog.insert(
        "Debate Team".to_string(),
        Activity::new(
            "Sharpen public speaking and argumentation in regional debates",
            "Fridays, 4:00 PM - 5:30 PM",
            12,
            &["lucas@mergington.edu"],
        ),
    );
    catalog
}

/// Loads a seed catalog from a JSON file shaped like the `GET /activities`
/// response.
pub fn load_seed_file(path: &Path) -> Result<ActivityCatalog, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&raw).map_err(|reason| ConfigError::SeedInvalid {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_seed(raw: &str) -> Result<ActivityCatalog, String> {
    let catalog: ActivityCatalog = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    if catalog.is_empty() {
        return Err("seed contains no activities".to_string());
    }
    for (name, activity) in catalog.iter() {
        for (i, email) in activity.participants.iter().enumerate() {
            if activity.participants[..i].contains(email) {
                return Err(format!("{} lists {} more than once", name, email));
            }
        }
    }
    Ok(catalog)
}
