//! Startup data for the catalog.
//!
//! The built-in table is the Mergington High School activity list. A JSON
//! file shaped like the `GET /activities` response can replace it.

use std::fmt;
use std::path::Path;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::catalog::{Activity, Catalog};
use crate::error::Error;

/// The built-in Mergington High School activities.
pub fn mergington() -> Vec<(String, Activity)> {
    let table = [
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
        ),
        (
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
        ),
        (
            "Basketball Team",
            Activity::new(
                "Practice and compete in inter-school basketball games",
                "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
                15,
            )
            .with_participants(["liam@mergington.edu"]),
        ),
        (
            "Soccer Club",
            Activity::new(
                "Train for and play in the school soccer league",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                22,
            )
            .with_participants(["noah@mergington.edu", "ava@mergington.edu"]),
        ),
        (
            "Art Club",
            Activity::new(
                "Explore painting, drawing and sculpture",
                "Wednesdays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(["mia@mergington.edu"]),
        ),
        (
            "Drama Club",
            Activity::new(
                "Act, direct and produce school plays and performances",
                "Thursdays, 3:30 PM - 5:30 PM",
                20,
            )
            .with_participants(["ella@mergington.edu", "lucas@mergington.edu"]),
        ),
        (
            "Math Club",
            Activity::new(
                "Solve challenging problems and prepare for math competitions",
                "Tuesdays, 3:30 PM - 4:30 PM",
                10,
            )
            .with_participants(["james@mergington.edu"]),
        ),
        (
            "Debate Team",
            Activity::new(
                "Develop public speaking and argumentation skills",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
            )
            .with_participants(["charlotte@mergington.edu", "henry@mergington.edu"]),
        ),
    ];

    table.into_iter().map(|(name, activity)| (name.to_owned(), activity)).collect()
}

/// Loads a catalog from `path`, or the built-in table when `path` is `None`.
pub async fn load(path: Option<&Path>) -> Result<Catalog, Error> {
    let Some(path) = path else {
        return Catalog::new(mergington());
    };

    let raw = tokio::fs::read(path).await.map_err(|source| Error::SeedRead {
        path: path.to_owned(),
        source,
    })?;
    let SeedFile(activities) = serde_json::from_slice(&raw)
        .map_err(|source| Error::SeedParse { path: path.to_owned(), source })?;

    Catalog::new(activities)
}

/// A seed file's entries in file order. A name written twice stays twice so
/// [`Catalog::new`] can reject it; a map type would silently keep the last.
struct SeedFile(Vec<(String, Activity)>);

impl<'de> Deserialize<'de> for SeedFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SeedFile;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of activity name to activity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SeedFile, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Activity>()? {
                    entries.push(entry);
                }
                Ok(SeedFile(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
