//! The activity catalog: every activity, its capacity and its roster.
//!
//! [`Catalog`] is a cheap handle over one shared map. Clones see the same
//! activities. Every mutation runs its check-then-write under the write lock,
//! so a roster never holds the same email twice and never grows past
//! `max_participants`, however many sign-ups race.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Error;

/// One extracurricular activity.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(description: &str, schedule: &str, max_participants: usize) -> Self {
        Self {
            description: description.to_owned(),
            schedule: schedule.to_owned(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Builder-style roster for seeding.
    pub fn with_participants<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Full once the roster reaches capacity. A roster above capacity (after
    /// the capacity was lowered) is full too.
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }

    pub fn spots_left(&self) -> usize {
        self.max_participants.saturating_sub(self.participants.len())
    }
}

/// Why a catalog operation was refused. Each variant carries the activity name.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CatalogError {
    #[error("Activity not found")]
    ActivityNotFound(String),

    #[error("Student is already signed up for this activity")]
    AlreadySignedUp(String),

    #[error("Student is not signed up for this activity")]
    NotSignedUp(String),

    #[error("Activity is full")]
    ActivityFull(String),
}

/// Shared, lock-guarded map of activity name → [`Activity`], ordered by name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    activities: Arc<RwLock<BTreeMap<String, Activity>>>,
}

impl Catalog {
    /// Builds a catalog after checking each activity's roster: no duplicate
    /// emails, no more participants than `max_participants`.
    pub fn new<I>(activities: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, Activity)>,
    {
        let mut map = BTreeMap::new();
        for (name, activity) in activities {
            validate(&name, &activity)?;
            if map.insert(name.clone(), activity).is_some() {
                return Err(Error::InvalidSeed {
                    activity: name,
                    reason: "listed more than once".to_owned(),
                });
            }
        }
        Ok(Self { activities: Arc::new(RwLock::new(map)) })
    }

    /// Snapshot of every activity, including current rosters.
    pub async fn list(&self) -> BTreeMap<String, Activity> {
        self.activities.read().await.clone()
    }

    pub async fn get(&self, name: &str) -> Option<Activity> {
        self.activities.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.activities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.activities.read().await.is_empty()
    }

    /// Adds `email` to the roster of `name`.
    ///
    /// Checked in order: the activity exists, the email is not already on the
    /// roster, the activity is not full.
    pub async fn signup(&self, name: &str, email: &str) -> Result<(), CatalogError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or_else(|| CatalogError::ActivityNotFound(name.to_owned()))?;

        if activity.is_registered(email) {
            debug!(activity = name, email, "duplicate signup refused");
            return Err(CatalogError::AlreadySignedUp(name.to_owned()));
        }
        if activity.is_full() {
            debug!(activity = name, email, capacity = activity.max_participants, "activity full");
            return Err(CatalogError::ActivityFull(name.to_owned()));
        }

        activity.participants.push(email.to_owned());
        info!(
            activity = name,
            email,
            spots_left = activity.spots_left(),
            "participant signed up"
        );
        Ok(())
    }

    /// Removes `email` from the roster of `name`, keeping the others in order.
    pub async fn unregister(&self, name: &str, email: &str) -> Result<(), CatalogError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or_else(|| CatalogError::ActivityNotFound(name.to_owned()))?;

        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            debug!(activity = name, email, "unregister of non-participant refused");
            return Err(CatalogError::NotSignedUp(name.to_owned()));
        };

        activity.participants.remove(pos);
        info!(activity = name, email, "participant unregistered");
        Ok(())
    }

    /// Changes the capacity of `name`. Participants already on the roster
    /// stay even if they now exceed it.
    pub async fn set_capacity(&self, name: &str, max_participants: usize) -> Result<(), CatalogError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or_else(|| CatalogError::ActivityNotFound(name.to_owned()))?;

        info!(
            activity = name,
            from = activity.max_participants,
            to = max_participants,
            "capacity changed"
        );
        activity.max_participants = max_participants;
        Ok(())
    }
}

fn validate(name: &str, activity: &Activity) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidSeed { activity: name.to_owned(), reason };

    if activity.participants.len() > activity.max_participants {
        return Err(invalid(format!(
            "{} participants exceed max_participants {}",
            activity.participants.len(),
            activity.max_participants
        )));
    }
    for (i, email) in activity.participants.iter().enumerate() {
        if activity.participants[..i].contains(email) {
            return Err(invalid(format!("participant {email} listed twice")));
        }
    }
    Ok(())
}
