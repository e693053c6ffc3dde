use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::ActivityCatalog;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadySignedUp,
    #[error("Student is not registered for this activity")]
    NotRegistered,
}

/// In-memory activity registry shared by all request handlers.
///
/// Cloning is cheap and every clone sees the same rosters. Each test builds
/// its own store, so nothing leaks between them.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    inner: Arc<RwLock<ActivityCatalog>>,
}

impl ActivityStore {
    pub fn new(catalog: ActivityCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> ActivityCatalog {
        self.read().clone()
    }

    /// Appends `email` to the roster and returns the new roster size.
    pub fn add_participant(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<usize, RegistryError> {
        let mut catalog = self.write();
        let activity = catalog
            .get_mut(activity_name)
            .ok_or(RegistryError::ActivityNotFound)?;
        if activity.has_participant(email) {
            return Err(RegistryError::AlreadySignedUp);
        }
        activity.participants.push(email.to_string());
        Ok(activity.participants.len())
    }

    pub fn remove_participant(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<usize, RegistryError> {
        let mut catalog = self.write();
        let activity = catalog
            .get_mut(activity_name)
            .ok_or(RegistryError::ActivityNotFound)?;
        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Err(RegistryError::NotRegistered);
        };
        activity.participants.remove(pos);
        Ok(activity.participants.len())
    }

    // A panicking writer cannot leave a roster half-updated, so a poisoned
    // lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, ActivityCatalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ActivityCatalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed::default_activities;

    fn store() -> ActivityStore {
        ActivityStore::new(default_activities())
    }

    fn count(store: &ActivityStore, name: &str) -> usize {
        store.snapshot().get(name).unwrap().participants.len()
    }

    #[test]
    fn add_then_remove_restores_count() {
        let store = store();
        assert_eq!(count(&store, "Chess Club"), 2);

        assert_eq!(
            store.add_participant("Chess Club", "test@mergington.edu"),
            Ok(3)
        );
        assert_eq!(count(&store, "Chess Club"), 3);

        assert_eq!(
            store.remove_participant("Chess Club", "test@mergington.edu"),
            Ok(2)
        );
        assert_eq!(count(&store, "Chess Club"), 2);
    }

    #[test]
    fn duplicate_signup_is_rejected() {
        let store = store();
        store
            .add_participant("Programming Class", "dup@mergington.edu")
            .unwrap();
        assert_eq!(
            store.add_participant("Programming Class", "dup@mergington.edu"),
            Err(RegistryError::AlreadySignedUp)
        );
        assert_eq!(count(&store, "Programming Class"), 3);
    }

    #[test]
    fn seeded_participant_cannot_sign_up_again() {
        let store = store();
        assert_eq!(
            store.add_participant("Chess Club", "michael@mergington.edu"),
            Err(RegistryError::AlreadySignedUp)
        );
    }

    #[test]
    fn removing_absent_email_is_rejected() {
        let store = store();
        assert_eq!(
            store.remove_participant("Chess Club", "nobody@mergington.edu"),
            Err(RegistryError::NotRegistered)
        );
    }

    #[test]
    fn unknown_activity_is_not_found_for_every_operation() {
        let store = store();
        assert_eq!(
            store.add_participant("Knitting", "a@mergington.edu"),
            Err(RegistryError::ActivityNotFound)
        );
        assert_eq!(
            store.remove_participant("Knitting", "a@mergington.edu"),
            Err(RegistryError::ActivityNotFound)
        );
    }

    #[test]
    fn activity_names_are_case_sensitive() {
        let store = store();
        assert_eq!(
            store.add_participant("chess club", "a@mergington.edu"),
            Err(RegistryError::ActivityNotFound)
        );
    }

    #[test]
    fn removal_keeps_order_of_remaining_participants() {
        let store = store();
        store
            .add_participant("Chess Club", "third@mergington.edu")
            .unwrap();
        store
            .remove_participant("Chess Club", "michael@mergington.edu")
            .unwrap();
        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.get("Chess Club").unwrap().participants,
            vec!["daniel@mergington.edu", "third@mergington.edu"]
        );
    }

    #[test]
    fn clones_share_state_but_separate_stores_do_not() {
        let a = store();
        let a2 = a.clone();
        let b = store();
        a.add_participant("Gym Class", "shared@mergington.edu")
            .unwrap();
        assert_eq!(count(&a2, "Gym Class"), 3);
        assert_eq!(count(&b, "Gym Class"), 2);
    }
}
