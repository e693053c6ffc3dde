use serde::Serialize;
use tracing::{info, warn};

use crate::database::{ActivityStore, RegistryError};
use crate::models::ActivityCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub message: String,
}

pub fn list_activities(store: &ActivityStore) -> ActivityCatalog {
    store.snapshot()
}

pub fn signup_for_activity(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<MessageView, RegistryError> {
    match store.add_participant(activity_name, email) {
        Ok(roster_size) => {
            info!(activity = %activity_name, email = %email, roster_size, "signup accepted");
            Ok(MessageView {
                message: format!("Signed up {} for {}", email, activity_name),
            })
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %email, error = %e, "signup rejected");
            Err(e)
        }
    }
}

pub fn unregister_from_activity(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<MessageView, RegistryError> {
    match store.remove_participant(activity_name, email) {
        Ok(roster_size) => {
            info!(activity = %activity_name, email = %email, roster_size, "unregister accepted");
            Ok(MessageView {
                message: format!("Unregistered {} from {}", email, activity_name),
            })
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %email, error = %e, "unregister rejected");
            Err(e)
        }
    }
}
