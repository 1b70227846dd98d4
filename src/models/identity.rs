use serde::{Deserialize, Serialize};

/// The authenticated caller on whose behalf an operation runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Directory user id
    pub user_id: String,

    /// Display name, when the directory knows one
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Whether this identity owns something owned by `owner_id`
    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}
