use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Lost,
    Found,
    Adopt,
    #[serde(other)]
    Other,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Lost => "lost",
            PetStatus::Found => "found",
            PetStatus::Adopt => "adopt",
            PetStatus::Other => "other",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    Read,
    Unread,
}

impl ReadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadStatus::Read => "read",
            ReadStatus::Unread => "unread",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub pet_status: PetStatus,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(id: i64, message: impl Into<String>, pet_status: PetStatus) -> Self {
        Self {
            id,
            message: message.into(),
            is_read: false,
            pet_status,
            created_at: Utc::now(),
        }
    }

    pub fn mark_as_read(&mut self) {
        self.is_read = true;
    }
}

/// Query filters understood by the notifications listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationFilter {
    pub pet_status: Option<PetStatus>,
    pub read_status: Option<ReadStatus>,
}

impl NotificationFilter {
    pub fn unread() -> Self {
        Self {
            pet_status: None,
            read_status: Some(ReadStatus::Unread),
        }
    }

    pub fn with_pet_status(mut self, pet_status: PetStatus) -> Self {
        self.pet_status = Some(pet_status);
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if let Some(pet_status) = &self.pet_status {
            pairs.push(("pet_status", pet_status.as_str()));
        }
        if let Some(read_status) = &self.read_status {
            pairs.push(("read_status", read_status.as_str()));
        }
        pairs
    }
}

/// Local view of the unread feed.
///
/// `items` keeps the order the server returned. Local removals never reorder
/// the list; the next poll replaces it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationFeedState {
    pub items: Vec<Notification>,
    pub unread_count: usize,
}

impl NotificationFeedState {
    pub fn from_server(items: Vec<Notification>) -> Self {
        let unread_count = items.iter().filter(|n| !n.is_read).count();
        Self {
            items,
            unread_count,
        }
    }

    /// Applies a confirmed mark-read. Returns whether the count changed.
    pub fn apply_mark_read(&mut self, id: i64) -> bool {
        let position = self.items.iter().position(|n| n.id == id);
        match position {
            Some(index) if !self.items[index].is_read => {
                self.items.remove(index);
                self.unread_count = self.unread_count.saturating_sub(1);
                true
            }
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => false,
        }
    }

    /// Applies a confirmed delete. Returns the removed item, if it was present.
    pub fn apply_delete(&mut self, id: i64) -> Option<Notification> {
        let index = self.items.iter().position(|n| n.id == id)?;
        let removed = self.items.remove(index);
        if !removed.is_read {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        Some(removed)
    }
}
