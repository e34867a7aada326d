use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::user::User;

/// A named collection of users who share some expenses.
///
/// `total_expenses` is a running accumulator over the linked expenses,
/// maintained by the store on every add/update/delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<User>,
    pub total_expenses: f64,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<User>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            members,
            total_expenses: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn member(&self, user_id: Uuid) -> Option<&User> {
        self.members.iter().find(|member| member.id == user_id)
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.member(user_id).is_some()
    }
}

impl Identifiable for Group {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Group {
    fn display_label(&self) -> String {
        format!("{} ({} members)", self.name, self.members.len())
    }
}

/// Field-level merge applied by `update_group`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<User>>,
}

impl GroupPatch {
    pub fn apply_to(&self, group: &mut Group) {
        if let Some(name) = &self.name {
            group.name = name.clone();
        }
        if let Some(description) = &self.description {
            group.description = description.clone();
        }
        if let Some(members) = &self.members {
            group.members = members.clone();
        }
    }
}
