use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::group::{Group, GroupPatch};
use crate::store::ExpenseStore;

/// Provides validated CRUD helpers for groups, including the protected
/// membership rule: the current user can never be edited out of a group.
pub struct GroupService;

impl GroupService {
    pub fn add(store: &mut ExpenseStore, group: Group) -> ServiceResult<Uuid> {
        Self::validate_name(store, None, &group.name)?;
        if !group.has_member(store.current_user().id) {
            return Err(ServiceError::Invalid(
                "Group must include the current user".into(),
            ));
        }
        Ok(store.add_group(group))
    }

    pub fn update(store: &mut ExpenseStore, id: Uuid, patch: GroupPatch) -> ServiceResult<()> {
        if let Some(name) = &patch.name {
            Self::validate_name(store, Some(id), name)?;
        }
        if let Some(members) = &patch.members {
            let me = store.current_user().id;
            if !members.iter().any(|member| member.id == me) {
                return Err(ServiceError::Invalid(
                    "You cannot be removed from a group".into(),
                ));
            }
        }
        store.update_group(id, patch)?;
        Ok(())
    }

    /// Removes the group; every expense linked to it goes with it.
    pub fn remove(store: &mut ExpenseStore, id: Uuid) -> ServiceResult<Group> {
        Ok(store.delete_group(id)?)
    }

    pub fn list(store: &ExpenseStore) -> Vec<&Group> {
        store.groups().iter().collect()
    }

    fn validate_name(
        store: &ExpenseStore,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid("Group name cannot be empty".into()));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = store.groups().iter().any(|group| {
            let name = group.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| group.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Group `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
