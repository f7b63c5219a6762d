use std::collections::HashSet;

use crate::model::project::Project;
use crate::model::user::{EntityId, UserSummary};

/// Users who could be added to `project`: everyone except the owner and
/// current members, in input order.
pub fn non_members<'a>(project: &Project, users: &'a [UserSummary]) -> Vec<&'a UserSummary> {
    let taken: HashSet<EntityId> = project
        .owner
        .iter()
        .chain(project.members.iter())
        .map(|u| u.id)
        .collect();
    users.iter().filter(|u| !taken.contains(&u.id)).collect()
}
