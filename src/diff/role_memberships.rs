use crate::catalog::role_membership::RoleMembership;
use crate::diff::operations::{MigrationStep, RoleMembershipOperation};

pub fn diff(old: Option<&RoleMembership>, new: Option<&RoleMembership>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => vec![MigrationStep::RoleMembership(RoleMembershipOperation::Grant {
            role: n.role.clone(),
            member: n.member.clone(),
            admin_option: n.admin_option,
        })],
        (Some(o), None) => vec![MigrationStep::RoleMembership(RoleMembershipOperation::Revoke {
            role: o.role.clone(),
            member: o.member.clone(),
        })],
        (Some(o), Some(n)) if o.admin_option != n.admin_option => {
            vec![MigrationStep::RoleMembership(
                RoleMembershipOperation::SetAdminOption {
                    role: n.role.clone(),
                    member: n.member.clone(),
                    admin_option: n.admin_option,
                },
            )]
        }
        _ => vec![],
    }
}
