//! Role membership operations

use super::OperationKind;
use crate::catalog::id::DbObjectId;

#[derive(Debug, Clone)]
pub enum RoleMembershipOperation {
    Grant {
        role: String,
        member: String,
        admin_option: bool,
    },
    Revoke {
        role: String,
        member: String,
    },
    SetAdminOption {
        role: String,
        member: String,
        admin_option: bool,
    },
}

impl RoleMembershipOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Grant { .. } => OperationKind::Create,
            Self::Revoke { .. } => OperationKind::Drop,
            Self::SetAdminOption { .. } => OperationKind::Alter,
        }
    }

    pub fn db_object_id(&self) -> DbObjectId {
        match self {
            Self::Grant { role, member, .. }
            | Self::Revoke { role, member }
            | Self::SetAdminOption { role, member, .. } => DbObjectId::RoleMembership {
                role: role.clone(),
                member: member.clone(),
            },
        }
    }
}
