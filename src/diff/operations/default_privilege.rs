//! Default privilege operations -- `ALTER DEFAULT PRIVILEGES`.
//! Deliberately mirrors the three-way shape of regular grants (see
//! `GrantOperation`): a default ACL entry is never collapsed to a single
//! `grantable: bool`, because revoking the grant option is a distinct
//! statement from revoking the privilege itself.

use super::OperationKind;
use crate::catalog::id::DbObjectId;

#[derive(Debug, Clone)]
pub enum DefaultPrivilegeOperation {
    Grant {
        grantor: String,
        schema: Option<String>,
        object_type: String,
        grantee: String,
        privileges: Vec<String>,
        with_grant_option: bool,
    },
    Revoke {
        grantor: String,
        schema: Option<String>,
        object_type: String,
        grantee: String,
        privileges: Vec<String>,
    },
    RevokeGrantOptionOnly {
        grantor: String,
        schema: Option<String>,
        object_type: String,
        grantee: String,
        privileges: Vec<String>,
    },
}

impl DefaultPrivilegeOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Grant { .. } => OperationKind::Create,
            Self::Revoke { .. } => OperationKind::Drop,
            Self::RevokeGrantOptionOnly { .. } => OperationKind::Alter,
        }
    }

    pub fn db_object_id(&self) -> DbObjectId {
        let (grantor, schema, object_type, grantee) = match self {
            Self::Grant {
                grantor,
                schema,
                object_type,
                grantee,
                ..
            }
            | Self::Revoke {
                grantor,
                schema,
                object_type,
                grantee,
                ..
            }
            | Self::RevokeGrantOptionOnly {
                grantor,
                schema,
                object_type,
                grantee,
                ..
            } => (grantor, schema, object_type, grantee),
        };

        DbObjectId::DefaultPrivilege {
            grantor: grantor.clone(),
            grantee: grantee.clone(),
            schema: schema.clone(),
            object_type: object_type.clone(),
        }
    }
}
