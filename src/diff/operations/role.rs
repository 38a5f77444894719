//! Role operations

use super::{CommentOperation, CommentTarget, OperationKind};
use crate::catalog::id::DbObjectId;
use crate::catalog::role::Role;
use crate::render::quote_ident;

#[derive(Debug, Clone)]
pub enum RoleOperation {
    Create {
        role: Role,
    },
    Drop {
        name: String,
    },
    Alter {
        name: String,
        attributes: Vec<RoleAttribute>,
    },
    Comment(CommentOperation<RoleTarget>),
}

impl RoleOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::Alter { .. } => OperationKind::Alter,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAttribute {
    Superuser(bool),
    Inherit(bool),
    CreateRole(bool),
    CreateDb(bool),
    CanLogin(bool),
    Replication(bool),
    BypassRls(bool),
    ConnectionLimit(i32),
}

#[derive(Debug, Clone)]
pub struct RoleTarget {
    pub name: String,
}

impl CommentTarget for RoleTarget {
    const OBJECT_TYPE: &'static str = "ROLE";

    fn identifier(&self) -> String {
        quote_ident(&self.name)
    }

    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Role {
            name: self.name.clone(),
        }
    }
}
