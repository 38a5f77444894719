//! Subscription operations

use super::{CommentOperation, CommentTarget, OperationKind};
use crate::catalog::id::DbObjectId;
use crate::catalog::subscription::Subscription;
use crate::render::quote_ident;

#[derive(Debug, Clone)]
pub enum SubscriptionOperation {
    Create {
        subscription: Subscription,
    },
    Drop {
        name: String,
    },
    Alter {
        name: String,
        enabled: Option<bool>,
        publications: Option<Vec<String>>,
        conninfo: Option<String>,
    },
    Comment(CommentOperation<SubscriptionTarget>),
}

impl SubscriptionOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::Alter { .. } => OperationKind::Alter,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriptionTarget {
    pub name: String,
}

impl CommentTarget for SubscriptionTarget {
    const OBJECT_TYPE: &'static str = "SUBSCRIPTION";

    fn identifier(&self) -> String {
        quote_ident(&self.name)
    }

    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Subscription {
            name: self.name.clone(),
        }
    }
}
