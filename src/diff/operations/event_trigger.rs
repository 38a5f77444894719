//! Event trigger operations

use super::{CommentOperation, CommentTarget, OperationKind};
use crate::catalog::event_trigger::EventTrigger;
use crate::catalog::id::DbObjectId;
use crate::render::quote_ident;

#[derive(Debug, Clone)]
pub enum EventTriggerOperation {
    Create {
        trigger: EventTrigger,
    },
    Drop {
        name: String,
    },
    SetEnabled {
        name: String,
        enabled: String,
    },
    Comment(CommentOperation<EventTriggerTarget>),
}

impl EventTriggerOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::SetEnabled { .. } => OperationKind::Alter,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventTriggerTarget {
    pub name: String,
}

impl CommentTarget for EventTriggerTarget {
    const OBJECT_TYPE: &'static str = "EVENT TRIGGER";

    fn identifier(&self) -> String {
        quote_ident(&self.name)
    }

    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::EventTrigger {
            name: self.name.clone(),
        }
    }
}
