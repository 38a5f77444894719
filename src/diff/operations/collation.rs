//! Collation operations

use super::{CommentOperation, CommentTarget, OperationKind};
use crate::catalog::id::DbObjectId;
use crate::catalog::collation::Collation;
use crate::render::quote_ident;

#[derive(Debug, Clone)]
pub enum CollationOperation {
    Create { collation: Collation },
    Drop { schema: String, name: String },
    Comment(CommentOperation<CollationTarget>),
}

impl CollationOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollationTarget {
    pub schema: String,
    pub name: String,
}

impl CommentTarget for CollationTarget {
    const OBJECT_TYPE: &'static str = "COLLATION";

    fn identifier(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.name))
    }

    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Collation {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}
