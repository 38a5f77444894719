//! Publication operations

use super::{CommentOperation, CommentTarget, OperationKind};
use crate::catalog::id::DbObjectId;
use crate::catalog::publication::Publication;
use crate::render::quote_ident;

#[derive(Debug, Clone)]
pub enum PublicationOperation {
    Create {
        publication: Publication,
    },
    Drop {
        name: String,
    },
    Alter {
        name: String,
        add_tables: Vec<(String, String)>,
        drop_tables: Vec<(String, String)>,
        set_options: Option<PublicationOptions>,
    },
    Comment(CommentOperation<PublicationTarget>),
}

impl PublicationOperation {
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
pub struct PublicationOptions {
    pub insert: bool,
    pub update: bool,
    pub delete: bool,
    pub truncate: bool,
    pub via_root: bool,
}

#[derive(Debug, Clone)]
pub struct PublicationTarget {
    pub name: String,
}

impl CommentTarget for PublicationTarget {
    const OBJECT_TYPE: &'static str = "PUBLICATION";

    fn identifier(&self) -> String {
        quote_ident(&self.name)
    }

    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Publication {
            name: self.name.clone(),
        }
    }
}
