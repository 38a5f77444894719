//! Foreign-data object operations: wrapper, server, user mapping, foreign table.

use super::{CommentOperation, CommentTarget, OperationKind};
use crate::catalog::foreign::{ForeignDataWrapper, ForeignServer, ForeignTable, UserMapping};
use crate::catalog::id::DbObjectId;
use crate::render::quote_ident;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum ForeignDataWrapperOperation {
    Create { wrapper: ForeignDataWrapper },
    Drop { name: String },
    AlterOptions { name: String, options: HashMap<String, String> },
    Comment(CommentOperation<ForeignDataWrapperTarget>),
}

#[derive(Debug, Clone)]
pub struct ForeignDataWrapperTarget {
    pub name: String,
}

impl CommentTarget for ForeignDataWrapperTarget {
    const OBJECT_TYPE: &'static str = "FOREIGN DATA WRAPPER";
    fn identifier(&self) -> String {
        quote_ident(&self.name)
    }
    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::ForeignDataWrapper {
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ForeignServerOperation {
    Create { server: ForeignServer },
    Drop { name: String },
    AlterOptions { name: String, options: HashMap<String, String> },
    Comment(CommentOperation<ForeignServerTarget>),
}

#[derive(Debug, Clone)]
pub struct ForeignServerTarget {
    pub name: String,
}

impl CommentTarget for ForeignServerTarget {
    const OBJECT_TYPE: &'static str = "SERVER";
    fn identifier(&self) -> String {
        quote_ident(&self.name)
    }
    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::ForeignServer {
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum UserMappingOperation {
    Create { mapping: UserMapping },
    Drop { server: String, user: String },
    AlterOptions {
        server: String,
        user: String,
        options: HashMap<String, String>,
    },
}

#[derive(Debug, Clone)]
pub enum ForeignTableOperation {
    Create { table: ForeignTable },
    Drop { schema: String, name: String },
    AlterOptions {
        schema: String,
        name: String,
        options: HashMap<String, String>,
    },
    Comment(CommentOperation<ForeignTableTarget>),
}

#[derive(Debug, Clone)]
pub struct ForeignTableTarget {
    pub schema: String,
    pub name: String,
}

impl CommentTarget for ForeignTableTarget {
    const OBJECT_TYPE: &'static str = "FOREIGN TABLE";
    fn identifier(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.name))
    }
    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::ForeignTable {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

impl ForeignDataWrapperOperation {
    pub fn operation_kind(&self) -> super::OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::AlterOptions { .. } => OperationKind::Alter,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}

impl ForeignServerOperation {
    pub fn operation_kind(&self) -> super::OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::AlterOptions { .. } => OperationKind::Alter,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}

impl UserMappingOperation {
    pub fn operation_kind(&self) -> super::OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::AlterOptions { .. } => OperationKind::Alter,
        }
    }
}

impl ForeignTableOperation {
    pub fn operation_kind(&self) -> super::OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::AlterOptions { .. } => OperationKind::Alter,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}
