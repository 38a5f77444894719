//! SQL rendering for function operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::FunctionOperation;
use crate::render::{RenderedSql, Safety, SqlRenderer, quote_ident};

impl SqlRenderer for FunctionOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            FunctionOperation::Create { definition, .. } => {
                // definition contains the complete CREATE OR REPLACE FUNCTION statement from pg_get_functiondef()
                vec![RenderedSql {
                    sql: if definition.trim_end().ends_with(';') {
                        definition.clone()
                    } else {
                        format!("{};", definition.trim_end())
                    },
                    safety: Safety::Safe,
                }]
            }
            FunctionOperation::Replace { definition, .. } => {
                // definition contains the complete CREATE OR REPLACE FUNCTION statement from pg_get_functiondef()
                vec![RenderedSql {
                    sql: if definition.trim_end().ends_with(';') {
                        definition.clone()
                    } else {
                        format!("{};", definition.trim_end())
                    },
                    safety: Safety::Safe,
                }]
            }
            FunctionOperation::Drop {
                schema,
                name,
                arguments: _,
                kind,
                parameter_types,
            } => vec![RenderedSql {
                sql: format!(
                    "DROP {} {}.{}({});",
                    kind,
                    quote_ident(schema),
                    quote_ident(name),
                    parameter_types
                ),
                safety: Safety::Destructive,
            }],
            FunctionOperation::Comment(op) => op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            FunctionOperation::Create {
                schema,
                name,
                arguments,
                ..
            }
            | FunctionOperation::Replace {
                schema,
                name,
                arguments,
                ..
            }
            | FunctionOperation::Drop {
                schema,
                name,
                arguments,
                ..
            } => DbObjectId::Function {
                schema: schema.clone(),
                name: name.clone(),
                arguments: arguments.clone(),
            },
            FunctionOperation::Comment(op) => op.db_object_id(),
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, FunctionOperation::Drop { .. })
    }
}
