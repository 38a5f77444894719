//! SQL rendering for role membership operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::RoleMembershipOperation;
use crate::render::{RenderedSql, SqlRenderer, quote_ident};

impl SqlRenderer for RoleMembershipOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            RoleMembershipOperation::Grant {
                role,
                member,
                admin_option,
            } => {
                let mut sql = format!("GRANT {} TO {}", quote_ident(role), quote_ident(member));
                if *admin_option {
                    sql.push_str(" WITH ADMIN OPTION");
                }
                sql.push(';');
                vec![RenderedSql::new(sql)]
            }
            RoleMembershipOperation::Revoke { role, member } => vec![RenderedSql::destructive(format!(
                "REVOKE {} FROM {};",
                quote_ident(role),
                quote_ident(member)
            ))],
            RoleMembershipOperation::SetAdminOption {
                role,
                member,
                admin_option,
            } => {
                if *admin_option {
                    vec![RenderedSql::new(format!(
                        "GRANT {} TO {} WITH ADMIN OPTION;",
                        quote_ident(role),
                        quote_ident(member)
                    ))]
                } else {
                    vec![RenderedSql::new(format!(
                        "REVOKE ADMIN OPTION FOR {} FROM {};",
                        quote_ident(role),
                        quote_ident(member)
                    ))]
                }
            }
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        self.db_object_id()
    }

    fn is_destructive(&self) -> bool {
        matches!(self, RoleMembershipOperation::Revoke { .. })
    }
}
