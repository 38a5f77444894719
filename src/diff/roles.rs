use crate::catalog::role::Role;
use crate::diff::comment_utils;
use crate::diff::operations::{MigrationStep, RoleAttribute, RoleOperation, RoleTarget};

pub fn diff(old: Option<&Role>, new: Option<&Role>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::Role(RoleOperation::Create { role: n.clone() })];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::Role(RoleOperation::Comment(
                    crate::diff::operations::CommentOperation::Set {
                        target: RoleTarget {
                            name: n.name.clone(),
                        },
                        comment: comment.clone(),
                    },
                )));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::Role(RoleOperation::Drop {
            name: o.name.clone(),
        })],
        (Some(o), Some(n)) => {
            let mut attributes = Vec::new();
            if o.superuser != n.superuser {
                attributes.push(RoleAttribute::Superuser(n.superuser));
            }
            if o.inherit != n.inherit {
                attributes.push(RoleAttribute::Inherit(n.inherit));
            }
            if o.create_role != n.create_role {
                attributes.push(RoleAttribute::CreateRole(n.create_role));
            }
            if o.create_db != n.create_db {
                attributes.push(RoleAttribute::CreateDb(n.create_db));
            }
            if o.can_login != n.can_login {
                attributes.push(RoleAttribute::CanLogin(n.can_login));
            }
            if o.replication != n.replication {
                attributes.push(RoleAttribute::Replication(n.replication));
            }
            if o.bypass_rls != n.bypass_rls {
                attributes.push(RoleAttribute::BypassRls(n.bypass_rls));
            }
            if o.connection_limit != n.connection_limit {
                attributes.push(RoleAttribute::ConnectionLimit(n.connection_limit));
            }

            let mut steps = Vec::new();
            if !attributes.is_empty() {
                steps.push(MigrationStep::Role(RoleOperation::Alter {
                    name: n.name.clone(),
                    attributes,
                }));
            }

            let comment_ops = comment_utils::handle_comment_diff(Some(o), Some(n), || RoleTarget {
                name: n.name.clone(),
            });
            for op in comment_ops {
                steps.push(MigrationStep::Role(RoleOperation::Comment(op)));
            }

            steps
        }
        (None, None) => vec![],
    }
}
