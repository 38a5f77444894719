use crate::catalog::publication::Publication;
use crate::diff::comment_utils;
use crate::diff::operations::{
    CommentOperation, MigrationStep, PublicationOperation, PublicationOptions, PublicationTarget,
};
use std::collections::BTreeSet;

pub fn diff(old: Option<&Publication>, new: Option<&Publication>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::Publication(PublicationOperation::Create {
                publication: n.clone(),
            })];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::Publication(PublicationOperation::Comment(
                    CommentOperation::Set {
                        target: PublicationTarget { name: n.name.clone() },
                        comment: comment.clone(),
                    },
                )));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::Publication(PublicationOperation::Drop {
            name: o.name.clone(),
        })],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();

            let old_tables: BTreeSet<_> = o.tables.iter().cloned().collect();
            let new_tables: BTreeSet<_> = n.tables.iter().cloned().collect();
            let add_tables: Vec<_> = new_tables.difference(&old_tables).cloned().collect();
            let drop_tables: Vec<_> = old_tables.difference(&new_tables).cloned().collect();

            let options_changed = o.insert != n.insert
                || o.update != n.update
                || o.delete != n.delete
                || o.truncate != n.truncate
                || o.via_root != n.via_root;

            let set_options = options_changed.then_some(PublicationOptions {
                insert: n.insert,
                update: n.update,
                delete: n.delete,
                truncate: n.truncate,
                via_root: n.via_root,
            });

            if !add_tables.is_empty() || !drop_tables.is_empty() || set_options.is_some() {
                steps.push(MigrationStep::Publication(PublicationOperation::Alter {
                    name: n.name.clone(),
                    add_tables,
                    drop_tables,
                    set_options,
                }));
            }

            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || PublicationTarget {
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::Publication(PublicationOperation::Comment(op)));
            }

            steps
        }
        (None, None) => vec![],
    }
}
