use crate::catalog::collation::Collation;
use crate::diff::comment_utils;
use crate::diff::operations::{CollationOperation, CollationTarget, MigrationStep};

pub fn diff(old: Option<&Collation>, new: Option<&Collation>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::Collation(CollationOperation::Create {
                collation: n.clone(),
            })];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::Collation(CollationOperation::Comment(
                    crate::diff::operations::CommentOperation::Set {
                        target: CollationTarget {
                            schema: n.schema.clone(),
                            name: n.name.clone(),
                        },
                        comment: comment.clone(),
                    },
                )));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::Collation(CollationOperation::Drop {
            schema: o.schema.clone(),
            name: o.name.clone(),
        })],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();
            // provider/locale/determinism are not alterable -- drop and recreate
            if o.provider != n.provider || o.locale != n.locale || o.deterministic != n.deterministic {
                steps.push(MigrationStep::Collation(CollationOperation::Drop {
                    schema: o.schema.clone(),
                    name: o.name.clone(),
                }));
                steps.push(MigrationStep::Collation(CollationOperation::Create {
                    collation: n.clone(),
                }));
                return steps;
            }

            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || CollationTarget {
                    schema: n.schema.clone(),
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::Collation(CollationOperation::Comment(op)));
            }
            steps
        }
        (None, None) => vec![],
    }
}
