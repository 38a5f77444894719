use crate::catalog::materialized_view::MaterializedView;
use crate::diff::comment_utils;
use crate::diff::operations::{
    CommentOperation, MaterializedViewOperation, MaterializedViewTarget, MigrationStep,
};

pub fn diff(old: Option<&MaterializedView>, new: Option<&MaterializedView>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::MaterializedView(
                MaterializedViewOperation::Create {
                    schema: n.schema.clone(),
                    name: n.name.clone(),
                    definition: n.definition.clone(),
                },
            )];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::MaterializedView(
                    MaterializedViewOperation::Comment(CommentOperation::Set {
                        target: MaterializedViewTarget {
                            schema: n.schema.clone(),
                            name: n.name.clone(),
                        },
                        comment: comment.clone(),
                    }),
                ));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::MaterializedView(
            MaterializedViewOperation::Drop {
                schema: o.schema.clone(),
                name: o.name.clone(),
            },
        )],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();
            if o.definition != n.definition {
                steps.push(MigrationStep::MaterializedView(
                    MaterializedViewOperation::Replace {
                        schema: n.schema.clone(),
                        name: n.name.clone(),
                        definition: n.definition.clone(),
                    },
                ));
            }

            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || MaterializedViewTarget {
                    schema: n.schema.clone(),
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::MaterializedView(
                    MaterializedViewOperation::Comment(op),
                ));
            }
            steps
        }
        (None, None) => vec![],
    }
}
