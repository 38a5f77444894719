use crate::catalog::foreign::{ForeignDataWrapper, ForeignServer, ForeignTable, UserMapping};
use crate::diff::comment_utils;
use crate::diff::operations::{
    CommentOperation, ForeignDataWrapperOperation, ForeignDataWrapperTarget,
    ForeignServerOperation, ForeignServerTarget, ForeignTableOperation, ForeignTableTarget,
    MigrationStep, UserMappingOperation,
};

pub fn diff_wrapper(
    old: Option<&ForeignDataWrapper>,
    new: Option<&ForeignDataWrapper>,
) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::ForeignDataWrapper(
                ForeignDataWrapperOperation::Create {
                    wrapper: n.clone(),
                },
            )];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::ForeignDataWrapper(
                    ForeignDataWrapperOperation::Comment(CommentOperation::Set {
                        target: ForeignDataWrapperTarget { name: n.name.clone() },
                        comment: comment.clone(),
                    }),
                ));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::ForeignDataWrapper(
            ForeignDataWrapperOperation::Drop { name: o.name.clone() },
        )],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();
            if o.options != n.options {
                steps.push(MigrationStep::ForeignDataWrapper(
                    ForeignDataWrapperOperation::AlterOptions {
                        name: n.name.clone(),
                        options: n.options.clone(),
                    },
                ));
            }
            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || ForeignDataWrapperTarget {
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::ForeignDataWrapper(
                    ForeignDataWrapperOperation::Comment(op),
                ));
            }
            steps
        }
        (None, None) => vec![],
    }
}

pub fn diff_server(old: Option<&ForeignServer>, new: Option<&ForeignServer>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::ForeignServer(ForeignServerOperation::Create {
                server: n.clone(),
            })];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::ForeignServer(ForeignServerOperation::Comment(
                    CommentOperation::Set {
                        target: ForeignServerTarget { name: n.name.clone() },
                        comment: comment.clone(),
                    },
                )));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::ForeignServer(ForeignServerOperation::Drop {
            name: o.name.clone(),
        })],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();
            if o.options != n.options {
                steps.push(MigrationStep::ForeignServer(
                    ForeignServerOperation::AlterOptions {
                        name: n.name.clone(),
                        options: n.options.clone(),
                    },
                ));
            }
            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || ForeignServerTarget {
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::ForeignServer(ForeignServerOperation::Comment(op)));
            }
            steps
        }
        (None, None) => vec![],
    }
}

pub fn diff_user_mapping(old: Option<&UserMapping>, new: Option<&UserMapping>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => vec![MigrationStep::UserMapping(UserMappingOperation::Create {
            mapping: n.clone(),
        })],
        (Some(o), None) => vec![MigrationStep::UserMapping(UserMappingOperation::Drop {
            server: o.server.clone(),
            user: o.user.clone(),
        })],
        (Some(o), Some(n)) if o.options != n.options => {
            vec![MigrationStep::UserMapping(UserMappingOperation::AlterOptions {
                server: n.server.clone(),
                user: n.user.clone(),
                options: n.options.clone(),
            })]
        }
        _ => vec![],
    }
}

pub fn diff_foreign_table(
    old: Option<&ForeignTable>,
    new: Option<&ForeignTable>,
) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::ForeignTable(ForeignTableOperation::Create {
                table: n.clone(),
            })];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::ForeignTable(ForeignTableOperation::Comment(
                    CommentOperation::Set {
                        target: ForeignTableTarget {
                            schema: n.schema.clone(),
                            name: n.name.clone(),
                        },
                        comment: comment.clone(),
                    },
                )));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::ForeignTable(ForeignTableOperation::Drop {
            schema: o.schema.clone(),
            name: o.name.clone(),
        })],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();
            if o.options != n.options {
                steps.push(MigrationStep::ForeignTable(
                    ForeignTableOperation::AlterOptions {
                        schema: n.schema.clone(),
                        name: n.name.clone(),
                        options: n.options.clone(),
                    },
                ));
            }
            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || ForeignTableTarget {
                    schema: n.schema.clone(),
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::ForeignTable(ForeignTableOperation::Comment(op)));
            }
            steps
        }
        (None, None) => vec![],
    }
}
