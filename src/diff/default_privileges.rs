use crate::catalog::default_privilege::DefaultPrivilege;
use crate::diff::operations::{DefaultPrivilegeOperation, MigrationStep};
use std::collections::BTreeSet;

/// Three-way diff of a single (grantor, schema, object type, grantee) default
/// privilege entry: grant newly-added privileges (with or without grant
/// option), revoke privileges no longer present, and separately revoke the
/// grant option alone when a privilege survives but loses grantability.
/// Mirrors `diff::grants::diff` -- never collapse this into a single
/// before/after `grantable: bool` comparison.
pub fn diff(old: Option<&DefaultPrivilege>, new: Option<&DefaultPrivilege>) -> Vec<MigrationStep> {
    let empty = BTreeSet::new();
    let (o_plain, o_grant) = old
        .map(|o| (&o.privileges, &o.privileges_with_grant))
        .unwrap_or((&empty, &empty));
    let (n_plain, n_grant) = new
        .map(|n| (&n.privileges, &n.privileges_with_grant))
        .unwrap_or((&empty, &empty));

    let (grantor, schema, object_type, grantee) = match (old, new) {
        (_, Some(n)) => (
            n.grantor.clone(),
            n.schema.clone(),
            n.object_type.clone(),
            n.grantee.clone(),
        ),
        (Some(o), None) => (
            o.grantor.clone(),
            o.schema.clone(),
            o.object_type.clone(),
            o.grantee.clone(),
        ),
        (None, None) => return vec![],
    };

    let o_all: BTreeSet<_> = o_plain.union(o_grant).cloned().collect();
    let n_all: BTreeSet<_> = n_plain.union(n_grant).cloned().collect();

    let mut steps = Vec::new();

    let to_grant_plain: Vec<_> = n_plain
        .difference(&o_plain.union(o_grant).cloned().collect())
        .cloned()
        .collect();
    if !to_grant_plain.is_empty() {
        steps.push(MigrationStep::DefaultPrivilege(
            DefaultPrivilegeOperation::Grant {
                grantor: grantor.clone(),
                schema: schema.clone(),
                object_type: object_type.clone(),
                grantee: grantee.clone(),
                privileges: to_grant_plain,
                with_grant_option: false,
            },
        ));
    }

    let to_grant_with_option: Vec<_> = n_grant.difference(o_grant).cloned().collect();
    if !to_grant_with_option.is_empty() {
        steps.push(MigrationStep::DefaultPrivilege(
            DefaultPrivilegeOperation::Grant {
                grantor: grantor.clone(),
                schema: schema.clone(),
                object_type: object_type.clone(),
                grantee: grantee.clone(),
                privileges: to_grant_with_option,
                with_grant_option: true,
            },
        ));
    }

    let revoke_grant_option_only: Vec<_> = o_grant
        .intersection(n_plain)
        .filter(|p| !n_grant.contains(*p))
        .cloned()
        .collect();
    if !revoke_grant_option_only.is_empty() {
        steps.push(MigrationStep::DefaultPrivilege(
            DefaultPrivilegeOperation::RevokeGrantOptionOnly {
                grantor: grantor.clone(),
                schema: schema.clone(),
                object_type: object_type.clone(),
                grantee: grantee.clone(),
                privileges: revoke_grant_option_only,
            },
        ));
    }

    let to_revoke: Vec<_> = o_all.difference(&n_all).cloned().collect();
    if !to_revoke.is_empty() {
        steps.push(MigrationStep::DefaultPrivilege(
            DefaultPrivilegeOperation::Revoke {
                grantor,
                schema,
                object_type,
                grantee,
                privileges: to_revoke,
            },
        ));
    }

    steps
}
