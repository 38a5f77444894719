//! Hierarchical and scalable migration operations
//!
//! This module provides a more maintainable approach to migration steps
//! using hierarchical enums and trait-based rendering.

use crate::catalog::id::DbObjectId;

// Re-export SqlRenderer from render module
pub use crate::render::SqlRenderer;

pub use aggregate::*;
pub use collation::*;
pub use comments::*;
pub use constraint::*;
pub use default_privilege::*;
pub use domain::*;
pub use event_trigger::*;
pub use extension::*;
pub use foreign::*;
pub use function::*;
pub use grant::*;
pub use index::*;
pub use materialized_view::*;
pub use policy::*;
pub use publication::*;
pub use role::*;
pub use role_membership::*;
pub use schema::*;
pub use sequence::*;
pub use subscription::*;
pub use table::*;
pub use trigger::*;
pub use types::*;
pub use view::*;

pub mod aggregate;
pub mod collation;
pub mod comments;
pub mod constraint;
pub mod default_privilege;
pub mod domain;
pub mod event_trigger;
pub mod extension;
pub mod foreign;
pub mod function;
pub mod grant;
pub mod index;
pub mod materialized_view;
pub mod policy;
pub mod publication;
pub mod role;
pub mod role_membership;
pub mod schema;
pub mod sequence;
pub mod subscription;
pub mod table;
pub mod trigger;
pub mod types;
pub mod view;

/// Kind of change represented by an operation, independent of object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Alter,
    Drop,
}

/// Main migration step - hierarchical structure for scalability
#[derive(Debug, Clone)]
pub enum MigrationStep {
    Schema(SchemaOperation),
    Table(TableOperation),
    View(ViewOperation),
    Type(TypeOperation),
    Domain(DomainOperation),
    Sequence(SequenceOperation),
    Function(FunctionOperation),
    Aggregate(AggregateOperation),
    Index(IndexOperation),
    Constraint(ConstraintOperation),
    Trigger(TriggerOperation),
    Extension(ExtensionOperation),
    Grant(GrantOperation),
    Policy(PolicyOperation),
    Role(RoleOperation),
    Collation(CollationOperation),
    MaterializedView(MaterializedViewOperation),
    Publication(PublicationOperation),
    Subscription(SubscriptionOperation),
    ForeignDataWrapper(ForeignDataWrapperOperation),
    ForeignServer(ForeignServerOperation),
    UserMapping(UserMappingOperation),
    ForeignTable(ForeignTableOperation),
    EventTrigger(EventTriggerOperation),
    RoleMembership(RoleMembershipOperation),
    DefaultPrivilege(DefaultPrivilegeOperation),
}

impl MigrationStep {
    /// Returns the database object ID for this migration step
    pub fn id(&self) -> DbObjectId {
        self.db_object_id()
    }

    /// Returns true if this step is a destructive operation (drop)
    pub fn is_drop(&self) -> bool {
        self.is_destructive()
    }

    /// Returns true if this step is a create operation
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            MigrationStep::Schema(SchemaOperation::Create { .. })
                | MigrationStep::Extension(ExtensionOperation::Create { .. })
                | MigrationStep::Table(TableOperation::Create { .. })
                | MigrationStep::View(ViewOperation::Create { .. })
                | MigrationStep::Type(TypeOperation::Create { .. })
                | MigrationStep::Domain(DomainOperation::Create { .. })
                | MigrationStep::Sequence(SequenceOperation::Create { .. })
                | MigrationStep::Function(FunctionOperation::Create { .. })
                | MigrationStep::Aggregate(AggregateOperation::Create { .. })
                | MigrationStep::Index(IndexOperation::Create { .. })
                | MigrationStep::Constraint(ConstraintOperation::Create(_))
                | MigrationStep::Trigger(TriggerOperation::Create { .. })
                | MigrationStep::Grant(GrantOperation::Grant { .. })
                | MigrationStep::Policy(PolicyOperation::Create { .. })
                | MigrationStep::Role(RoleOperation::Create { .. })
                | MigrationStep::Collation(CollationOperation::Create { .. })
                | MigrationStep::MaterializedView(MaterializedViewOperation::Create { .. })
                | MigrationStep::Publication(PublicationOperation::Create { .. })
                | MigrationStep::Subscription(SubscriptionOperation::Create { .. })
                | MigrationStep::ForeignDataWrapper(ForeignDataWrapperOperation::Create { .. })
                | MigrationStep::ForeignServer(ForeignServerOperation::Create { .. })
                | MigrationStep::UserMapping(UserMappingOperation::Create { .. })
                | MigrationStep::ForeignTable(ForeignTableOperation::Create { .. })
                | MigrationStep::EventTrigger(EventTriggerOperation::Create { .. })
                | MigrationStep::RoleMembership(RoleMembershipOperation::Grant { .. })
                | MigrationStep::DefaultPrivilege(DefaultPrivilegeOperation::Grant { .. })
        )
    }

    /// Returns the kind of change this step represents, independent of object type.
    pub fn operation_kind(&self) -> OperationKind {
        if self.is_drop() {
            OperationKind::Drop
        } else if self.is_create() {
            OperationKind::Create
        } else {
            OperationKind::Alter
        }
    }

    /// Returns true if this step is a "relationship" step that creates circular dependencies
    /// These steps should be executed in a second phase after all primary object creation
    pub fn is_relationship(&self) -> bool {
        match self {
            MigrationStep::Sequence(SequenceOperation::AlterOwnership { .. }) => true,
            MigrationStep::Constraint(ConstraintOperation::Create(constraint)) => {
                matches!(
                    constraint.constraint_type,
                    crate::catalog::constraint::ConstraintType::ForeignKey { .. }
                )
            }
            _ => false,
        }
    }

    /// Returns step-level dependencies that may not be in the catalog's forward_deps.
    /// This is used for dynamically generated steps (like REVOKE for missing defaults)
    /// that aren't part of the catalog but still need proper ordering.
    pub fn dependencies(&self) -> Vec<DbObjectId> {
        match self {
            MigrationStep::Grant(GrantOperation::Grant { grant }) => grant.depends_on.clone(),
            MigrationStep::Grant(GrantOperation::Revoke { grant }) => grant.depends_on.clone(),
            MigrationStep::RoleMembership(op) => {
                let (role, member) = match op {
                    RoleMembershipOperation::Grant { role, member, .. }
                    | RoleMembershipOperation::Revoke { role, member }
                    | RoleMembershipOperation::SetAdminOption { role, member, .. } => (role, member),
                };
                vec![
                    DbObjectId::Role { name: role.clone() },
                    DbObjectId::Role {
                        name: member.clone(),
                    },
                ]
            }
            MigrationStep::UserMapping(op) => {
                let server = match op {
                    UserMappingOperation::Create { mapping } => &mapping.server,
                    UserMappingOperation::Drop { server, .. }
                    | UserMappingOperation::AlterOptions { server, .. } => server,
                };
                vec![DbObjectId::ForeignServer {
                    name: server.clone(),
                }]
            }
            // Other operations use catalog.forward_deps exclusively
            _ => vec![],
        }
    }
}

impl From<PolicyOperation> for MigrationStep {
    fn from(op: PolicyOperation) -> Self {
        MigrationStep::Policy(op)
    }
}

impl From<RoleOperation> for MigrationStep {
    fn from(op: RoleOperation) -> Self {
        MigrationStep::Role(op)
    }
}

impl From<CollationOperation> for MigrationStep {
    fn from(op: CollationOperation) -> Self {
        MigrationStep::Collation(op)
    }
}

impl From<MaterializedViewOperation> for MigrationStep {
    fn from(op: MaterializedViewOperation) -> Self {
        MigrationStep::MaterializedView(op)
    }
}

impl From<PublicationOperation> for MigrationStep {
    fn from(op: PublicationOperation) -> Self {
        MigrationStep::Publication(op)
    }
}

impl From<SubscriptionOperation> for MigrationStep {
    fn from(op: SubscriptionOperation) -> Self {
        MigrationStep::Subscription(op)
    }
}

impl From<ForeignDataWrapperOperation> for MigrationStep {
    fn from(op: ForeignDataWrapperOperation) -> Self {
        MigrationStep::ForeignDataWrapper(op)
    }
}

impl From<ForeignServerOperation> for MigrationStep {
    fn from(op: ForeignServerOperation) -> Self {
        MigrationStep::ForeignServer(op)
    }
}

impl From<UserMappingOperation> for MigrationStep {
    fn from(op: UserMappingOperation) -> Self {
        MigrationStep::UserMapping(op)
    }
}

impl From<ForeignTableOperation> for MigrationStep {
    fn from(op: ForeignTableOperation) -> Self {
        MigrationStep::ForeignTable(op)
    }
}

impl From<EventTriggerOperation> for MigrationStep {
    fn from(op: EventTriggerOperation) -> Self {
        MigrationStep::EventTrigger(op)
    }
}

impl From<RoleMembershipOperation> for MigrationStep {
    fn from(op: RoleMembershipOperation) -> Self {
        MigrationStep::RoleMembership(op)
    }
}

impl From<DefaultPrivilegeOperation> for MigrationStep {
    fn from(op: DefaultPrivilegeOperation) -> Self {
        MigrationStep::DefaultPrivilege(op)
    }
}
