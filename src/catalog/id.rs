//! A globally unique identifier for any database object this crate knows about.
//!
//! `DbObjectId` is the typed realization of the "stable_id" concept: a value
//! deterministic from identity fields alone (no OIDs, no timestamps), portable
//! across dump/restore, and stable across a diff run. [`DbObjectId::stable_id`]
//! renders the canonical string form (`<kind>:<qualified-name>[(<signature>)]`)
//! used in error messages, logs, and cross-catalog comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DbObjectId {
    Schema {
        name: String,
    },

    Role {
        name: String,
    },

    Table {
        schema: String,
        name: String,
    },

    Column {
        schema: String,
        table: String,
        column: String,
    },

    View {
        schema: String,
        name: String,
    },

    MaterializedView {
        schema: String,
        name: String,
    },

    Type {
        schema: String,
        name: String,
    },
    Domain {
        schema: String,
        name: String,
    },
    Collation {
        schema: String,
        name: String,
    },
    Function {
        schema: String,
        name: String,
        arguments: String,
    },
    Sequence {
        schema: String,
        name: String,
    },
    Index {
        schema: String,
        name: String,
    },
    Constraint {
        schema: String,
        table: String,
        name: String,
    },
    Grant {
        id: String, // Unique identifier: "grantee@object_type:object_name"
    },
    Trigger {
        schema: String,
        table: String,
        name: String,
    },
    Comment {
        object_id: Box<DbObjectId>, // The object being commented on
    },
    Extension {
        name: String,
    },
    Aggregate {
        schema: String,
        name: String,
        arguments: String,
    },
    Policy {
        schema: String,
        table: String,
        name: String,
    },
    Publication {
        name: String,
    },
    Subscription {
        name: String,
    },
    ForeignDataWrapper {
        name: String,
    },
    ForeignServer {
        name: String,
    },
    UserMapping {
        server: String,
        user: String,
    },
    ForeignTable {
        schema: String,
        name: String,
    },
    EventTrigger {
        name: String,
    },
    RoleMembership {
        role: String,
        member: String,
    },
    DefaultPrivilege {
        grantor: String,
        grantee: String,
        schema: Option<String>,
        object_type: String,
    },
}

impl DbObjectId {
    /// Get the schema name for this object, if applicable.
    /// Returns None for schema-less objects like Schema (where name IS the schema),
    /// Extension (database-wide), Grant (uses composite ID), and Comment (delegates to inner).
    pub fn schema(&self) -> Option<&str> {
        match self {
            DbObjectId::Schema { name } => Some(name.as_str()),
            DbObjectId::Column { schema, .. }
            | DbObjectId::Table { schema, .. }
            | DbObjectId::View { schema, .. }
            | DbObjectId::MaterializedView { schema, .. }
            | DbObjectId::Type { schema, .. }
            | DbObjectId::Domain { schema, .. }
            | DbObjectId::Collation { schema, .. }
            | DbObjectId::Function { schema, .. }
            | DbObjectId::Sequence { schema, .. }
            | DbObjectId::Index { schema, .. }
            | DbObjectId::Constraint { schema, .. }
            | DbObjectId::Trigger { schema, .. }
            | DbObjectId::Aggregate { schema, .. }
            | DbObjectId::Policy { schema, .. }
            | DbObjectId::ForeignTable { schema, .. } => Some(schema.as_str()),
            DbObjectId::DefaultPrivilege { schema, .. } => schema.as_deref(),
            DbObjectId::Role { .. }
            | DbObjectId::Grant { .. }
            | DbObjectId::Extension { .. }
            | DbObjectId::Publication { .. }
            | DbObjectId::Subscription { .. }
            | DbObjectId::ForeignDataWrapper { .. }
            | DbObjectId::ForeignServer { .. }
            | DbObjectId::UserMapping { .. }
            | DbObjectId::EventTrigger { .. }
            | DbObjectId::RoleMembership { .. } => None,
            DbObjectId::Comment { object_id } => object_id.schema(),
        }
    }

    /// Short tag identifying this object's kind, used as the `<kind>` component
    /// of `stable_id`. Stable across releases; never derived from the SQL keyword.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            DbObjectId::Schema { .. } => "schema",
            DbObjectId::Role { .. } => "role",
            DbObjectId::Table { .. } => "table",
            DbObjectId::Column { .. } => "column",
            DbObjectId::View { .. } => "view",
            DbObjectId::MaterializedView { .. } => "materialized_view",
            DbObjectId::Type { .. } => "type",
            DbObjectId::Domain { .. } => "domain",
            DbObjectId::Collation { .. } => "collation",
            DbObjectId::Function { .. } => "procedure",
            DbObjectId::Sequence { .. } => "sequence",
            DbObjectId::Index { .. } => "index",
            DbObjectId::Constraint { .. } => "constraint",
            DbObjectId::Grant { .. } => "acl",
            DbObjectId::Trigger { .. } => "trigger",
            DbObjectId::Comment { .. } => "comment",
            DbObjectId::Extension { .. } => "extension",
            DbObjectId::Aggregate { .. } => "aggregate",
            DbObjectId::Policy { .. } => "policy",
            DbObjectId::Publication { .. } => "publication",
            DbObjectId::Subscription { .. } => "subscription",
            DbObjectId::ForeignDataWrapper { .. } => "foreign_data_wrapper",
            DbObjectId::ForeignServer { .. } => "server",
            DbObjectId::UserMapping { .. } => "user_mapping",
            DbObjectId::ForeignTable { .. } => "foreign_table",
            DbObjectId::EventTrigger { .. } => "event_trigger",
            DbObjectId::RoleMembership { .. } => "membership",
            DbObjectId::DefaultPrivilege { .. } => "default_privilege",
        }
    }

    /// Deterministic, database-portable string form: `<kind>:<qualified-name>[(<signature>)]`.
    /// Built only from identity fields, so it is stable across a dump/restore cycle.
    pub fn stable_id(&self) -> String {
        match self {
            DbObjectId::Schema { name }
            | DbObjectId::Extension { name }
            | DbObjectId::Role { name } => {
                format!("{}:{}", self.kind_tag(), name)
            }
            DbObjectId::Column {
                schema,
                table,
                column,
            } => format!("{}:{}.{}.{}", self.kind_tag(), schema, table, column),
            DbObjectId::Table { schema, name }
            | DbObjectId::View { schema, name }
            | DbObjectId::MaterializedView { schema, name }
            | DbObjectId::Type { schema, name }
            | DbObjectId::Domain { schema, name }
            | DbObjectId::Collation { schema, name }
            | DbObjectId::Sequence { schema, name }
            | DbObjectId::Index { schema, name }
            | DbObjectId::ForeignTable { schema, name } => {
                format!("{}:{}.{}", self.kind_tag(), schema, name)
            }
            DbObjectId::Function {
                schema,
                name,
                arguments,
            }
            | DbObjectId::Aggregate {
                schema,
                name,
                arguments,
            } => format!("{}:{}.{}({})", self.kind_tag(), schema, name, arguments),
            DbObjectId::Constraint {
                schema,
                table,
                name,
            }
            | DbObjectId::Trigger {
                schema,
                table,
                name,
            }
            | DbObjectId::Policy {
                schema,
                table,
                name,
            } => format!("{}:{}.{}.{}", self.kind_tag(), schema, table, name),
            DbObjectId::Grant { id } => format!("{}:{}", self.kind_tag(), id),
            DbObjectId::Comment { object_id } => {
                format!("{}:{}", self.kind_tag(), object_id.stable_id())
            }
            DbObjectId::Publication { name }
            | DbObjectId::Subscription { name }
            | DbObjectId::ForeignDataWrapper { name }
            | DbObjectId::ForeignServer { name }
            | DbObjectId::EventTrigger { name } => {
                format!("{}:{}", self.kind_tag(), name)
            }
            DbObjectId::UserMapping { server, user } => {
                format!("{}:{}@{}", self.kind_tag(), user, server)
            }
            DbObjectId::RoleMembership { role, member } => {
                format!("{}:{}->{}", self.kind_tag(), role, member)
            }
            DbObjectId::DefaultPrivilege {
                grantor,
                grantee,
                schema,
                object_type,
            } => format!(
                "{}:{}:{}:{}:{}",
                self.kind_tag(),
                grantor,
                grantee,
                schema.as_deref().unwrap_or("*"),
                object_type
            ),
        }
    }

    /// Fixed per-kind rank used to break ties deterministically across unrelated
    /// changes when the dependency DAG doesn't otherwise order them (diff
    /// ordering falls back to this before falling back to stable_id order).
    pub fn kind_rank(&self) -> u8 {
        match self {
            DbObjectId::Role { .. } => 0,
            DbObjectId::Schema { .. } => 1,
            DbObjectId::Extension { .. } => 2,
            DbObjectId::Collation { .. } => 3,
            DbObjectId::Domain { .. } => 4,
            DbObjectId::Type { .. } => 5,
            DbObjectId::Sequence { .. } => 6,
            DbObjectId::Table { .. } => 7,
            DbObjectId::Column { .. } => 7,
            DbObjectId::Index { .. } => 8,
            DbObjectId::Constraint { .. } => 9,
            DbObjectId::View { .. } => 10,
            DbObjectId::MaterializedView { .. } => 11,
            DbObjectId::Function { .. } => 12,
            DbObjectId::Aggregate { .. } => 13,
            DbObjectId::Trigger { .. } => 14,
            DbObjectId::Policy { .. } => 15,
            DbObjectId::Publication { .. } => 16,
            DbObjectId::Subscription { .. } => 17,
            DbObjectId::ForeignDataWrapper { .. } => 18,
            DbObjectId::ForeignServer { .. } => 19,
            DbObjectId::UserMapping { .. } => 20,
            DbObjectId::ForeignTable { .. } => 21,
            DbObjectId::EventTrigger { .. } => 22,
            DbObjectId::RoleMembership { .. } => 23,
            DbObjectId::DefaultPrivilege { .. } => 24,
            DbObjectId::Comment { .. } => 25,
            DbObjectId::Grant { .. } => 26,
        }
    }
}

impl std::fmt::Display for DbObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stable_id())
    }
}

pub trait DependsOn {
    fn id(&self) -> DbObjectId;
    fn depends_on(&self) -> &[DbObjectId];
}
