use serde::{Deserialize, Serialize};

/// Opaque identity assigned by the trace layer. Caches and dedup are keyed
/// on this, never on value equality, so a label stays with its object even
/// if attributes change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallbackKind {
    Timer { period_ns: i64 },
    Subscription { topic_name: String },
    Service { service_name: String },
}

impl CallbackKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            CallbackKind::Timer { .. } => "timer_callback",
            CallbackKind::Subscription { .. } => "subscription_callback",
            CallbackKind::Service { .. } => "service_callback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    pub id: EntityId,
    pub node_name: String,
    pub callback_name: String,
    pub symbol: String,
    pub kind: CallbackKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Communication {
    pub id: EntityId,
    pub topic_name: String,
    pub publish_node_name: String,
    pub subscribe_node_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: EntityId,
    pub node_name: String,
    pub topic_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: EntityId,
    pub node_name: String,
    pub topic_name: String,
}

/// One variant per plottable entity kind. Key-schema lookup and tooltip
/// resolution dispatch on this with exhaustive matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceEntity {
    Callback(Callback),
    Communication(Communication),
    Publisher(Publisher),
    Subscription(Subscription),
}

impl TraceEntity {
    pub fn id(&self) -> EntityId {
        match self {
            TraceEntity::Callback(c) => c.id,
            TraceEntity::Communication(c) => c.id,
            TraceEntity::Publisher(p) => p.id,
            TraceEntity::Subscription(s) => s.id,
        }
    }

    /// Lowercased kind used to derive legend labels.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TraceEntity::Callback(_) => "callback",
            TraceEntity::Communication(_) => "communication",
            TraceEntity::Publisher(_) => "publisher",
            TraceEntity::Subscription(_) => "subscription",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackGroup {
    pub id: EntityId,
    pub callback_group_name: String,
    pub callbacks: Vec<Callback>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_name: String,
    pub callback_groups: Option<Vec<CallbackGroup>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Executor {
    pub executor_name: String,
    pub callback_groups: Option<Vec<CallbackGroup>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub callback_groups: Option<Vec<CallbackGroup>>,
}

/// One communication hop of a causal path: a topic carried from the
/// publishing node to the subscribing node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathHop {
    pub topic_name: String,
    pub publish_node: Node,
    pub subscribe_node: Node,
}

/// Ordered hops connecting a publishing endpoint to a subscribing endpoint
/// across one or more nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalPath {
    pub path_name: String,
    pub hops: Vec<PathHop>,
}
