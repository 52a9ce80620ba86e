use model::{
    Callback, CallbackKind, Communication, EntityId, Node, Publisher, Subscription, TraceEntity,
};

fn timer_callback(id: u64) -> Callback {
    Callback {
        id: EntityId(id),
        node_name: "/sensor".to_string(),
        callback_name: "/sensor/timer0".to_string(),
        symbol: "SensorNode::on_timer".to_string(),
        kind: CallbackKind::Timer {
            period_ns: 100_000_000,
        },
    }
}

#[test]
fn callback_kind_type_names() {
    assert_eq!(
        CallbackKind::Timer { period_ns: 1 }.type_name(),
        "timer_callback"
    );
    assert_eq!(
        CallbackKind::Subscription {
            topic_name: "/points".to_string()
        }
        .type_name(),
        "subscription_callback"
    );
    assert_eq!(
        CallbackKind::Service {
            service_name: "/reset".to_string()
        }
        .type_name(),
        "service_callback"
    );
}

#[test]
fn entity_kind_names_are_lowercased_kinds() {
    let callback = TraceEntity::Callback(timer_callback(1));
    let communication = TraceEntity::Communication(Communication {
        id: EntityId(2),
        topic_name: "/points".to_string(),
        publish_node_name: "/sensor".to_string(),
        subscribe_node_name: "/filter".to_string(),
    });
    let publisher = TraceEntity::Publisher(Publisher {
        id: EntityId(3),
        node_name: "/sensor".to_string(),
        topic_name: "/points".to_string(),
    });
    let subscription = TraceEntity::Subscription(Subscription {
        id: EntityId(4),
        node_name: "/filter".to_string(),
        topic_name: "/points".to_string(),
    });

    assert_eq!(callback.kind_name(), "callback");
    assert_eq!(communication.kind_name(), "communication");
    assert_eq!(publisher.kind_name(), "publisher");
    assert_eq!(subscription.kind_name(), "subscription");
    assert_eq!(callback.id(), EntityId(1));
    assert_eq!(subscription.id(), EntityId(4));
}

#[test]
fn nodes_may_carry_no_callback_groups() {
    let json = r#"{"node_name": "/bare", "callback_groups": null}"#;
    let node: Node = serde_json::from_str(json).expect("deserialize node");
    assert!(node.callback_groups.is_none());
}
