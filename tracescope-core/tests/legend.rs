use model::{Callback, CallbackKind, Communication, EntityId};
use tracescope_core::{
    HoverSpec, LegendEntry, LegendManager, RenderSurface, RendererHandle, VisualSource,
};

#[derive(Default)]
struct RecordingSurface {
    pages: Vec<usize>,
    emitted_labels: Vec<String>,
    click_to_hide: bool,
}

impl RenderSurface for RecordingSurface {
    fn draw_bar(&mut self, _source: &VisualSource, _hover: &HoverSpec) -> RendererHandle {
        RendererHandle(0)
    }

    fn draw_rects(
        &mut self,
        _source: &VisualSource,
        _hover: &HoverSpec,
        _color_key: &str,
    ) -> RendererHandle {
        RendererHandle(0)
    }

    fn draw_line(
        &mut self,
        _source: &VisualSource,
        _hover: &HoverSpec,
        _color_key: &str,
    ) -> RendererHandle {
        RendererHandle(0)
    }

    fn add_legend_page(&mut self, entries: &[LegendEntry]) {
        self.pages.push(entries.len());
        self.emitted_labels
            .extend(entries.iter().map(|entry| entry.label.clone()));
    }

    fn enable_legend_hide_on_click(&mut self) {
        self.click_to_hide = true;
    }

    fn export(&mut self, _path: &str, _title: &str) {}
}

fn callback(id: u64) -> Callback {
    Callback {
        id: EntityId(id),
        node_name: "/node".to_string(),
        callback_name: format!("/node/callback{id}"),
        symbol: "Node::on_tick".to_string(),
        kind: CallbackKind::Timer {
            period_ns: 10_000_000,
        },
    }
}

fn communication(id: u64) -> Communication {
    Communication {
        id: EntityId(id),
        topic_name: "/points".to_string(),
        publish_node_name: "/sensor".to_string(),
        subscribe_node_name: "/filter".to_string(),
    }
}

#[test]
fn labels_are_numbered_per_kind_in_visitation_order() {
    let mut legend = LegendManager::new();
    assert_eq!(legend.label_for(&callback(1)), "callback0");
    assert_eq!(legend.label_for(&callback(2)), "callback1");
    assert_eq!(legend.label_for(&communication(3)), "communication0");
    assert_eq!(legend.label_for(&callback(4)), "callback2");
}

#[test]
fn label_is_stable_for_the_same_object() {
    let mut legend = LegendManager::new();
    let first = legend.label_for(&callback(7));
    let again = legend.label_for(&callback(7));
    assert_eq!(first, "callback0");
    assert_eq!(first, again);
}

#[test]
fn labels_are_keyed_by_identity_not_attributes() {
    let mut legend = LegendManager::new();
    let mut cb = callback(7);
    let before = legend.label_for(&cb);
    cb.callback_name = "/node/renamed".to_string();
    assert_eq!(legend.label_for(&cb), before);
}

#[test]
fn register_appends_one_entry_per_call() {
    let mut legend = LegendManager::new();
    let cb = callback(1);
    legend.register(&cb, RendererHandle(10));
    legend.register(&cb, RendererHandle(11));
    assert_eq!(legend.entries().len(), 2);
    assert_eq!(legend.entries()[0].label, "callback0");
    assert_eq!(legend.entries()[1].label, "callback0");
    assert_eq!(legend.entries()[0].renderers, vec![RendererHandle(10)]);
    assert_eq!(legend.entries()[1].renderers, vec![RendererHandle(11)]);
}

fn registered_manager(count: u64) -> LegendManager {
    let mut legend = LegendManager::new();
    for id in 0..count {
        legend.register(&callback(id + 1), RendererHandle(id));
    }
    legend
}

#[test]
fn render_caps_entries_at_max_legends() {
    let legend = registered_manager(25);
    let mut surface = RecordingSurface::default();
    let emitted = legend.render(&mut surface, 20, false);
    assert_eq!(emitted, 20);
    assert_eq!(surface.pages, vec![10, 10]);
    assert_eq!(surface.emitted_labels.len(), 20);
    assert!(surface.click_to_hide);
}

#[test]
fn render_show_all_emits_every_entry() {
    let legend = registered_manager(25);
    let mut surface = RecordingSurface::default();
    let emitted = legend.render(&mut surface, 20, true);
    assert_eq!(emitted, 25);
    assert_eq!(surface.pages, vec![10, 10, 5]);
}

#[test]
fn render_truncates_mid_page_for_non_multiple_caps() {
    let legend = registered_manager(25);
    let mut surface = RecordingSurface::default();
    let emitted = legend.render(&mut surface, 15, false);
    assert_eq!(emitted, 15);
    assert_eq!(surface.pages, vec![10, 5]);
}

#[test]
fn render_with_fewer_entries_than_cap_emits_all() {
    let legend = registered_manager(4);
    let mut surface = RecordingSurface::default();
    let emitted = legend.render(&mut surface, 20, false);
    assert_eq!(emitted, 4);
    assert_eq!(surface.pages, vec![4]);
    assert_eq!(
        surface.emitted_labels,
        vec!["callback0", "callback1", "callback2", "callback3"]
    );
}
