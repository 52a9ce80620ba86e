use crate::chart::RenderSurface;
use model::{Callback, Communication, EntityId, Publisher, Subscription, TraceEntity};
use std::collections::HashMap;

pub const LEGEND_PAGE_SIZE: usize = 10;

/// Opaque handle to a glyph drawn on a render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub renderers: Vec<RendererHandle>,
}

/// Identity seam for legend labelling. Labels are cached per [`EntityId`],
/// so the same object keeps its label even if attributes change.
pub trait LegendTarget {
    fn entity_id(&self) -> EntityId;
    fn kind_name(&self) -> &'static str;
}

impl LegendTarget for Callback {
    fn entity_id(&self) -> EntityId {
        self.id
    }
    fn kind_name(&self) -> &'static str {
        "callback"
    }
}

impl LegendTarget for Communication {
    fn entity_id(&self) -> EntityId {
        self.id
    }
    fn kind_name(&self) -> &'static str {
        "communication"
    }
}

impl LegendTarget for Publisher {
    fn entity_id(&self) -> EntityId {
        self.id
    }
    fn kind_name(&self) -> &'static str {
        "publisher"
    }
}

impl LegendTarget for Subscription {
    fn entity_id(&self) -> EntityId {
        self.id
    }
    fn kind_name(&self) -> &'static str {
        "subscription"
    }
}

impl LegendTarget for TraceEntity {
    fn entity_id(&self) -> EntityId {
        self.id()
    }
    fn kind_name(&self) -> &'static str {
        TraceEntity::kind_name(self)
    }
}

/// Assigns one stable display label per distinct object and collects legend
/// entries for paged emission. State is scoped to one orchestrator instance.
#[derive(Debug, Default)]
pub struct LegendManager {
    counts: HashMap<&'static str, usize>,
    labels: HashMap<EntityId, String>,
    items: Vec<LegendEntry>,
}

impl LegendManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached label for a previously seen object, otherwise the kind name
    /// plus a per-kind counter (`callback0`, `callback1`, ...).
    pub fn label_for(&mut self, target: &dyn LegendTarget) -> String {
        if let Some(label) = self.labels.get(&target.entity_id()) {
            return label.clone();
        }
        let kind = target.kind_name();
        let count = self.counts.entry(kind).or_insert(0);
        let label = format!("{kind}{count}");
        *count += 1;
        self.labels.insert(target.entity_id(), label.clone());
        label
    }

    /// Records one legend entry per call. Entries are never merged by label;
    /// grouping renderers under one entry is the caller's decision.
    pub fn register(&mut self, target: &dyn LegendTarget, renderer: RendererHandle) {
        let label = self.label_for(target);
        self.items.push(LegendEntry {
            label,
            renderers: vec![renderer],
        });
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.items
    }

    /// Emits entries to the surface in pages of [`LEGEND_PAGE_SIZE`]. Unless
    /// `show_all` is set, at most `max_legends` entries are emitted; a cap
    /// that is not a page multiple truncates mid-page. Returns the emitted
    /// count.
    pub fn render(
        &self,
        surface: &mut dyn RenderSurface,
        max_legends: usize,
        show_all: bool,
    ) -> usize {
        let limit = if show_all {
            self.items.len()
        } else {
            max_legends.min(self.items.len())
        };
        if limit < self.items.len() {
            log::warn!(
                "only the first {limit} of {} legends are drawn by default; \
                 set show_all_legends to draw every legend",
                self.items.len()
            );
        }
        for page in self.items[..limit].chunks(LEGEND_PAGE_SIZE) {
            surface.add_legend_page(page);
        }
        surface.enable_legend_hide_on_click();
        limit
    }
}
