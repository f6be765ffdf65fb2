//! In-memory [`RenderSurface`].

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use treeloader::{Field, Region, RenderSurface};
use treeloader_platform::Mutex;

/// One call made on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceOp {
    Show(Region),
    Hide(Region),
    SetText(Region, String),
    ReplaceContent(Region, String),
    WriteText(Field, String),
    WriteFlag(Field, bool),
}

#[derive(Debug, Default)]
struct SurfaceState {
    visible: HashSet<Region>,
    texts: HashMap<Region, String>,
    content: HashMap<Region, String>,
    fields: HashMap<Field, String>,
    flags: HashMap<Field, bool>,
    ops: Vec<SurfaceOp>,
}

/// Records every write and keeps the resulting page state.
///
/// Starts like the loader page: only the loading indicator is visible.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        let mut state = SurfaceState::default();
        state.visible.insert(Region::Loading);
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(&self, region: Region) -> bool {
        self.state.lock().visible.contains(&region)
    }

    #[must_use]
    pub fn text(&self, region: Region) -> Option<String> {
        self.state.lock().texts.get(&region).cloned()
    }

    #[must_use]
    pub fn content(&self, region: Region) -> Option<String> {
        self.state.lock().content.get(&region).cloned()
    }

    #[must_use]
    pub fn field(&self, field: Field) -> String {
        self.read_text(field)
    }

    #[must_use]
    pub fn flag(&self, field: Field) -> bool {
        self.read_flag(field)
    }

    /// Every write, in call order.
    #[must_use]
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.state.lock().ops.clone()
    }

    /// Simulate the user typing into the selector.
    pub fn type_into(&self, field: Field, value: &str) {
        self.state
            .lock()
            .fields
            .insert(field, value.to_string());
    }

    /// Simulate the user toggling a checkbox.
    pub fn check(&self, field: Field, checked: bool) {
        self.state.lock().flags.insert(field, checked);
    }
}

impl RenderSurface for RecordingSurface {
    fn show(&self, region: Region) {
        let mut state = self.state.lock();
        state.visible.insert(region);
        state.ops.push(SurfaceOp::Show(region));
    }

    fn hide(&self, region: Region) {
        let mut state = self.state.lock();
        state.visible.remove(&region);
        state.ops.push(SurfaceOp::Hide(region));
    }

    fn set_text(&self, region: Region, text: &str) {
        let mut state = self.state.lock();
        state.texts.insert(region, text.to_string());
        state.ops.push(SurfaceOp::SetText(region, text.to_string()));
    }

    fn replace_content(&self, region: Region, markup: &str) {
        let mut state = self.state.lock();
        state.content.insert(region, markup.to_string());
        state
            .ops
            .push(SurfaceOp::ReplaceContent(region, markup.to_string()));
    }

    fn read_text(&self, field: Field) -> String {
        self.state
            .lock()
            .fields
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    fn write_text(&self, field: Field, value: &str) {
        let mut state = self.state.lock();
        state.fields.insert(field, value.to_string());
        state.ops.push(SurfaceOp::WriteText(field, value.to_string()));
    }

    fn read_flag(&self, field: Field) -> bool {
        self.state.lock().flags.get(&field).copied().unwrap_or(false)
    }

    fn write_flag(&self, field: Field, value: bool) {
        let mut state = self.state.lock();
        state.flags.insert(field, value);
        state.ops.push(SurfaceOp::WriteFlag(field, value));
    }
}
