//! Tracking of graphics resources so they are released exactly once, and
//! tolerant per-item asset loading.

use fnv::FnvHashMap;

use crate::error::WheelError;
use crate::item::WheelItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Geometry,
    Texture,
    Material,
}

#[derive(Debug, Default)]
pub struct ResourceTracker {
    next_id: u32,
    live: FnvHashMap<ResourceId, (ResourceKind, String)>,
    disposed: bool,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, kind: ResourceKind, label: impl Into<String>) -> ResourceId {
        let id = ResourceId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, (kind, label.into()));
        id
    }

    /// Release a single resource ahead of a full disposal.
    pub fn release(&mut self, id: ResourceId) -> Result<ResourceKind, WheelError> {
        self.live
            .remove(&id)
            .map(|(kind, _)| kind)
            .ok_or(WheelError::AlreadyDisposed(id))
    }

    pub fn is_live(&self, id: ResourceId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Release everything still live. Only the first call returns anything.
    pub fn dispose_all(&mut self) -> Vec<(ResourceId, ResourceKind)> {
        if self.disposed {
            return Vec::new();
        }
        self.disposed = true;
        let mut released: Vec<(ResourceId, ResourceKind)> =
            self.live.drain().map(|(id, (kind, _))| (id, kind)).collect();
        released.sort_by_key(|(id, _)| *id);
        log::info!("[assets] disposed {} resources", released.len());
        released
    }
}

/// Run `loader` for every item. Failures are logged and leave a `None` in
/// that slot, so one missing image never blocks the rest of the wheel.
pub fn load_item_assets<T, F>(items: &[WheelItem], mut loader: F) -> Vec<Option<T>>
where
    F: FnMut(&WheelItem) -> Result<T, WheelError>,
{
    items
        .iter()
        .map(|item| match loader(item) {
            Ok(asset) => Some(asset),
            Err(e) => {
                log::warn!("[assets] skipping item {:?}: {}", item.id, e);
                None
            }
        })
        .collect()
}
