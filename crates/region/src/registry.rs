use foundation::{Arena, Handle, LatLngBounds};
use serde::Serialize;

use crate::appearance::Appearance;
use crate::map::ShapeId;

/// Identity of a registered region. Stale after eviction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegionId(pub Handle);

/// A region rectangle as a value: extent plus appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rectangle {
    pub bounds: LatLngBounds,
    pub appearance: Appearance,
}

impl Rectangle {
    pub fn new(bounds: LatLngBounds) -> Self {
        Self {
            bounds,
            appearance: Appearance::Enabled,
        }
    }
}

/// A registry entry that has been removed. The caller owns detaching
/// `shape` from the map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Evicted {
    pub id: RegionId,
    pub rect: Rectangle,
    pub shape: ShapeId,
}

#[derive(Debug)]
struct Slot {
    rect: Rectangle,
    shape: ShapeId,
}

/// Insertion-ordered rectangles with a capacity of one settled entry.
///
/// The arena is the handle table from `RegionId` to the record and its
/// on-screen shape; `order` keeps insertion order.
#[derive(Debug, Default)]
pub struct BoundsRegistry {
    order: Vec<RegionId>,
    slots: Arena<Slot>,
}

impl BoundsRegistry {
    pub const CAPACITY: usize = 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rect`, then evicts the oldest entry if over capacity.
    ///
    /// The new entry is registered before the old one goes away, so the
    /// registry is never observed empty in between.
    pub fn add(&mut self, rect: Rectangle, shape: ShapeId) -> (RegionId, Option<Evicted>) {
        let id = RegionId(self.slots.insert(Slot { rect, shape }));
        self.order.push(id);
        let evicted = if self.order.len() > Self::CAPACITY {
            self.remove_at(0)
        } else {
            None
        };
        (id, evicted)
    }

    /// Removes the entry at `index`. Out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<Evicted> {
        let id = *self.order.get(index)?;
        self.order.remove(index);
        let slot = self.slots.remove(id.0)?;
        Some(Evicted {
            id,
            rect: slot.rect,
            shape: slot.shape,
        })
    }

    /// Evicts everything, oldest first.
    pub fn remove_all(&mut self) -> Vec<Evicted> {
        let mut out = Vec::with_capacity(self.order.len());
        while let Some(evicted) = self.remove_at(0) {
            out.push(evicted);
        }
        out
    }

    pub fn current_id(&self) -> Option<RegionId> {
        self.order.last().copied()
    }

    pub fn current(&self) -> Option<&Rectangle> {
        self.current_id().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: RegionId) -> Option<&Rectangle> {
        self.slots.get(id.0).map(|s| &s.rect)
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Rectangle> {
        self.slots.get_mut(id.0).map(|s| &mut s.rect)
    }

    /// Record and shape handle together, for appearance transitions.
    pub fn entry_mut(&mut self, id: RegionId) -> Option<(&mut Rectangle, ShapeId)> {
        self.slots.get_mut(id.0).map(|s| (&mut s.rect, s.shape))
    }

    pub fn shape(&self, id: RegionId) -> Option<ShapeId> {
        self.slots.get(id.0).map(|s| s.shape)
    }

    pub fn find_by_shape(&self, shape: ShapeId) -> Option<RegionId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.shape(*id) == Some(shape))
    }

    /// Ids in insertion order, detached from the registry borrow.
    pub fn ids(&self) -> Vec<RegionId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Rectangle, ShapeId)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(id.0).map(|s| (*id, &s.rect, s.shape)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
