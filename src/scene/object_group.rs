use std::sync::Arc;

use log::{debug, warn};

use super::{ObjectIdx, ObjectKind, SceneObject, SurfaceList, VolumeList};
use crate::{
    accelerator::{Accelerator, VolumeAccelerator},
    geometry::{FloatType, Intersection, Interval, Ray, WorldBox},
};

/// Scene objects split into surfaces and volumes, each with its own accelerator.
///
/// Accelerators are rebuilt whenever the lists change, so queries always see every added object.
/// Building is single threaded (`&mut self`), a finished group can be queried from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct ObjectGroup {
    surface_list: SurfaceList,
    volume_list: VolumeList,
    surface_accelerator: Accelerator,
    volume_accelerator: VolumeAccelerator,
}

impl ObjectGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object to the list matching its kind and rebuilds that list's accelerator.
    ///
    /// Objects that are neither surface nor volume are dropped with a warning,
    /// returns `None` in that case.
    pub fn add(&mut self, object: Arc<dyn SceneObject>) -> Option<(ObjectKind, ObjectIdx)> {
        let added = self.push(object)?;
        match added.0 {
            ObjectKind::Surface => self.surface_accelerator.rebuild(&self.surface_list),
            ObjectKind::Volume => self.volume_accelerator.rebuild(&self.volume_list),
        }
        Some(added)
    }

    /// Adds several objects, rebuilding the accelerators only once at the end.
    pub fn extend(&mut self, objects: impl IntoIterator<Item = Arc<dyn SceneObject>>) {
        for object in objects {
            self.push(object);
        }
        self.rebuild_accelerators();
    }

    fn push(&mut self, object: Arc<dyn SceneObject>) -> Option<(ObjectKind, ObjectIdx)> {
        let Some(kind) = object.kind() else {
            warn!("Dropping object {object:?} that is neither a surface nor a volume");
            return None;
        };

        let index = match kind {
            ObjectKind::Surface => self.surface_list.add(object),
            ObjectKind::Volume => self.volume_list.add(object),
        };
        debug!("Added {kind:?} object #{}", index.index());
        Some((kind, index))
    }

    /// Recomputes both lists' bounds from the objects' current bounds and rebuilds
    /// the accelerators to match.
    pub fn compute_bounds(&mut self) {
        self.surface_list.compute_bounds();
        self.volume_list.compute_bounds();
        self.rebuild_accelerators();
    }

    fn rebuild_accelerators(&mut self) {
        self.surface_accelerator.rebuild(&self.surface_list);
        self.volume_accelerator.rebuild(&self.volume_list);
    }

    pub fn surface_objects(&self) -> &SurfaceList {
        &self.surface_list
    }

    pub fn volume_objects(&self) -> &VolumeList {
        &self.volume_list
    }

    pub fn surface_accelerator(&self) -> &Accelerator {
        &self.surface_accelerator
    }

    pub fn volume_accelerator(&self) -> &VolumeAccelerator {
        &self.volume_accelerator
    }

    /// Union of surface and volume bounds.
    pub fn bounds(&self) -> WorldBox {
        self.surface_accelerator
            .bounds()
            .union(self.volume_accelerator.bounds())
    }

    /// Nearest surface hit, tagged with the index of the hit object in the surface list.
    pub fn intersect(&self, time: FloatType, ray: &Ray) -> Option<Intersection> {
        self.surface_accelerator
            .intersect(&self.surface_list, time, ray)
    }

    /// True if any surface blocks the ray.
    pub fn intersects(&self, time: FloatType, ray: &Ray) -> bool {
        self.surface_accelerator
            .intersects(&self.surface_list, time, ray)
    }

    /// Intervals spent inside volumes, ordered by entry distance and tagged with
    /// the index of the volume in the volume list.
    pub fn volume_intersect(&self, time: FloatType, ray: &Ray) -> Vec<Interval> {
        self.volume_accelerator
            .intersect(&self.volume_list, time, ray)
    }
}
