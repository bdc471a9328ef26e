use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use index_vec::IndexVec;
use log::trace;

use super::{ObjectIdx, SceneObject};
use crate::{
    geometry::{FloatType, Intersection, Interval, Ray, WorldBox},
    primitive_set::PrimitiveSet,
};

/// Ordered sequence of shared scene objects with their aggregate bounds.
///
/// The list never owns the objects exclusively, the scene may hold other references
/// to the same objects.
#[derive(Clone, Debug)]
pub struct ObjectList {
    objects: IndexVec<ObjectIdx, Arc<dyn SceneObject>>,
    bounds: WorldBox,
}

impl ObjectList {
    pub fn new() -> Self {
        ObjectList {
            objects: IndexVec::new(),
            bounds: WorldBox::empty(),
        }
    }

    /// Appends the object and grows the aggregate bounds to cover it.
    pub fn add(&mut self, object: Arc<dyn SceneObject>) -> ObjectIdx {
        self.bounds.add_box(&object.bounds());
        self.objects.push(object)
    }

    pub fn get(&self, index: ObjectIdx) -> Option<&Arc<dyn SceneObject>> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectIdx, &Arc<dyn SceneObject>)> {
        self.objects.iter_enumerated()
    }

    /// Union of the bounds of all objects, empty for an empty list.
    pub fn bounds(&self) -> &WorldBox {
        &self.bounds
    }

    /// Recomputes the aggregate bounds from the current bounds of the objects.
    pub fn compute_bounds(&mut self) {
        self.bounds = WorldBox::empty();
        for object in &self.objects {
            self.bounds.add_box(&object.bounds());
        }
        trace!("Object list bounds: {:?}", self.bounds);
    }

    fn object(&self, id: usize) -> &Arc<dyn SceneObject> {
        &self.objects[ObjectIdx::from_usize(id)]
    }
}

impl Default for ObjectList {
    fn default() -> Self {
        Self::new()
    }
}

/// Object list holding surface objects.
#[derive(Clone, Debug, Default)]
pub struct SurfaceList(ObjectList);

/// Object list holding volume objects.
#[derive(Clone, Debug, Default)]
pub struct VolumeList(ObjectList);

impl Deref for SurfaceList {
    type Target = ObjectList;
    fn deref(&self) -> &ObjectList {
        &self.0
    }
}

impl DerefMut for SurfaceList {
    fn deref_mut(&mut self) -> &mut ObjectList {
        &mut self.0
    }
}

impl Deref for VolumeList {
    type Target = ObjectList;
    fn deref(&self) -> &ObjectList {
        &self.0
    }
}

impl DerefMut for VolumeList {
    fn deref_mut(&mut self) -> &mut ObjectList {
        &mut self.0
    }
}

impl PrimitiveSet for SurfaceList {
    type Hit = Intersection;

    fn name(&self) -> &'static str {
        "ObjectInstance:Surface"
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn bounds(&self, id: usize) -> WorldBox {
        self.object(id).bounds()
    }

    fn total_bounds(&self) -> WorldBox {
        self.0.bounds.clone()
    }

    fn intersect(&self, id: usize, time: FloatType, ray: &Ray) -> Option<Intersection> {
        let mut hit = self.object(id).intersect(time, ray)?;
        hit.object = Some(ObjectIdx::from_usize(id));
        Some(hit)
    }

    fn intersects(&self, id: usize, time: FloatType, ray: &Ray) -> bool {
        self.object(id).intersects(time, ray)
    }
}

impl PrimitiveSet for VolumeList {
    type Hit = Interval;

    fn name(&self) -> &'static str {
        "ObjectInstance:Volume"
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn bounds(&self, id: usize) -> WorldBox {
        self.object(id).bounds()
    }

    fn total_bounds(&self) -> WorldBox {
        self.0.bounds.clone()
    }

    fn intersect(&self, id: usize, time: FloatType, ray: &Ray) -> Option<Interval> {
        let mut interval = self.object(id).volume_intersect(time, ray)?;
        interval.object = Some(ObjectIdx::from_usize(id));
        Some(interval)
    }
}
