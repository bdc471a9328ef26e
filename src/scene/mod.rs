mod instance;
mod object_group;
mod object_list;

pub use instance::{SurfaceInstance, VolumeInstance};
pub use object_group::ObjectGroup;
pub use object_list::{ObjectList, SurfaceList, VolumeList};

use std::fmt::Debug;

use crate::geometry::{FloatType, Intersection, Interval, Ray, WorldBox};

index_vec::define_index_type! {
    /// Position of an object within its object list.
    pub struct ObjectIdx = u32;
    IMPL_RAW_CONVERSIONS = true;
}

/// Which accelerator and query type an object belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Surface,
    Volume,
}

/// Renderable object
pub trait SceneObject: Debug + Send + Sync {
    /// Surface or volume, `None` if the object is neither.
    fn kind(&self) -> Option<ObjectKind>;

    fn bounds(&self) -> WorldBox;

    /// Nearest surface hit. Objects that are not surfaces never hit.
    fn intersect(&self, _time: FloatType, _ray: &Ray) -> Option<Intersection> {
        None
    }

    fn intersects(&self, time: FloatType, ray: &Ray) -> bool {
        self.intersect(time, ray).is_some()
    }

    /// Range of the ray inside the volume. Objects that are not volumes never hit.
    fn volume_intersect(&self, _time: FloatType, _ray: &Ray) -> Option<Interval> {
        None
    }
}
