use std::sync::Arc;

use super::{ObjectKind, SceneObject};
use crate::{
    accelerator::Accelerator,
    geometry::{FloatType, Intersection, Interval, Ray, RayIntersectionExt as _, WorldBox},
    mesh::Mesh,
};

/// Mesh placed in the scene as a surface object.
///
/// The mesh is shared, several instances (or the caller) may hold it.
/// It must not change after the instance is created, the accelerator is built from it once.
#[derive(Debug)]
pub struct SurfaceInstance {
    mesh: Arc<Mesh>,
    accelerator: Accelerator,
}

impl SurfaceInstance {
    pub fn new(mesh: Arc<Mesh>) -> Self {
        let accelerator = Accelerator::build(mesh.as_ref());
        SurfaceInstance { mesh, accelerator }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl SceneObject for SurfaceInstance {
    fn kind(&self) -> Option<ObjectKind> {
        Some(ObjectKind::Surface)
    }

    fn bounds(&self) -> WorldBox {
        self.accelerator.bounds().clone()
    }

    fn intersect(&self, time: FloatType, ray: &Ray) -> Option<Intersection> {
        self.accelerator.intersect(self.mesh.as_ref(), time, ray)
    }

    fn intersects(&self, time: FloatType, ray: &Ray) -> bool {
        self.accelerator.intersects(self.mesh.as_ref(), time, ray)
    }
}

/// Volume object occupying an axis aligned box.
///
/// Only the extent of the volume is known here, density lookups happen elsewhere.
#[derive(Clone, Debug)]
pub struct VolumeInstance {
    bounds: WorldBox,
}

impl VolumeInstance {
    pub fn new(bounds: WorldBox) -> Self {
        VolumeInstance { bounds }
    }
}

impl SceneObject for VolumeInstance {
    fn kind(&self) -> Option<ObjectKind> {
        Some(ObjectKind::Volume)
    }

    fn bounds(&self) -> WorldBox {
        self.bounds.clone()
    }

    fn volume_intersect(&self, _time: FloatType, ray: &Ray) -> Option<Interval> {
        let (t_min, t_max) = self.bounds.intersect(ray)?;
        Some(Interval {
            t_min,
            t_max,
            object: None,
        })
    }
}
