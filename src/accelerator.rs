//! Reference accelerators over primitive sets.
//!
//! Per-primitive bounds are cached at build time, queries cull primitives by their boxes
//! and then ask the primitive set for exact answers. The primitive set itself is passed to
//! every query and has to be the same (unmodified) set the accelerator was built from.

use itertools::Itertools as _;
use log::debug;
use ordered_float::OrderedFloat;

use crate::{
    geometry::{FloatType, Intersection, Interval, Ray, RayIntersectionExt as _, WorldBox},
    primitive_set::PrimitiveSet,
};

#[derive(Clone, Debug)]
struct BoundsCache {
    primitive_set_name: &'static str,
    bounds: WorldBox,
    primitive_bounds: Vec<WorldBox>,
}

impl BoundsCache {
    fn new() -> Self {
        BoundsCache {
            primitive_set_name: "",
            bounds: WorldBox::empty(),
            primitive_bounds: Vec::new(),
        }
    }

    fn build<P: PrimitiveSet>(primitives: &P) -> Self {
        let primitive_bounds: Vec<_> = (0..primitives.count())
            .map(|id| primitives.bounds(id))
            .collect();
        let bounds = primitives.total_bounds();
        debug!(
            "Built accelerator over {} primitives of {}",
            primitive_bounds.len(),
            primitives.name()
        );

        BoundsCache {
            primitive_set_name: primitives.name(),
            bounds,
            primitive_bounds,
        }
    }

    /// Primitives whose boxes the ray passes through, with entry and exit distances,
    /// ordered by entry distance.
    fn candidates(&self, ray: &Ray) -> Vec<(usize, FloatType, FloatType)> {
        if self.bounds.intersect(ray).is_none() {
            return Vec::new();
        }

        self.primitive_bounds
            .iter()
            .enumerate()
            .filter_map(|(id, b)| b.intersect(ray).map(|(t1, t2)| (id, t1, t2)))
            .sorted_by_key(|(_, t1, _)| OrderedFloat(*t1))
            .collect()
    }
}

/// Surface accelerator, finds the nearest hit along a ray.
#[derive(Clone, Debug)]
pub struct Accelerator {
    cache: BoundsCache,
}

impl Accelerator {
    /// Accelerator with no primitives, every query misses.
    pub fn new() -> Self {
        Accelerator {
            cache: BoundsCache::new(),
        }
    }

    pub fn build<P: PrimitiveSet<Hit = Intersection>>(primitives: &P) -> Self {
        Accelerator {
            cache: BoundsCache::build(primitives),
        }
    }

    pub fn rebuild<P: PrimitiveSet<Hit = Intersection>>(&mut self, primitives: &P) {
        self.cache = BoundsCache::build(primitives);
    }

    pub fn primitive_set_name(&self) -> &'static str {
        self.cache.primitive_set_name
    }

    pub fn primitive_count(&self) -> usize {
        self.cache.primitive_bounds.len()
    }

    pub fn bounds(&self) -> &WorldBox {
        &self.cache.bounds
    }

    /// Nearest intersection along the ray.
    pub fn intersect<P: PrimitiveSet<Hit = Intersection>>(
        &self,
        primitives: &P,
        time: FloatType,
        ray: &Ray,
    ) -> Option<Intersection> {
        let mut ray = *ray;
        let mut best = None;

        for (id, t1, _t2) in self.cache.candidates(&ray) {
            if t1 > ray.t_max {
                // Candidates are sorted, nothing further can be closer than the current best
                break;
            }
            if let Some(hit) = primitives.intersect(id, time, &ray) {
                if hit.t_hit <= ray.t_max {
                    ray.t_max = hit.t_hit;
                    best = Some(hit);
                }
            }
        }

        best
    }

    /// True if anything along the ray is hit.
    pub fn intersects<P: PrimitiveSet<Hit = Intersection>>(
        &self,
        primitives: &P,
        time: FloatType,
        ray: &Ray,
    ) -> bool {
        self.cache
            .candidates(ray)
            .into_iter()
            .any(|(id, _, _)| primitives.intersects(id, time, ray))
    }
}

impl Default for Accelerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Volume accelerator, collects all volume intervals along a ray.
#[derive(Clone, Debug)]
pub struct VolumeAccelerator {
    cache: BoundsCache,
}

impl VolumeAccelerator {
    /// Accelerator with no primitives, every query returns no intervals.
    pub fn new() -> Self {
        VolumeAccelerator {
            cache: BoundsCache::new(),
        }
    }

    pub fn build<P: PrimitiveSet<Hit = Interval>>(primitives: &P) -> Self {
        VolumeAccelerator {
            cache: BoundsCache::build(primitives),
        }
    }

    pub fn rebuild<P: PrimitiveSet<Hit = Interval>>(&mut self, primitives: &P) {
        self.cache = BoundsCache::build(primitives);
    }

    pub fn primitive_set_name(&self) -> &'static str {
        self.cache.primitive_set_name
    }

    pub fn primitive_count(&self) -> usize {
        self.cache.primitive_bounds.len()
    }

    pub fn bounds(&self) -> &WorldBox {
        &self.cache.bounds
    }

    /// All intervals the ray spends inside volumes, ordered by entry distance.
    pub fn intersect<P: PrimitiveSet<Hit = Interval>>(
        &self,
        primitives: &P,
        time: FloatType,
        ray: &Ray,
    ) -> Vec<Interval> {
        self.cache
            .candidates(ray)
            .into_iter()
            .filter_map(|(id, _, _)| primitives.intersect(id, time, ray))
            .sorted_by_key(|interval| OrderedFloat(interval.t_min))
            .collect()
    }
}

impl Default for VolumeAccelerator {
    fn default() -> Self {
        Self::new()
    }
}
