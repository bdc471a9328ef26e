use crate::geometry::{FloatType, Ray, WorldBox};

/// Indexed collection of primitives that an accelerator can bound and intersect.
///
/// Primitives are addressed by a zero based id in `0..count()`. Ids are positional and
/// stable, accelerators store them instead of references to the primitives.
///
/// Implementations are read-only through this interface, so that a finished set can
/// be queried from many render threads at once.
pub trait PrimitiveSet: Send + Sync {
    /// What a successful ray query returns.
    type Hit;

    /// Kind of the primitive set, for diagnostics.
    fn name(&self) -> &'static str;

    fn count(&self) -> usize;

    /// Bounding box of a single primitive, covering its whole motion over the shutter interval.
    fn bounds(&self, id: usize) -> WorldBox;

    /// Bounding box of all primitives. Never smaller than the union of `bounds(id)`.
    fn total_bounds(&self) -> WorldBox;

    /// Intersects a single primitive with the ray at the given shutter time.
    fn intersect(&self, id: usize, time: FloatType, ray: &Ray) -> Option<Self::Hit>;

    /// Hit or miss only, without filling the hit record.
    /// Used for shadow rays.
    fn intersects(&self, id: usize, time: FloatType, ray: &Ray) -> bool {
        self.intersect(id, time, ray).is_some()
    }
}
