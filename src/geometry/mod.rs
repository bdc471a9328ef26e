mod aabb;
mod ray_box_intersection;
mod ray_triangle_intersection;
mod triangle;

pub use aabb::AABB;
pub use ray_box_intersection::RayIntersectionExt;
pub use triangle::{BarycentricCoordinates, Triangle};

use nalgebra::{Point2, Point3, Unit, Vector3};

use crate::scene::ObjectIdx;

pub type FloatType = f64;

/// Tolerance for degeneracy tests (zero length normals, parallel rays)
pub const EPSILON: FloatType = 1e-12;

pub type WorldPoint = Point3<FloatType>;
pub type WorldVector = Vector3<FloatType>;
pub type WorldBox = AABB<WorldPoint>;
pub type TexturePoint = Point2<FloatType>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Normalized direction of the ray
    pub direction: Unit<WorldVector>,

    /// Componentwise inverse of the ray direction
    /// Zeros in direction get turned into positive infinity regardless of the sign of the zero
    pub inv_direction: WorldVector,

    /// Valid range of distances along the ray
    pub t_min: FloatType,
    pub t_max: FloatType,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        let direction = Unit::new_normalize(direction);
        let inv_direction = direction.map(|x| if x == 0.0 { FloatType::INFINITY } else { 1.0 / x });

        Ray {
            origin,
            direction,
            inv_direction,
            t_min: 0.0,
            t_max: FloatType::INFINITY,
        }
    }

    /// Restricts the ray to distances in `[t_min, t_max]`.
    pub fn with_range(self, t_min: FloatType, t_max: FloatType) -> Ray {
        Ray {
            t_min,
            t_max,
            ..self
        }
    }

    pub fn point_at(&self, distance: FloatType) -> WorldPoint {
        self.origin + self.direction.as_ref() * distance
    }

    pub fn contains_distance(&self, distance: FloatType) -> bool {
        distance >= self.t_min && distance <= self.t_max
    }
}

/// Surface hit record produced by a primitive set.
#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    pub t_hit: FloatType,
    pub point: WorldPoint,
    /// Interpolated shading normal
    pub normal: Unit<WorldVector>,
    pub uv: TexturePoint,
    pub dp_du: WorldVector,
    pub dp_dv: WorldVector,
    pub primitive_id: usize,
    /// Owning scene object, filled in by whoever knows it (the object group).
    pub object: Option<ObjectIdx>,
}

/// Range of ray distances spent inside a volume object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub t_min: FloatType,
    pub t_max: FloatType,
    pub object: Option<ObjectIdx>,
}

#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::prelude::*;

    /// Helper macro that creates a wrapper arnound a type that implemetns Deref and Arbitary
    macro_rules! arbitrary_wrapper {
        ( $wrapper_name:ident ( $type:ty ) -> $block:block ) => {
            #[derive(Copy, Clone, Debug)]
            pub struct $wrapper_name(pub $type);

            impl std::ops::Deref for $wrapper_name {
                type Target = $type;
                fn deref(&self) -> &$type {
                    &self.0
                }
            }

            impl Arbitrary for $wrapper_name {
                type Parameters = ();
                type Strategy = proptest::strategy::BoxedStrategy<Self>;
                fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
                    $block.prop_map(|x| $wrapper_name(x)).boxed()
                }
            }
        };
    }

    fn simple_float() -> BoxedStrategy<FloatType> {
        (-100_000i32..100_000i32)
            .prop_map(|n| n as FloatType * 1e-3)
            .boxed()
    }

    arbitrary_wrapper! {
        WorldPointWrapper(WorldPoint) -> {
            (simple_float(), simple_float(), simple_float())
                .prop_map(|coords| WorldPoint::new(coords.0, coords.1, coords.2))
        }
    }

    arbitrary_wrapper! {
        WorldVectorWrapper(WorldVector) -> {
            (simple_float(), simple_float(), simple_float())
                .prop_map(|coords| WorldVector::new(coords.0, coords.1, coords.2))
        }
    }

    arbitrary_wrapper! {
        NonzeroWorldVectorWrapper(WorldVector) -> {
            (simple_float(), simple_float(), simple_float())
                .prop_filter_map(
                    "vector is zero",
                    |coords| {
                        let vector = WorldVector::new(coords.0, coords.1, coords.2);
                        if vector.norm() < 1e-3 {
                            None
                        } else {
                            Some(vector)
                        }
                    })
        }
    }

    mod ray {
        use super::*;
        use assert2::assert;

        #[test]
        fn direction_is_normalized() {
            let ray = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 3.0, 4.0));
            assert!((ray.direction.norm() - 1.0).abs() < 1e-12);
            assert!(ray.inv_direction.x == FloatType::INFINITY);
            assert!((ray.inv_direction.y - 1.0 / 0.6).abs() < 1e-9);
        }

        #[test]
        fn point_at_walks_along_direction() {
            let ray = Ray::new(WorldPoint::new(1.0, 2.0, 3.0), WorldVector::new(0.0, 0.0, 2.0));
            assert!(ray.point_at(5.0) == WorldPoint::new(1.0, 2.0, 8.0));
        }

        #[test]
        fn range_limits_distance() {
            let ray = Ray::new(WorldPoint::origin(), WorldVector::x()).with_range(1.0, 2.0);
            assert!(!ray.contains_distance(0.5));
            assert!(ray.contains_distance(1.5));
            assert!(!ray.contains_distance(2.5));
        }
    }
}
