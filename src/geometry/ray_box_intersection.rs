use super::{FloatType, Ray, WorldBox};

pub trait RayIntersectionExt {
    /// Calculate first and last ray intersection with the box
    fn intersect(&self, ray: &Ray) -> Option<(FloatType, FloatType)>;
}

impl RayIntersectionExt for WorldBox {
    /// Calculates ray intersection with the box, using the slab method.
    /// Returns minimum and maximum distance along the ray, clipped to the ray's range.
    fn intersect(&self, ray: &Ray) -> Option<(FloatType, FloatType)> {
        if self.is_empty() {
            return None;
        }

        // Componentwise distances along the ray to the box's min and max corners
        // The multiplication is NAN if the ray is starting inside the slab bounding plane
        // and is parallel to it. In this case we replace with +-infinity, so that the range becomes infinite
        let to_box_min = (self.min - ray.origin)
            .component_mul(&ray.inv_direction)
            .map(|x| if x.is_nan() { FloatType::NEG_INFINITY } else { x });
        let to_box_max = (self.max - ray.origin)
            .component_mul(&ray.inv_direction)
            .map(|x| if x.is_nan() { FloatType::INFINITY } else { x });

        // Correctly ordered (min_t <= max_t)
        let componentwise_min_t = to_box_min.inf(&to_box_max);
        let componentwise_max_t = to_box_min.sup(&to_box_max);

        let min_t = componentwise_min_t.max().max(ray.t_min);
        let max_t = componentwise_max_t.min().min(ray.t_max);

        if min_t <= max_t {
            Some((min_t, max_t))
        } else {
            None
        }
    }
}

#[cfg(test)]
pub mod test {
    use assert2::assert;
    use test_case::{test_case, test_matrix};

    use super::*;

    use crate::geometry::{WorldBox, WorldPoint, WorldVector};

    /// Checks cases when the ray hits the box, including some corner cases.
    #[test_matrix(
        [5.0, 7.0, 10.0],
        [5.0, 7.0, 10.0],
        [5.0, 7.0, 10.0],
        [-1.0, 0.0, 2.0],
        [-1.0, 0.0, 2.0],
        [-1.0, 0.0, 2.0],
        [-10.0, -1.0, 0.0, 2.0, 5.0, 20.0]
    )]
    fn hit(
        px: FloatType,
        py: FloatType,
        pz: FloatType,
        dx: FloatType,
        dy: FloatType,
        dz: FloatType,
        origin_pos: FloatType,
    ) {
        if dx == 0.0 && dy == 0.0 && dz == 0.0 {
            return;
        }

        const TOLERANCE: FloatType = 1e-9;
        let b = WorldBox::new([5.0, 5.0, 5.0].into(), [10.0, 10.0, 10.0].into());
        // Rays touching only a corner or an edge may miss the exact box due to rounding
        let b_padded = WorldBox::new(
            b.min - WorldVector::repeat(TOLERANCE),
            b.max + WorldVector::repeat(TOLERANCE),
        );

        let p = WorldPoint::new(px, py, pz);
        let d = WorldVector::new(dx, dy, dz);
        let temp_r = Ray::new(p, d);
        let origin = temp_r.point_at(origin_pos);
        let r = Ray::new(origin, d).with_range(FloatType::NEG_INFINITY, FloatType::INFINITY);

        let (t1, t2) = b_padded
            .intersect(&r)
            .expect("The ray passes through a point on the box, we should always have an intersection");

        let p1 = r.point_at(t1);
        let p2 = r.point_at(t2);

        assert!(b.contains_point_approx(&p1, 1e-6), "{p1:?} must be in {b:?}");
        assert!(b.contains_point_approx(&p2, 1e-6), "{p2:?} must be in {b:?}");
    }

    /// Just a manual example of ray grazing along an edge.
    #[test]
    fn hit_along_edge() {
        let b = WorldBox::new([5.0, 5.0, 5.0].into(), [10.0, 10.0, 10.0].into());

        let r = Ray::new(
            WorldPoint::new(5.0, 5.0, 0.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );

        assert!(b.intersect(&r) == Some((5.0, 10.0)))
    }

    #[test]
    fn range_clips_result() {
        let b = WorldBox::new([5.0, 5.0, 5.0].into(), [10.0, 10.0, 10.0].into());
        let r = Ray::new(WorldPoint::new(7.0, 7.0, 0.0), WorldVector::new(0.0, 0.0, 1.0))
            .with_range(6.0, 8.0);
        assert!(b.intersect(&r) == Some((6.0, 8.0)));

        let r = r.with_range(0.0, 4.0);
        assert!(b.intersect(&r) == None);
    }

    /// Rays that lie parallel to one axis and start outside the corresponding slab
    /// must miss, even if they move toward the box on other axes or remain unchanged.
    #[test_case( 0.0,  7.0,  7.0,   0.0, 1.0, 0.0 ; "low_x_parallel_miss")]
    #[test_case(12.0,  7.0,  7.0,   0.0, 1.0, 0.0 ; "high_x_parallel_miss")]
    #[test_case( 7.0,  0.0,  7.0,   1.0, 0.0, 0.0 ; "low_y_parallel_miss")]
    #[test_case( 7.0, 12.0,  7.0,   1.0, 0.0, 0.0 ; "high_y_parallel_miss")]
    #[test_case( 7.0,  7.0,  0.0,   1.0, 0.0, 0.0 ; "low_z_parallel_miss")]
    #[test_case( 7.0,  7.0, 12.0,   1.0, 0.0, 0.0 ; "high_z_parallel_miss")]
    #[test_case( 0.0,  0.0,  0.0,  -1.0, 1.0, 1.0 ; "corner_miss")]
    fn only_misses(
        px: FloatType,
        py: FloatType,
        pz: FloatType,
        dx: FloatType,
        dy: FloatType,
        dz: FloatType,
    ) {
        let b = WorldBox::new([5.0, 5.0, 5.0].into(), [10.0, 10.0, 10.0].into());

        let r = Ray::new(WorldPoint::new(px, py, pz), WorldVector::new(dx, dy, dz))
            .with_range(FloatType::NEG_INFINITY, FloatType::INFINITY);

        assert!(b.intersect(&r) == None);
    }

    #[test]
    fn empty_box_never_hits() {
        let r = Ray::new(WorldPoint::origin(), WorldVector::new(1.0, 1.0, 1.0));
        assert!(WorldBox::empty().intersect(&r) == None);
    }
}
