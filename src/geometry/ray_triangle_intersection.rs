use super::{BarycentricCoordinates, EPSILON, FloatType, Ray, Triangle, WorldPoint};

impl Triangle<WorldPoint> {
    /// Calculates ray intersection with the (two sided) triangle.
    /// Returns distance along ray and barycentric uv coordinates of the hit, if the hit
    /// lies within the ray's distance range.
    /// Degenerate triangles and rays parallel to the triangle plane never hit.
    /// Adapted from https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm#Rust_implementation
    pub fn intersect(&self, ray: &Ray) -> Option<(FloatType, BarycentricCoordinates<FloatType>)> {
        let [e1, e2] = self.edges();

        let ray_cross_e2 = ray.direction.cross(&e2);
        let det = e1.dot(&ray_cross_e2);

        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - self[0];
        let u = inv_det * s.dot(&ray_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let s_cross_e1 = s.cross(&e1);
        let v = inv_det * ray.direction.dot(&s_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * e2.dot(&s_cross_e1);
        if !ray.contains_distance(t) {
            return None;
        }

        Some((t, BarycentricCoordinates { u, v }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WorldVector;
    use assert2::{assert, let_assert};
    use test_case::test_case;

    fn unit_triangle() -> Triangle<WorldPoint> {
        Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(1.0, 0.0, 0.0),
            WorldPoint::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn front_hit() {
        let ray = Ray::new(WorldPoint::new(0.25, 0.5, -2.0), WorldVector::new(0.0, 0.0, 1.0));
        let_assert!(Some((t, uv)) = unit_triangle().intersect(&ray));
        assert!((t - 2.0).abs() < 1e-12);
        assert!((uv.u - 0.25).abs() < 1e-12);
        assert!((uv.v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn back_hit_is_not_culled() {
        let ray = Ray::new(WorldPoint::new(0.25, 0.25, 3.0), WorldVector::new(0.0, 0.0, -1.0));
        let_assert!(Some((t, _)) = unit_triangle().intersect(&ray));
        assert!((t - 3.0).abs() < 1e-12);
    }

    #[test_case(0.75, 0.75 ; "beyond hypotenuse")]
    #[test_case(-0.1, 0.5 ; "left of triangle")]
    #[test_case(0.5, -0.1 ; "below triangle")]
    fn outside_misses(x: FloatType, y: FloatType) {
        let ray = Ray::new(WorldPoint::new(x, y, -1.0), WorldVector::new(0.0, 0.0, 1.0));
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn behind_origin_misses() {
        let ray = Ray::new(WorldPoint::new(0.25, 0.25, 1.0), WorldVector::new(0.0, 0.0, 1.0));
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn out_of_range_misses() {
        let ray = Ray::new(WorldPoint::new(0.25, 0.25, -5.0), WorldVector::new(0.0, 0.0, 1.0))
            .with_range(0.0, 4.0);
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(WorldPoint::new(-1.0, 0.25, 0.0), WorldVector::new(1.0, 0.0, 0.0));
        assert!(unit_triangle().intersect(&ray).is_none());
    }

    #[test]
    fn degenerate_triangle_misses() {
        let triangle = Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(1.0, 1.0, 0.0),
            WorldPoint::new(2.0, 2.0, 0.0),
        );
        let ray = Ray::new(WorldPoint::new(1.0, 1.0, -1.0), WorldVector::new(0.0, 0.0, 1.0));
        assert!(triangle.intersect(&ray).is_none());
    }
}
