use std::ops::{Add, Index, IndexMut, Mul, Sub};

use num_traits::One;

use super::{AABB, FloatType, TexturePoint, WorldBox, WorldPoint, WorldVector};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Triangle<Point>([Point; 3]);

impl<Point> Triangle<Point> {
    pub fn new(a: Point, b: Point, c: Point) -> Triangle<Point> {
        Triangle([a, b, c])
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Point> {
        self.0.iter()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        3
    }
}

impl<Point: Default> Default for Triangle<Point> {
    fn default() -> Self {
        Triangle([Default::default(), Default::default(), Default::default()])
    }
}

impl<Point> From<[Point; 3]> for Triangle<Point> {
    fn from(value: [Point; 3]) -> Self {
        Triangle(value)
    }
}

impl<Point> Index<usize> for Triangle<Point> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<Point> IndexMut<usize> for Triangle<Point> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<Point> Triangle<Point> {
    pub fn map<Point2, F: FnMut(&Point) -> Point2>(&self, mut f: F) -> Triangle<Point2> {
        Triangle([f(&self[0]), f(&self[1]), f(&self[2])])
    }

    pub fn zip_map<Point2, Point3, F: FnMut(&Point, &Point2) -> Point3>(
        &self,
        rhs: &Triangle<Point2>,
        mut f: F,
    ) -> Triangle<Point3> {
        Triangle([
            f(&self.0[0], &rhs.0[0]),
            f(&self.0[1], &rhs.0[1]),
            f(&self.0[2], &rhs.0[2]),
        ])
    }
}

impl Triangle<WorldPoint> {
    /// Returns edge vectors, coming from self[0]
    pub fn edges(&self) -> [WorldVector; 2] {
        [self.0[1] - self.0[0], self.0[2] - self.0[0]]
    }

    /// Returns a normal vector of the triangle, not normalized.
    /// Its length is twice the triangle area.
    pub fn normal(&self) -> WorldVector {
        let [e1, e2] = self.edges();
        e1.cross(&e2)
    }

    pub fn area(&self) -> FloatType {
        self.normal().norm() / 2.0
    }

    pub fn bounds(&self) -> WorldBox {
        let mut ret = AABB::from_point(self.0[0]);
        ret.add_point(&self.0[1]);
        ret.add_point(&self.0[2]);
        ret
    }

    /// Triangle with every vertex moved by `time * velocity`.
    pub fn displaced(&self, velocity: &Triangle<WorldVector>, time: FloatType) -> Self {
        self.zip_map(velocity, |p, v| p + v * time)
    }

    /// Partial derivatives of the surface position with respect to texture coordinates.
    /// Returns zero vectors when the texture mapping is degenerate.
    pub fn derivatives(&self, uv: &Triangle<TexturePoint>) -> (WorldVector, WorldVector) {
        let [dp1, dp2] = self.edges();
        let duv1 = uv[1] - uv[0];
        let duv2 = uv[2] - uv[0];

        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if det == 0.0 {
            return (WorldVector::zeros(), WorldVector::zeros());
        }
        let inv_det = 1.0 / det;

        let dp_du = (dp1 * duv2.y - dp2 * duv1.y) * inv_det;
        let dp_dv = (dp2 * duv1.x - dp1 * duv2.x) * inv_det;
        (dp_du, dp_dv)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BarycentricCoordinates<T> {
    pub u: T,
    pub v: T,
}

impl<T> BarycentricCoordinates<T>
where
    T: One + Copy + Sub<Output = T>,
{
    pub fn interpolate<T2>(&self, a: &T2, b: &T2, c: &T2) -> T2
    where
        for<'a> &'a T2: Mul<T, Output = T2>,
        T2: Add<Output = T2>,
    {
        let w = T::one() - self.u - self.v;
        a * w + b * self.u + c * self.v
    }

    pub fn interpolate_triangle<T2>(&self, triangle: &Triangle<T2>) -> T2
    where
        for<'a> &'a T2: Mul<T, Output = T2>,
        T2: Add<Output = T2>,
    {
        self.interpolate(&triangle[0], &triangle[1], &triangle[2])
    }
}
