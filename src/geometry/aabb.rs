use num_traits::One;
use std::ops::Sub;

use nalgebra::{ClosedAddAssign, ClosedDivAssign, Point, Scalar};

use super::{FloatType, WorldPoint, WorldVector};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AABB<Point> {
    pub min: Point,
    pub max: Point,
}

impl<Point> AABB<Point> {
    pub fn new(min: Point, max: Point) -> AABB<Point> {
        AABB { min, max }
    }

    pub fn map<Point2, F: FnMut(&Point) -> Point2>(&self, mut f: F) -> AABB<Point2> {
        AABB {
            min: f(&self.min),
            max: f(&self.max),
        }
    }

    pub fn zip_map<Point2, Point3, F: FnMut(&Point, &Point2) -> Point3>(
        &self,
        rhs: &AABB<Point2>,
        mut f: F,
    ) -> AABB<Point3> {
        AABB {
            min: f(&self.min, &rhs.min),
            max: f(&self.max, &rhs.max),
        }
    }
}

impl<Point: Sub + Copy> AABB<Point> {
    pub fn size(&self) -> Point::Output {
        self.max - self.min
    }
}

impl<T: Scalar + ClosedAddAssign + ClosedDivAssign + One, const D: usize> AABB<Point<T, D>> {
    pub fn center(&self) -> Point<T, D> {
        let two = T::one() + T::one();
        let avg_coords = (&self.min.coords + &self.max.coords) / two;
        Point::from(avg_coords)
    }
}

impl<Point> From<[Point; 2]> for AABB<Point> {
    fn from(value: [Point; 2]) -> Self {
        let [min, max] = value;
        AABB { min, max }
    }
}

impl<Point> From<(Point, Point)> for AABB<Point> {
    fn from(value: (Point, Point)) -> Self {
        let (min, max) = value;
        AABB { min, max }
    }
}

impl AABB<WorldPoint> {
    /// Reversed box covering nothing (min > max on every axis).
    /// Adding anything to it yields exactly the added geometry.
    pub fn empty() -> Self {
        AABB {
            min: WorldPoint::from(WorldVector::repeat(FloatType::MAX)),
            max: WorldPoint::from(WorldVector::repeat(-FloatType::MAX)),
        }
    }

    pub fn from_point(point: WorldPoint) -> Self {
        AABB {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing all points, None if the iterator is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a WorldPoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut ret = Self::from_point(*first);
        for point in points {
            ret.add_point(point);
        }
        Some(ret)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn add_point(&mut self, point: &WorldPoint) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn add_box(&mut self, other: &Self) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut ret = self.clone();
        ret.add_box(other);
        ret
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// Containment with an absolute tolerance on every side.
    pub fn contains_point_approx(&self, point: &WorldPoint, tolerance: FloatType) -> bool {
        (0..3).all(|i| self.min[i] - tolerance <= point[i] && point[i] <= self.max[i] + tolerance)
    }

    pub fn contains_box(&self, other: &Self) -> bool {
        other.is_empty() || (self.contains_point(&other.min) && self.contains_point(&other.max))
    }
}
