use nalgebra::Unit;

use super::Mesh;
use crate::{
    geometry::{
        BarycentricCoordinates, EPSILON, FloatType, Intersection, Ray, TexturePoint, Triangle,
        WorldBox, WorldPoint, WorldVector,
    },
    primitive_set::PrimitiveSet,
};

/// Every face of the mesh is one primitive.
///
/// Vertices with velocity are displaced linearly, by `time * velocity`.
/// Shading data (normals, texture coordinates, derivatives) always comes from the
/// undisplaced mesh, the normal at the moving position is not reconstructed.
impl PrimitiveSet for Mesh {
    type Hit = Intersection;

    fn name(&self) -> &'static str {
        "Mesh"
    }

    fn count(&self) -> usize {
        self.face_count()
    }

    fn bounds(&self, id: usize) -> WorldBox {
        self.face_bounds(id)
    }

    fn total_bounds(&self) -> WorldBox {
        self.bounds.clone()
    }

    fn intersect(&self, id: usize, time: FloatType, ray: &Ray) -> Option<Intersection> {
        let (positions, t_hit, uv) = self.intersect_face(id, time, ray)?;

        let normal = self
            .face_vertex_normals(id)
            .and_then(|normals| Unit::try_new(uv.interpolate_triangle(&normals), EPSILON))
            .or_else(|| Unit::try_new(positions.normal(), EPSILON))
            .unwrap_or_else(WorldVector::z_axis);

        let (tex_coord, dp_du, dp_dv) = match self.face_vertex_tex_coords(id) {
            Some(tex_coords) => {
                let tex_coord = uv.interpolate_triangle(&tex_coords.map(|t| t.coords));
                let (dp_du, dp_dv) = positions.derivatives(&tex_coords);
                (TexturePoint::from(tex_coord), dp_du, dp_dv)
            }
            None => (
                TexturePoint::origin(),
                WorldVector::zeros(),
                WorldVector::zeros(),
            ),
        };

        Some(Intersection {
            t_hit,
            point: ray.point_at(t_hit),
            normal,
            uv: tex_coord,
            dp_du,
            dp_dv,
            primitive_id: id,
            object: None,
        })
    }

    fn intersects(&self, id: usize, time: FloatType, ray: &Ray) -> bool {
        self.intersect_face(id, time, ray).is_some()
    }
}

impl Mesh {
    /// Box of the face over the whole shutter interval, time 0 to 1.
    pub(super) fn face_bounds(&self, face: usize) -> WorldBox {
        let positions = self.face_vertex_positions(face);
        let mut bounds = positions.bounds();
        if let Some(velocities) = self.face_vertex_velocities(face) {
            positions
                .displaced(&velocities, 1.0)
                .iter()
                .for_each(|p| bounds.add_point(p));
        }
        bounds
    }

    /// Intersects the face at its position at `time`.
    /// Returns the undisplaced face positions along with the hit.
    fn intersect_face(
        &self,
        face: usize,
        time: FloatType,
        ray: &Ray,
    ) -> Option<(Triangle<WorldPoint>, FloatType, BarycentricCoordinates<FloatType>)> {
        let positions = self.face_vertex_positions(face);
        let (t, uv) = match self.face_vertex_velocities(face) {
            Some(velocities) => positions.displaced(&velocities, time).intersect(ray)?,
            None => positions.intersect(ray)?,
        };
        Some((positions, t, uv))
    }
}
