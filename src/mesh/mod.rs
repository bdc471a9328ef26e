mod primitive_set;

use index_vec::IndexVec;
use log::{debug, trace};
use thiserror::Error;

use crate::{
    geometry::{EPSILON, TexturePoint, Triangle, WorldBox, WorldPoint, WorldVector},
    util::Color,
};

index_vec::define_index_type! {
    pub struct VertexIdx = u32;
    IMPL_RAW_CONVERSIONS = true;
}

/// Per-vertex attribute kinds of a mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Normal,
    Color,
    TexCoord,
    Velocity,
}

/// Freshly (re)allocated backing storage of a vertex attribute.
#[derive(Debug)]
pub enum VertexAttributeMut<'a> {
    Position(&'a mut [WorldPoint]),
    Normal(&'a mut [WorldVector]),
    Color(&'a mut [Color]),
    TexCoord(&'a mut [TexturePoint]),
    /// Displacement per unit of shutter time
    Velocity(&'a mut [WorldVector]),
}

/// Indexed triangle mesh.
///
/// Positions are always present, the other vertex attributes are optional.
/// Every present vertex attribute has exactly `vertex_count()` elements.
/// Face indices are not checked against the vertex count on the hot paths, see [`Mesh::validate`].
#[derive(Clone, Debug)]
pub struct Mesh {
    positions: IndexVec<VertexIdx, WorldPoint>,
    normals: Option<IndexVec<VertexIdx, WorldVector>>,
    colors: Option<IndexVec<VertexIdx, Color>>,
    tex_coords: Option<IndexVec<VertexIdx, TexturePoint>>,
    velocities: Option<IndexVec<VertexIdx, WorldVector>>,

    faces: Vec<Triangle<VertexIdx>>,

    /// Cached by `compute_bounds`
    bounds: WorldBox,
}

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("Face {face} references vertex {vertex}, but the mesh has only {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("Vertex {vertex} has a non-finite position")]
    NonFinitePosition { vertex: usize },
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh {
            positions: IndexVec::new(),
            normals: None,
            colors: None,
            tex_coords: None,
            velocities: None,
            faces: Vec::new(),
            bounds: WorldBox::from_point(WorldPoint::origin()),
        }
    }

    /// Releases all attributes, leaving an empty mesh.
    pub fn clear(&mut self) {
        *self = Mesh::new();
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn has_attribute(&self, attribute: VertexAttribute) -> bool {
        match attribute {
            VertexAttribute::Position => true,
            VertexAttribute::Normal => self.normals.is_some(),
            VertexAttribute::Color => self.colors.is_some(),
            VertexAttribute::TexCoord => self.tex_coords.is_some(),
            VertexAttribute::Velocity => self.velocities.is_some(),
        }
    }

    /// Allocates (or reallocates) a vertex attribute for `vertex_count` vertices.
    ///
    /// All other present vertex attributes are resized to the same count, existing
    /// values are preserved and new elements are zeroed.
    pub fn allocate_vertex(
        &mut self,
        attribute: VertexAttribute,
        vertex_count: usize,
    ) -> VertexAttributeMut<'_> {
        match attribute {
            VertexAttribute::Position => {
                VertexAttributeMut::Position(self.allocate_positions(vertex_count))
            }
            VertexAttribute::Normal => {
                VertexAttributeMut::Normal(self.allocate_normals(vertex_count))
            }
            VertexAttribute::Color => VertexAttributeMut::Color(self.allocate_colors(vertex_count)),
            VertexAttribute::TexCoord => {
                VertexAttributeMut::TexCoord(self.allocate_tex_coords(vertex_count))
            }
            VertexAttribute::Velocity => {
                VertexAttributeMut::Velocity(self.allocate_velocities(vertex_count))
            }
        }
    }

    pub fn allocate_positions(&mut self, vertex_count: usize) -> &mut [WorldPoint] {
        self.resize_vertices(vertex_count, VertexAttribute::Position);
        self.positions.as_raw_slice_mut()
    }

    pub fn allocate_normals(&mut self, vertex_count: usize) -> &mut [WorldVector] {
        self.resize_vertices(vertex_count, VertexAttribute::Normal);
        allocate_attribute(&mut self.normals, vertex_count, WorldVector::zeros())
    }

    pub fn allocate_colors(&mut self, vertex_count: usize) -> &mut [Color] {
        self.resize_vertices(vertex_count, VertexAttribute::Color);
        allocate_attribute(&mut self.colors, vertex_count, Color::new(0.0, 0.0, 0.0))
    }

    pub fn allocate_tex_coords(&mut self, vertex_count: usize) -> &mut [TexturePoint] {
        self.resize_vertices(vertex_count, VertexAttribute::TexCoord);
        allocate_attribute(&mut self.tex_coords, vertex_count, TexturePoint::origin())
    }

    pub fn allocate_velocities(&mut self, vertex_count: usize) -> &mut [WorldVector] {
        self.resize_vertices(vertex_count, VertexAttribute::Velocity);
        allocate_attribute(&mut self.velocities, vertex_count, WorldVector::zeros())
    }

    /// Allocates (or reallocates) the face index array. New faces point at vertex 0.
    pub fn allocate_faces(&mut self, face_count: usize) -> &mut [Triangle<VertexIdx>] {
        debug!("Allocating {face_count} faces");
        let zero = VertexIdx::from_usize(0);
        self.faces.resize(face_count, Triangle::new(zero, zero, zero));
        &mut self.faces
    }

    fn resize_vertices(&mut self, vertex_count: usize, allocated: VertexAttribute) {
        debug!("Allocating {allocated:?} for {vertex_count} vertices");
        self.positions.resize(vertex_count, WorldPoint::origin());
        resize_attribute(&mut self.normals, vertex_count, WorldVector::zeros());
        resize_attribute(&mut self.colors, vertex_count, Color::new(0.0, 0.0, 0.0));
        resize_attribute(&mut self.tex_coords, vertex_count, TexturePoint::origin());
        resize_attribute(&mut self.velocities, vertex_count, WorldVector::zeros());
    }

    pub fn set_vertex_position(&mut self, index: usize, position: WorldPoint) {
        if let Some(slot) = self.positions.as_raw_slice_mut().get_mut(index) {
            *slot = position;
        }
    }

    pub fn set_vertex_normal(&mut self, index: usize, normal: WorldVector) {
        set_attribute(&mut self.normals, index, normal);
    }

    pub fn set_vertex_color(&mut self, index: usize, color: Color) {
        set_attribute(&mut self.colors, index, color);
    }

    pub fn set_vertex_tex_coord(&mut self, index: usize, tex_coord: TexturePoint) {
        set_attribute(&mut self.tex_coords, index, tex_coord);
    }

    pub fn set_vertex_velocity(&mut self, index: usize, velocity: WorldVector) {
        set_attribute(&mut self.velocities, index, velocity);
    }

    pub fn set_face_indices(&mut self, face: usize, indices: Triangle<VertexIdx>) {
        if let Some(slot) = self.faces.get_mut(face) {
            *slot = indices;
        }
    }

    pub fn positions(&self) -> &[WorldPoint] {
        self.positions.as_raw_slice()
    }

    pub fn normals(&self) -> Option<&[WorldVector]> {
        self.normals.as_ref().map(|n| n.as_raw_slice())
    }

    pub fn colors(&self) -> Option<&[Color]> {
        self.colors.as_ref().map(|c| c.as_raw_slice())
    }

    pub fn tex_coords(&self) -> Option<&[TexturePoint]> {
        self.tex_coords.as_ref().map(|t| t.as_raw_slice())
    }

    pub fn velocities(&self) -> Option<&[WorldVector]> {
        self.velocities.as_ref().map(|v| v.as_raw_slice())
    }

    pub fn faces(&self) -> &[Triangle<VertexIdx>] {
        &self.faces
    }

    // The getters below panic on indices out of range.

    pub fn vertex_position(&self, index: VertexIdx) -> WorldPoint {
        self.positions[index]
    }

    pub fn vertex_normal(&self, index: VertexIdx) -> Option<WorldVector> {
        self.normals.as_ref().map(|n| n[index])
    }

    pub fn vertex_color(&self, index: VertexIdx) -> Option<Color> {
        self.colors.as_ref().map(|c| c[index])
    }

    pub fn vertex_tex_coord(&self, index: VertexIdx) -> Option<TexturePoint> {
        self.tex_coords.as_ref().map(|t| t[index])
    }

    pub fn vertex_velocity(&self, index: VertexIdx) -> Option<WorldVector> {
        self.velocities.as_ref().map(|v| v[index])
    }

    pub fn face_indices(&self, face: usize) -> Triangle<VertexIdx> {
        self.faces[face]
    }

    pub fn face_vertex_positions(&self, face: usize) -> Triangle<WorldPoint> {
        self.faces[face].map(|i| self.positions[*i])
    }

    pub fn face_vertex_normals(&self, face: usize) -> Option<Triangle<WorldVector>> {
        let normals = self.normals.as_ref()?;
        Some(self.faces[face].map(|i| normals[*i]))
    }

    pub fn face_vertex_tex_coords(&self, face: usize) -> Option<Triangle<TexturePoint>> {
        let tex_coords = self.tex_coords.as_ref()?;
        Some(self.faces[face].map(|i| tex_coords[*i]))
    }

    pub fn face_vertex_velocities(&self, face: usize) -> Option<Triangle<WorldVector>> {
        let velocities = self.velocities.as_ref()?;
        Some(self.faces[face].map(|i| velocities[*i]))
    }

    /// Recalculates the cached bounding box from all faces, including their motion.
    /// The cached box is returned as the primitive set's total bounds.
    pub fn compute_bounds(&mut self) {
        let mut bounds = WorldBox::empty();
        for face in 0..self.face_count() {
            bounds.add_box(&self.face_bounds(face));
        }
        trace!("Mesh bounds: {:?} - {:?}", bounds.min, bounds.max);
        self.bounds = bounds;
    }

    /// Replaces vertex normals with averages of the adjacent faces' normals.
    ///
    /// Every face contributes equally to each of its vertices, regardless of its
    /// area or its angle at the vertex. Degenerate faces don't contribute, vertices
    /// that are not used by any face end up with a zero normal.
    pub fn compute_normals(&mut self) {
        if self.vertex_count() == 0 {
            return;
        }

        let mut normals = IndexVec::from_vec(vec![WorldVector::zeros(); self.vertex_count()]);
        for face in 0..self.face_count() {
            let Some(face_normal) = self.face_vertex_positions(face).normal().try_normalize(EPSILON)
            else {
                continue;
            };
            for i in self.faces[face].iter() {
                normals[*i] += face_normal;
            }
        }
        for normal in normals.iter_mut() {
            *normal = normal.try_normalize(EPSILON).unwrap_or_else(WorldVector::zeros);
        }

        debug!("Computed normals for {} vertices", normals.len());
        self.normals = Some(normals);
    }

    /// Checks that all face indices point at existing vertices and that all positions are finite.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(vertex) = indices.iter().map(|i| i.index()).find(|i| *i >= vertex_count) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }

        if let Some(vertex) = self
            .positions
            .iter()
            .position(|p| !p.coords.iter().all(|x| x.is_finite()))
        {
            return Err(MeshError::NonFinitePosition { vertex });
        }

        Ok(())
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

fn resize_attribute<T: Clone>(
    attribute: &mut Option<IndexVec<VertexIdx, T>>,
    vertex_count: usize,
    zero: T,
) {
    if let Some(values) = attribute {
        values.resize(vertex_count, zero);
    }
}

fn allocate_attribute<T: Clone>(
    attribute: &mut Option<IndexVec<VertexIdx, T>>,
    vertex_count: usize,
    zero: T,
) -> &mut [T] {
    attribute
        .get_or_insert_with(|| IndexVec::from_vec(vec![zero; vertex_count]))
        .as_raw_slice_mut()
}

fn set_attribute<T>(attribute: &mut Option<IndexVec<VertexIdx, T>>, index: usize, value: T) {
    if let Some(slot) = attribute
        .as_mut()
        .and_then(|values| values.as_raw_slice_mut().get_mut(index))
    {
        *slot = value;
    }
}
