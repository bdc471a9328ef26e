pub mod accelerator;
pub mod geometry;
pub mod mesh;
pub mod noise;
pub mod primitive_set;
pub mod scene;
pub mod turbulence;
pub mod util;

pub use accelerator::{Accelerator, VolumeAccelerator};
pub use mesh::{Mesh, MeshError};
pub use primitive_set::PrimitiveSet;
pub use scene::{ObjectGroup, ObjectList, SceneObject};
pub use turbulence::Turbulence;
