use std::sync::Arc;

use anyhow::Result;
use assert2::{assert, let_assert};
use miniprim::{
    MeshError, ObjectGroup, PrimitiveSet as _,
    geometry::{Ray, Triangle, WorldBox, WorldPoint, WorldVector},
    mesh::Mesh,
    scene::{ObjectIdx, SurfaceInstance, VolumeInstance},
};

/// Unit triangle at z = 0 moving by one unit along +z over the shutter interval.
fn moving_triangle() -> Result<Mesh> {
    let mut mesh = Mesh::new();
    mesh.allocate_positions(3).copy_from_slice(&[
        WorldPoint::new(0.0, 0.0, 0.0),
        WorldPoint::new(1.0, 0.0, 0.0),
        WorldPoint::new(0.0, 1.0, 0.0),
    ]);
    mesh.allocate_velocities(3).fill(WorldVector::new(0.0, 0.0, 1.0));
    mesh.allocate_faces(1)[0] = Triangle::new(0u32.into(), 1u32.into(), 2u32.into());
    mesh.compute_bounds();
    mesh.validate()?;
    Ok(mesh)
}

#[test]
fn motion_blurred_mesh_in_group() -> Result<()> {
    let mesh = Arc::new(moving_triangle()?);
    assert!(
        mesh.total_bounds() == WorldBox::new(WorldPoint::new(0.0, 0.0, 0.0), WorldPoint::new(1.0, 1.0, 1.0))
    );

    let mut group = ObjectGroup::new();
    group.add(Arc::new(SurfaceInstance::new(mesh.clone())));
    group.add(Arc::new(VolumeInstance::new(WorldBox::new(
        WorldPoint::new(-1.0, -1.0, -4.0),
        WorldPoint::new(2.0, 2.0, -2.0),
    ))));

    let ray = Ray::new(WorldPoint::new(0.25, 0.25, -10.0), WorldVector::z());

    let_assert!(Some(hit) = group.intersect(0.0, &ray));
    assert!((hit.t_hit - 10.0).abs() < 1e-9);
    assert!(hit.object == Some(ObjectIdx::from_usize(0)));

    let_assert!(Some(hit) = group.intersect(1.0, &ray));
    assert!((hit.t_hit - 11.0).abs() < 1e-9);
    assert!((hit.point - WorldPoint::new(0.25, 0.25, 1.0)).norm() < 1e-9);

    let intervals = group.volume_intersect(0.5, &ray);
    assert!(intervals.len() == 1);
    assert!((intervals[0].t_min - 6.0).abs() < 1e-9);
    assert!((intervals[0].t_max - 8.0).abs() < 1e-9);

    let shadow = ray.with_range(0.0, 9.0);
    assert!(!group.intersects(0.0, &shadow));

    Ok(())
}

#[test]
fn broken_mesh_is_rejected() {
    let mut mesh = Mesh::new();
    mesh.allocate_positions(2);
    mesh.allocate_faces(1)[0] = Triangle::new(0u32.into(), 1u32.into(), 5u32.into());

    let_assert!(Err(MeshError::FaceIndexOutOfRange { face, vertex, vertex_count }) = mesh.validate());
    assert!(face == 0);
    assert!(vertex == 5);
    assert!(vertex_count == 2);
}
