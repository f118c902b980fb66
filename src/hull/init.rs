// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seeds the mesh with an oriented tetrahedron from the first four points
//! of the (already randomized) input sequence.

use crate::error::HullError;
use crate::math::{self, Point3};
use crate::mesh::{FaceId, MeshConnectivity, VertexId};

/// Squared-normal floor below which the four seed points are treated as
/// coplanar (or collinear). Scaled the same way as the visibility
/// epsilon, but squared because it's compared against a squared length.
fn degenerate_floor(points: &[Point3]) -> f64 {
    let eps = math::adaptive_epsilon(points);
    eps * eps
}

/// Builds the four faces of the seed tetrahedron over `verts`, whose
/// positions are `positions` in the same order. Every face's outward
/// normal points away from the tetrahedron's centroid, per the face
/// orientation helper in `math`.
///
/// `all_points` is passed only to scale the degeneracy check to the
/// magnitude of the whole input, not just these four points.
pub fn build_seed_tetrahedron(
    mesh: &mut MeshConnectivity,
    verts: [VertexId; 4],
    positions: [Point3; 4],
    all_points: &[Point3],
) -> Result<[FaceId; 4], HullError> {
    let normal = math::raw_normal(positions[0], positions[1], positions[2]);
    if normal.length_squared() < degenerate_floor(all_points) {
        return Err(HullError::DegenerateInput);
    }

    let centroid = (positions[0] + positions[1] + positions[2] + positions[3]) / 4.0;

    // The four triangles of a tetrahedron, each omitting one vertex. Listed
    // in an arbitrary base order; `orient_away_from` fixes the winding of
    // each individually, so the order given here doesn't matter.
    let triangles = [
        [verts[1], verts[2], verts[3]],
        [verts[0], verts[3], verts[2]],
        [verts[0], verts[1], verts[3]],
        [verts[0], verts[2], verts[1]],
    ];
    let mut faces = [FaceId::default(); 4];
    for (i, ids) in triangles.into_iter().enumerate() {
        let ids_positions = positions_of(mesh, ids);
        let oriented_positions = math::orient_away_from(ids_positions, centroid);
        let oriented_ids = reorder_by_position(ids, ids_positions, oriented_positions);
        faces[i] = mesh.create_face(&oriented_ids)?;
    }

    Ok(faces)
}

fn positions_of(mesh: &MeshConnectivity, ids: [VertexId; 3]) -> [Point3; 3] {
    ids.map(|v| mesh.vertex_position(v))
}

/// `orient_away_from` tells us the correct order of *positions*; this maps
/// that back onto the corresponding vertex handles; `original` and
/// `original_positions` are index-aligned.
fn reorder_by_position(
    original: [VertexId; 3],
    original_positions: [Point3; 3],
    oriented_positions: [Point3; 3],
) -> [VertexId; 3] {
    if oriented_positions == original_positions {
        original
    } else {
        // `orient_away_from` only ever swaps the last two entries.
        [original[0], original[2], original[1]]
    }
}
