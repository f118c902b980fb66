// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The randomized incremental hull driver: seeds a tetrahedron, then
//! inserts the remaining points one at a time, each insertion excising
//! the visible cap and re-triangulating against the horizon.

mod horizon;
mod init;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::conflict::ConflictGraph;
use crate::error::HullError;
use crate::math::{self, Point3};
use crate::mesh::{FaceId, MeshConnectivity, VertexId};
use crate::query::Hull;

/// Builds the convex hull of `points`.
///
/// `points` must contain at least four entries in general position. With
/// `seed` set, the insertion order is a deterministic function of the
/// seed; without one, a fresh source of randomness is used and two calls
/// on the same input may walk the points in different orders (though the
/// resulting hull's geometry is the same either way).
pub fn build(points: &[Point3], seed: Option<u64>) -> Result<Hull, HullError> {
    if points.len() < 4 {
        return Err(HullError::InsufficientPoints(points.len()));
    }
    log::debug!("building hull over {} points, seed = {:?}", points.len(), seed);

    let mut order: Vec<Point3> = points.to_vec();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    order.shuffle(&mut rng);

    let eps = math::adaptive_epsilon(&order);
    log::trace!("adaptive epsilon for this input is {:e}", eps);

    let mut mesh = MeshConnectivity::new();
    let mut conflict = ConflictGraph::new();

    let seed_verts: Vec<VertexId> = order[0..4].iter().map(|&p| mesh.alloc_vertex(p)).collect();
    let seed_positions = [order[0], order[1], order[2], order[3]];
    let seed_verts = [seed_verts[0], seed_verts[1], seed_verts[2], seed_verts[3]];

    let seed_faces =
        match init::build_seed_tetrahedron(&mut mesh, seed_verts, seed_positions, &order) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("rejecting input: {e}");
                return Err(e);
            }
        };

    // Seed the conflict graph: every remaining point is tested against
    // the four tetrahedron faces in turn, attaching to the first that
    // sees it. Points classified interior here never receive a forward
    // entry and are skipped once their turn in the insertion loop comes.
    let mut remaining = Vec::with_capacity(order.len() - 4);
    for &p in &order[4..] {
        let v = mesh.alloc_vertex(p);
        attach_to_first_visible(&mesh, &mut conflict, &seed_faces, v, p, eps);
        remaining.push(v);
    }

    // Drive insertion in the same randomized order the points were
    // allocated in.
    for v in remaining {
        insert_point(&mut mesh, &mut conflict, v, eps);
    }

    log::debug!(
        "hull complete: {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(Hull::new(mesh))
}

fn attach_to_first_visible(
    mesh: &MeshConnectivity,
    conflict: &mut ConflictGraph,
    faces: &[FaceId],
    v: VertexId,
    p: Point3,
    eps: f64,
) {
    for &f in faces {
        let tri = mesh.face_vertices(f).map(|id| mesh.vertex_position(id));
        let normal = math::raw_normal(tri[0], tri[1], tri[2]);
        if math::is_visible(tri[0], normal, p, eps) {
            conflict.attach(v, f);
            return;
        }
    }
    // Not seen by any candidate face: stays interior (no forward entry).
}

/// Inserts a single already-allocated vertex into the hull, per the
/// driver's per-point state machine: interior points are a no-op, and
/// exterior points excise their visible cap and re-stitch a fan.
fn insert_point(mesh: &mut MeshConnectivity, conflict: &mut ConflictGraph, v: VertexId, eps: f64) {
    let Some(seed_face) = conflict.conflict_face(v) else {
        // Already interior: nothing to do, the vertex simply isn't
        // referenced by any face.
        return;
    };

    let apex = mesh.vertex_position(v);
    let result = horizon::search_horizon(mesh, conflict, seed_face, apex, eps);
    log::trace!(
        "inserting point: cap of {} faces, horizon of {} edges",
        result.removed.len(),
        result.horizon.len()
    );

    for f in result.removed {
        mesh.remove_face(f);
    }

    let mut new_faces = Vec::with_capacity(result.horizon.len());
    for (a, b) in result.horizon {
        let face = mesh
            .create_face(&[a, b, v])
            .expect("horizon edges always come in triples of three distinct vertices");
        new_faces.push(face);
    }

    // Redistribute displaced points: each sees the first new face (in
    // creation order) whose plane it's strictly outside of; points that
    // see none of the new faces have become interior.
    for q in result.displaced {
        let qp = mesh.vertex_position(q);
        attach_to_first_visible(mesh, conflict, &new_faces, q, qp, eps);
    }
}
