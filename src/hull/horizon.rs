// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Breadth-first search over the region of the hull visible from a newly
//! inserted point, collecting the horizon (the silhouette separating
//! visible faces from the rest) and the faces to excise.

use std::collections::{HashSet, VecDeque};

use crate::conflict::ConflictGraph;
use crate::math::{self, Point3};
use crate::mesh::{FaceId, MeshConnectivity, VertexId};
use crate::util::SVec;

/// The outcome of a horizon search: the boundary edges of the visible
/// cap (each as the `(start, end)` vertex pair of the half-edge that
/// bounded the now-removed face), the points displaced from the removed
/// faces' conflict lists, and the faces that were excised.
pub struct HorizonResult {
    pub horizon: Vec<(VertexId, VertexId)>,
    pub displaced: SVec<VertexId>,
    pub removed: Vec<FaceId>,
}

fn face_visible(mesh: &MeshConnectivity, face: FaceId, apex: Point3, eps: f64) -> bool {
    let tri = mesh.face_vertices(face).map(|v| mesh.vertex_position(v));
    let normal = math::raw_normal(tri[0], tri[1], tri[2]);
    math::is_visible(tri[0], normal, apex, eps)
}

/// `seed_face` must already be known visible to `apex`; that's the
/// caller's job (it's the point's recorded conflict face). Every face
/// reached by this search is connected to `seed_face` through mutually
/// visible neighbors, which on a convex polytope boundary covers the
/// entire visible cap.
///
/// Every face this BFS dequeues is, by construction, visible and
/// therefore part of the cap being excised — whether it ends up
/// contributing a horizon edge or turns out to be fully interior to the
/// visible region doesn't change that it's scheduled for removal. This
/// search takes advantage of that to schedule each face for removal the
/// moment it's dequeued, rather than tracking a per-face count of
/// already-visible neighbors to detect the fully-interior case
/// separately; the resulting removal set is identical either way.
pub fn search_horizon(
    mesh: &MeshConnectivity,
    conflict: &mut ConflictGraph,
    seed_face: FaceId,
    apex: Point3,
    eps: f64,
) -> HorizonResult {
    let mut queue = VecDeque::new();
    let mut enqueued = HashSet::new();
    let mut removed = Vec::new();
    let mut horizon = Vec::new();
    let mut displaced = SVec::new();

    queue.push_back(seed_face);
    enqueued.insert(seed_face);

    while let Some(f) = queue.pop_front() {
        removed.push(f);
        displaced.extend(conflict.take_face_conflicts(f));

        for e in mesh.face_edges(f) {
            let twin = mesh[e].twin;
            let neighbor = twin.and_then(|t| mesh[t].face);

            let neighbor_visible = neighbor.map_or(false, |g| face_visible(mesh, g, apex, eps));

            match neighbor {
                None => {
                    horizon.push((mesh[e].start, mesh[e].end));
                }
                Some(_) if !neighbor_visible => {
                    horizon.push((mesh[e].start, mesh[e].end));
                }
                Some(g) => {
                    if enqueued.insert(g) {
                        queue.push_back(g);
                    }
                }
            }
        }
    }

    HorizonResult {
        horizon,
        displaced,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_of_a_single_exposed_face_is_its_own_boundary() {
        // A tetrahedron where the apex sees exactly one face: the horizon
        // should be that face's three edges, and only that face removed.
        let mut mesh = MeshConnectivity::new();
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let v: Vec<VertexId> = positions.iter().map(|&p| mesh.alloc_vertex(p)).collect();
        let centroid = positions.iter().fold(Point3::ZERO, |a, &b| a + b) / 4.0;

        let tris = [
            [v[1], v[2], v[3]],
            [v[0], v[3], v[2]],
            [v[0], v[1], v[3]],
            [v[0], v[2], v[1]],
        ];
        let mut faces = Vec::new();
        for ids in tris {
            let pos: Vec<Point3> = ids.iter().map(|&id| mesh.vertex_position(id)).collect();
            let oriented = math::orient_away_from([pos[0], pos[1], pos[2]], centroid);
            let oriented_ids = if oriented == [pos[0], pos[1], pos[2]] {
                ids
            } else {
                [ids[0], ids[2], ids[1]]
            };
            faces.push(mesh.create_face(&oriented_ids).unwrap());
        }

        // A point far outside along the face opposite vertex 0 (i.e. the
        // face spanned by v1, v2, v3).
        let apex = Point3::new(5.0, 5.0, 5.0);
        let mut conflict = ConflictGraph::new();
        let seed = faces
            .iter()
            .copied()
            .find(|&f| face_visible(&mesh, f, apex, 1e-9))
            .expect("apex should see at least one face");

        let result = search_horizon(&mesh, &mut conflict, seed, apex, 1e-9);
        assert_eq!(result.removed, vec![seed]);
        assert_eq!(result.horizon.len(), 3);
    }
}
