// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The read-only surface returned by [`crate::hull::build`]: enumeration
//! and the convexity diagnostic.

use crate::math;
use crate::mesh::{FaceId, MeshConnectivity, VertexId};

/// A completed convex hull: an oriented triangulated DCEL plus whatever
/// input points were folded in along the way. Safe to query from
/// multiple readers; nothing here mutates the mesh.
pub struct Hull {
    mesh: MeshConnectivity,
}

impl Hull {
    pub(crate) fn new(mesh: MeshConnectivity) -> Self {
        Hull { mesh }
    }

    /// Every vertex that participates in at least one face. Points
    /// classified interior during construction are allocated a vertex
    /// handle but never attached to a face, so they're excluded here.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.mesh
            .iter_vertices()
            .filter(|(_, v)| v.halfedge.is_some())
            .map(|(id, _)| id)
    }

    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.mesh.iter_faces().map(|(id, _)| id)
    }

    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        self.mesh.face_vertices(f)
    }

    pub fn face_edges(&self, f: FaceId) -> [crate::mesh::HalfEdgeId; 3] {
        self.mesh.face_edges(f)
    }

    pub fn vertex_position(&self, v: VertexId) -> math::Point3 {
        self.mesh.vertex_position(v)
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices().count()
    }

    pub fn num_faces(&self) -> usize {
        self.mesh.num_faces()
    }

    /// Total half-edge count, for Euler-characteristic checks (`V - E/2 +
    /// F == 2`, with `E` being undirected edges — half of this count).
    pub fn num_halfedges(&self) -> usize {
        self.mesh.num_halfedges()
    }

    /// Diagnostic verifier: for every face, test every other hull vertex
    /// against its supporting plane. Convex iff none lies strictly on the
    /// outward side. `O(F * V)`; intended for tests and debugging, not
    /// for use in the hot path.
    pub fn is_convex(&self) -> bool {
        let eps = math::adaptive_epsilon(
            &self
                .vertices()
                .map(|v| self.vertex_position(v))
                .collect::<Vec<_>>(),
        );

        for f in self.faces() {
            let tri = self.face_vertices(f);
            let positions = tri.map(|v| self.vertex_position(v));
            let normal = math::raw_normal(positions[0], positions[1], positions[2]);

            for v in self.vertices() {
                if tri.contains(&v) {
                    continue;
                }
                let q = self.vertex_position(v);
                if math::is_visible(positions[0], normal, q, eps) {
                    return false;
                }
            }
        }

        true
    }
}
