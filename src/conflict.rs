// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The conflict graph: a bipartite relation between not-yet-inserted points
//! and the hull faces that can see them, maintained in both directions so
//! cap removal can fan displaced points out without a linear scan.

use slotmap::SecondaryMap;

use crate::mesh::{FaceId, VertexId};
use crate::util::{IteratorUtils, SVec};

/// Driver-owned, not part of the mesh itself: faces come and go far more
/// often than the conflict relation needs to be rebuilt from scratch.
#[derive(Debug, Default)]
pub struct ConflictGraph {
    /// `vertex -> face`. Absence means the point is interior to the
    /// current hull (the sentinel state from the state machine).
    forward: SecondaryMap<VertexId, FaceId>,
    /// `face -> [vertex]`. Only ever holds entries for faces that are
    /// currently live and have at least one point attached; an empty or
    /// missing entry are equivalent.
    reverse: SecondaryMap<FaceId, Vec<VertexId>>,
}

impl ConflictGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The face `v` currently sees, or `None` if it's classified interior.
    pub fn conflict_face(&self, v: VertexId) -> Option<FaceId> {
        self.forward.get(v).copied()
    }

    /// Records that `v` sees `f`. `v` must not already be attached to a
    /// face; detach it first with `mark_interior` if it is.
    pub fn attach(&mut self, v: VertexId, f: FaceId) {
        debug_assert!(
            !self.forward.contains_key(v),
            "attach called on a vertex that already has a conflict face"
        );
        self.forward.insert(v, f);
        if let Some(list) = self.reverse.get_mut(f) {
            list.push(v);
        } else {
            self.reverse.insert(f, vec![v]);
        }
    }

    /// Marks `v` interior: it is removed from the forward map and from
    /// whichever face's list it was in.
    pub fn mark_interior(&mut self, v: VertexId) {
        if let Some(f) = self.forward.remove(v) {
            if let Some(list) = self.reverse.get_mut(f) {
                list.retain(|&x| x != v);
            }
        }
    }

    /// Drains every point that saw `f` and removes `f` from the graph
    /// entirely. Used when a face is about to be destroyed by cap removal:
    /// its conflicts become "displaced" points to redistribute among the
    /// new fan faces.
    pub fn take_face_conflicts(&mut self, f: FaceId) -> SVec<VertexId> {
        let list = self.reverse.remove(f).unwrap_or_default();
        for &v in &list {
            self.forward.remove(v);
        }
        list.into_iter().collect_svec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshConnectivity;
    use crate::math::Point3;

    fn dummy_face(mesh: &mut MeshConnectivity) -> FaceId {
        let v0 = mesh.alloc_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.alloc_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.alloc_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.create_face(&[v0, v1, v2]).unwrap()
    }

    #[test]
    fn attach_and_take_round_trips() {
        let mut mesh = MeshConnectivity::new();
        let f = dummy_face(&mut mesh);
        let p = mesh.alloc_vertex(Point3::new(5.0, 5.0, 5.0));

        let mut graph = ConflictGraph::new();
        graph.attach(p, f);
        assert_eq!(graph.conflict_face(p), Some(f));

        let drained = graph.take_face_conflicts(f);
        assert_eq!(drained.as_slice(), &[p]);
        assert_eq!(graph.conflict_face(p), None);
    }

    #[test]
    fn mark_interior_clears_both_maps() {
        let mut mesh = MeshConnectivity::new();
        let f = dummy_face(&mut mesh);
        let p = mesh.alloc_vertex(Point3::new(5.0, 5.0, 5.0));

        let mut graph = ConflictGraph::new();
        graph.attach(p, f);
        graph.mark_interior(p);
        assert_eq!(graph.conflict_face(p), None);
        assert!(graph.take_face_conflicts(f).is_empty());
    }
}
