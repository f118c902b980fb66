// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The half-edge mesh: arena-backed storage (`connectivity`) addressed by
//! generational handles (`id_types`), plus the indexing sugar that lets
//! the rest of the crate write `mesh[vertex_id]` instead of threading
//! `Option`s through every call site.

pub mod connectivity;
pub mod id_types;
mod mesh_index_impls;

pub use connectivity::{Face, HalfEdge, MeshConnectivity, Vertex};
pub use id_types::{FaceId, HalfEdgeId, VertexId};
