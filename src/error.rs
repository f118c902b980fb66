// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The error surface for hull construction. All three variants are
//! input errors: nothing in the core retries or masks them, and none of
//! them can be raised once `build` has returned successfully.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HullError {
    /// Fewer than four points were supplied; there is no tetrahedron to seed the hull with.
    #[error("at least four points are required to build a hull, got {0}")]
    InsufficientPoints(usize),

    /// The four points chosen to seed the initial tetrahedron turned out to
    /// be coplanar (or collinear): their raw normal is too close to zero for
    /// the visibility predicate to be trusted.
    #[error("the seed points are degenerate (coplanar or collinear); cannot build an initial tetrahedron")]
    DegenerateInput,

    /// A face was asked for with a vertex count other than three.
    #[error("a face requires exactly three vertices, got {0}")]
    InvalidFace(usize),
}

pub type Result<T, E = HullError> = std::result::Result<T, E>;
