// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Randomized incremental 3D convex hull construction over a half-edge
//! mesh, accelerated by a bidirectional conflict graph.
//!
//! ```
//! use inc_hull3d::{build, Point3};
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let hull = build(&points, Some(42)).unwrap();
//! assert_eq!(hull.num_faces(), 4);
//! assert!(hull.is_convex());
//! ```

/// Some useful re-exports.
pub mod prelude;

/// Vector math and the orientation/visibility predicate.
pub mod math;

/// Small iterator and collection helpers shared across the crate.
pub mod util;

/// The error surface for hull construction.
pub mod error;

/// The half-edge mesh data structure: vertices, faces, and half-edges in
/// arenas addressed by typed handles.
pub mod mesh;

/// The bidirectional conflict graph between unprocessed points and hull
/// faces.
pub mod conflict;

/// The randomized incremental insertion driver.
pub mod hull;

/// The read-only query surface over a completed hull.
pub mod query;

pub use error::{HullError, Result};
pub use hull::build;
pub use math::Point3;
pub use query::Hull;
