// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The geometry kernel: vector plumbing and the single orientation predicate
//! every combinatorial decision in the hull builder is derived from.

use float_ord::FloatOrd;
use glam::DVec3;

/// A point in 3D space. The algorithm works in double precision: the
/// orientation predicate accumulates several subtractions and a cross
/// product before the final dot product, and `f32` loses the bits needed
/// to keep "on the plane" and "barely visible" distinguishable once
/// coordinates grow past a few hundred units.
pub type Point3 = DVec3;

/// A point, made hashable and totally ordered so it can key a
/// deduplication map. Two points compare equal iff their coordinates are
/// bit-for-bit equal; this is deliberately stricter than the `eps`-fuzzy
/// visibility predicate below, which only governs combinatorial decisions.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point3Ord([FloatOrd<f64>; 3]);

pub trait ToOrd {
    fn to_ord(&self) -> Point3Ord;
}

impl ToOrd for Point3 {
    fn to_ord(&self) -> Point3Ord {
        Point3Ord([FloatOrd(self.x), FloatOrd(self.y), FloatOrd(self.z)])
    }
}

/// Baseline tolerance for the visibility predicate, scaled by the input's
/// coordinate magnitude so the same absolute epsilon doesn't become
/// meaninglessly tight (or loose) depending on how the caller scaled their
/// point cloud.
const RELATIVE_EPSILON: f64 = 1e-9;

/// Picks an epsilon for the visibility predicate from the spread of the
/// input. Larger coordinates need a larger absolute tolerance for the same
/// relative precision.
pub fn adaptive_epsilon(points: &[Point3]) -> f64 {
    let max_coord = points
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs(), p.z.abs()])
        .fold(0.0_f64, f64::max);
    RELATIVE_EPSILON * max_coord.max(1.0)
}

/// The outward normal of the oriented triangle `(p1, p2, p3)`, by the
/// right-hand rule. Not normalized: hot paths only need its sign and
/// relative magnitude, never its length.
#[inline]
pub fn raw_normal(p1: Point3, p2: Point3, p3: Point3) -> Point3 {
    (p2 - p1).cross(p3 - p1)
}

/// Signed distance of `q` from the plane through `p1` carrying `normal`.
/// Positive means `q` is on the side the normal points to.
#[inline]
pub fn signed_distance(p1: Point3, normal: Point3, q: Point3) -> f64 {
    normal.dot(q - p1)
}

/// The visibility predicate: a triangle with outward normal
/// `normal` and any vertex `p1` is visible from `q` iff `(q - p1) . normal`
/// is strictly positive. Coplanar points (distance within `eps` of zero)
/// are treated as *not* visible, biasing borderline points towards the
/// hull's interior rather than growing spurious near-degenerate faces.
#[inline]
pub fn is_visible(p1: Point3, normal: Point3, q: Point3, eps: f64) -> bool {
    signed_distance(p1, normal, q) > eps
}

/// Given three vertices and a point `interior` known to lie strictly
/// inside the solid, returns the vertices reordered so their outward
/// normal points away from `interior`. Used only to seed the initial
/// tetrahedron, where there is no existing mesh to take orientation cues
/// from.
pub fn orient_away_from(verts: [Point3; 3], interior: Point3) -> [Point3; 3] {
    let normal = raw_normal(verts[0], verts[1], verts[2]);
    let centroid = (verts[0] + verts[1] + verts[2]) / 3.0;
    if normal.dot(centroid - interior) < 0.0 {
        [verts[0], verts[2], verts[1]]
    } else {
        verts
    }
}
