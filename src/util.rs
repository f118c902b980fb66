// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small iterator and collection helpers shared across the crate.

use smallvec::SmallVec;

/// A small vector sized for the common case of a triangle's worth of
/// handles (vertices, half-edges...). Most faces never spill to the heap.
pub type SVec<T> = SmallVec<[T; 3]>;

pub trait IteratorUtils: Iterator {
    fn collect_svec(self) -> SVec<Self::Item>
    where
        Self: Sized,
    {
        self.collect()
    }
}

impl<T: ?Sized> IteratorUtils for T where T: Iterator {}
