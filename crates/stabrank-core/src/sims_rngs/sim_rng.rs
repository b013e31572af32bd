// Copyright 2025 The Stabrank Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

use rand::{RngCore, SeedableRng};

/// Random number generators usable by the stochastic simulator entry points.
///
/// Every stochastic operation takes its generator (or seed) explicitly; no
/// module-level RNG state exists anywhere in the workspace.
pub trait SimRng: RngCore + SeedableRng {
    /// A generator keyed from the operating system's entropy source.
    #[inline]
    #[must_use]
    fn from_entropy() -> Self {
        Self::from_os_rng()
    }
}
