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

//! Classical simulation of Clifford+T circuits via stabilizer-rank
//! decomposition: Clifford gates propagate through bit-packed tableaux,
//! each T-type gate doubles the number of stabilizer terms, and
//! measurement, sampling, expectation values, inner products, and full
//! statevectors are evaluated on the resulting sum.

pub mod prelude;

pub use stabrank_core::{
    Circuit, Gate, GateKind, Pauli, PauliString, Phase, SimError, SimRng,
};
pub use stabrank_qsim::{StabSum, Tableau};
