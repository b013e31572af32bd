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

// re-exporting stabrank-core
pub use stabrank_core::{
    rng_from_optional_seed, rng_from_seed, ChaCha8Rng, Circuit, Gate, GateKind, Pauli,
    PauliString, Phase, SimError, SimRng, MAX_SEED_BITS,
};

// re-exporting stabrank-qsim
pub use stabrank_qsim::{MeasuredOutcome, PauliRow, StabSum, Tableau};
