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

pub mod bits;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod pauli;
pub mod phase;
pub mod qasm;
pub mod sims_rngs;

pub use bits::BitVec;
pub use circuit::Circuit;
pub use error::SimError;
pub use gate::{Gate, GateKind};
pub use phase::Phase;

pub use crate::sims_rngs::chacha_rng::{ChaCha12Rng, ChaCha20Rng, ChaCha8Rng};
pub use crate::sims_rngs::seed::{rng_from_optional_seed, rng_from_seed, MAX_SEED_BITS};
pub use crate::sims_rngs::sim_rng::SimRng;
pub use crate::sims_rngs::xoshiro_rng::{
    Xoshiro128PlusPlus, Xoshiro128StarStar, Xoshiro256PlusPlus, Xoshiro256StarStar,
};
pub use pauli::pauli_string::PauliString;
pub use pauli::{product_i_exponent, Pauli};
