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

use num_bigint::{BigInt, Sign};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::SimError;
use crate::sims_rngs::sim_rng::SimRng;

/// Widest accepted seed: the ChaCha key is 256 bits, and so is the API.
pub const MAX_SEED_BITS: u64 = 256;

/// Keys a `ChaCha8Rng` from a user-supplied seed integer.
///
/// The seed's little-endian magnitude bytes become the cipher key,
/// zero-padded to 32 bytes.
///
/// # Errors
/// `SimError::SeedOverflow` for a negative seed or one wider than 256 bits.
pub fn rng_from_seed(seed: &BigInt) -> Result<ChaCha8Rng, SimError> {
    if seed.sign() == Sign::Minus {
        return Err(SimError::SeedOverflow(format!(
            "seed must be non-negative, got {seed}"
        )));
    }
    if seed.bits() > MAX_SEED_BITS {
        return Err(SimError::SeedOverflow(format!(
            "seed exceeds {MAX_SEED_BITS} bits ({} bits)",
            seed.bits()
        )));
    }
    let (_, bytes) = seed.to_bytes_le();
    let mut key = [0u8; 32];
    key[..bytes.len()].copy_from_slice(&bytes);
    Ok(ChaCha8Rng::from_seed(key))
}

/// Seeded generator when a seed is given, OS entropy otherwise.
///
/// # Errors
/// `SimError::SeedOverflow` as for [`rng_from_seed`].
pub fn rng_from_optional_seed(seed: Option<&BigInt>) -> Result<ChaCha8Rng, SimError> {
    match seed {
        Some(seed) => rng_from_seed(seed),
        None => Ok(ChaCha8Rng::from_entropy()),
    }
}
