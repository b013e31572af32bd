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

use num_complex::Complex64;
use stabrank_core::bits::BitVec;
use stabrank_core::pauli::product_i_exponent;
use stabrank_core::{PauliString, Phase};

/// A width-n Pauli with an exact `i^k` phase: `i^{i_exp} * P_1 ⊗ … ⊗ P_n`,
/// where each site letter is read off the (x, z) bit pair with Y literal.
///
/// Tableau rows are `PauliRow`s whose exponent stays even (`i^0 = +1`,
/// `i^2 = -1`); odd exponents appear only transiently in products and
/// signal a corrupted tableau if they ever land in one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PauliRow {
    pub x: BitVec,
    pub z: BitVec,
    pub i_exp: u8,
}

impl PauliRow {
    #[must_use]
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            x: BitVec::zeros(num_qubits),
            z: BitVec::zeros(num_qubits),
            i_exp: 0,
        }
    }

    /// The row `i^{2*sign} Z_q` (`sign` false for +Z, true for -Z).
    #[must_use]
    pub fn z_on(num_qubits: usize, qubit: usize, sign: bool) -> Self {
        let mut row = Self::identity(num_qubits);
        row.z.set(qubit, true);
        row.i_exp = if sign { 2 } else { 0 };
        row
    }

    #[must_use]
    pub fn from_pauli_string(pauli: &PauliString) -> Self {
        Self {
            x: pauli.x_bits().clone(),
            z: pauli.z_bits().clone(),
            i_exp: pauli.phase().i_exponent(),
        }
    }

    #[inline]
    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.x.len()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_i_exponent(self.i_exp)
    }

    /// Sign bit of a valid (even-exponent) row: `false` for +, `true` for -.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> bool {
        self.i_exp == 2
    }

    pub fn flip_sign(&mut self) {
        self.i_exp = (self.i_exp + 2) % 4;
    }

    /// True iff the rows anticommute (odd symplectic overlap).
    #[must_use]
    pub fn anticommutes_with(&self, other: &Self) -> bool {
        self.x.parity_and(&other.z) ^ self.z.parity_and(&other.x)
    }

    /// Replaces `self` with the operator product `left * self`, phases
    /// combined exactly.
    pub fn premultiply(&mut self, left: &Self) {
        let exponent = product_i_exponent(&left.x, &left.z, &self.x, &self.z);
        self.i_exp = (self.i_exp + left.i_exp + exponent) % 4;
        self.x.xor_with(&left.x);
        self.z.xor_with(&left.z);
    }

    /// Applies the operator to a computational basis state:
    /// `P |b⟩ = factor * |b ⊕ x⟩`. Returns `(b ⊕ x, factor)`.
    ///
    /// Each Y site carries its own `i`, each Z/Y site a `(-1)^{b_j}`.
    #[must_use]
    pub fn apply_to_basis(&self, basis: &BitVec) -> (BitVec, Complex64) {
        let mut y_count: u32 = 0;
        for (a, b) in self.x.words().iter().zip(self.z.words()) {
            y_count += (a & b).count_ones();
        }
        let mut exponent = u32::from(self.i_exp) + y_count;
        if self.z.parity_and(basis) {
            exponent += 2;
        }
        let mut out = basis.clone();
        out.xor_with(&self.x);
        (out, Phase::from_i_exponent((exponent % 4) as u8).to_complex())
    }
}
