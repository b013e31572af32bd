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

use rand::Rng;
use stabrank_core::bits::BitVec;
use stabrank_core::SimRng;

use crate::row::PauliRow;

/// Result of a Z-basis measurement on a single stabilizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasuredOutcome {
    /// The measured bit: `false` collapses onto +Z (|0⟩), `true` onto -Z.
    pub outcome: bool,
    /// True when the state was already an eigenstate of `Z_q`.
    pub deterministic: bool,
}

/// The destabilizer/stabilizer tableau of one stabilizer state.
///
/// Rows `0..n` are destabilizers, rows `n..2n` stabilizers, all with even
/// phase exponents (sign bits). The fresh tableau represents |0…0⟩:
/// destabilizer k is `X_k`, stabilizer k is `Z_k`, all signs +.
///
/// Maintained invariants: stabilizers mutually commute; destabilizer k
/// anticommutes with stabilizer k and commutes with everything else; the 2n
/// rows are independent over GF(2).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    num_qubits: usize,
    rows: Vec<PauliRow>,
}

impl Tableau {
    /// The tableau of |0…0⟩.
    #[must_use]
    pub fn new(num_qubits: usize) -> Self {
        let mut rows = Vec::with_capacity(2 * num_qubits);
        for k in 0..num_qubits {
            let mut row = PauliRow::identity(num_qubits);
            row.x.set(k, true);
            rows.push(row);
        }
        for k in 0..num_qubits {
            let mut row = PauliRow::identity(num_qubits);
            row.z.set(k, true);
            rows.push(row);
        }
        Self { num_qubits, rows }
    }

    #[inline]
    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    #[must_use]
    pub fn destabilizer(&self, k: usize) -> &PauliRow {
        &self.rows[k]
    }

    #[inline]
    #[must_use]
    pub fn stabilizer(&self, k: usize) -> &PauliRow {
        &self.rows[self.num_qubits + k]
    }

    #[inline]
    #[must_use]
    pub fn stabilizer_rows(&self) -> &[PauliRow] {
        &self.rows[self.num_qubits..]
    }

    // --- Clifford conjugation, row by row -------------------------------

    pub fn h(&mut self, q: usize) {
        for row in &mut self.rows {
            if row.x.get(q) && row.z.get(q) {
                row.flip_sign();
            }
            let x = row.x.get(q);
            row.x.set(q, row.z.get(q));
            row.z.set(q, x);
        }
    }

    pub fn s(&mut self, q: usize) {
        for row in &mut self.rows {
            let x = row.x.get(q);
            if x && row.z.get(q) {
                row.flip_sign();
            }
            if x {
                row.z.flip(q);
            }
        }
    }

    pub fn sdg(&mut self, q: usize) {
        for row in &mut self.rows {
            let x = row.x.get(q);
            if x {
                row.z.flip(q);
            }
            if x && row.z.get(q) {
                row.flip_sign();
            }
        }
    }

    pub fn x(&mut self, q: usize) {
        for row in &mut self.rows {
            if row.z.get(q) {
                row.flip_sign();
            }
        }
    }

    pub fn y(&mut self, q: usize) {
        for row in &mut self.rows {
            if row.x.get(q) ^ row.z.get(q) {
                row.flip_sign();
            }
        }
    }

    pub fn z(&mut self, q: usize) {
        for row in &mut self.rows {
            if row.x.get(q) {
                row.flip_sign();
            }
        }
    }

    /// Square root of X, as the composition H·S·H.
    pub fn sx(&mut self, q: usize) {
        self.h(q);
        self.s(q);
        self.h(q);
    }

    pub fn sxdg(&mut self, q: usize) {
        self.h(q);
        self.sdg(q);
        self.h(q);
    }

    pub fn cx(&mut self, control: usize, target: usize) {
        for row in &mut self.rows {
            let (xc, zc) = (row.x.get(control), row.z.get(control));
            let (xt, zt) = (row.x.get(target), row.z.get(target));
            if xc && zt && !(xt ^ zc) {
                row.flip_sign();
            }
            row.x.set(target, xt ^ xc);
            row.z.set(control, zc ^ zt);
        }
    }

    /// Controlled-Z, as the composition H_t · CX · H_t.
    pub fn cz(&mut self, control: usize, target: usize) {
        self.h(target);
        self.cx(control, target);
        self.h(target);
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        for row in &mut self.rows {
            row.x.swap_bits(a, b);
            row.z.swap_bits(a, b);
        }
    }

    // --- Measurement and expectation ------------------------------------

    /// Replaces row `target` with `rows[source] * rows[target]`.
    ///
    /// # Panics
    /// Panics if the product picks up an imaginary phase, which only a
    /// corrupted tableau can produce.
    fn rowsum(&mut self, target: usize, source: usize) {
        let left = self.rows[source].clone();
        self.rows[target].premultiply(&left);
        assert!(
            self.rows[target].i_exp % 2 == 0,
            "tableau rowsum produced an imaginary phase"
        );
    }

    /// The product of stabilizer generators whose index set is determined by
    /// which destabilizers anticommute with `p`.
    ///
    /// When `p` commutes with the whole stabilizer group, the returned row
    /// matches `p`'s bit pattern and its sign is the measurement answer.
    pub(crate) fn stabilizer_product_matching(&self, p: &PauliRow) -> PauliRow {
        let mut acc = PauliRow::identity(self.num_qubits);
        for k in 0..self.num_qubits {
            if self.rows[k].anticommutes_with(p) {
                acc.premultiply(&self.rows[self.num_qubits + k]);
            }
        }
        acc
    }

    /// `⟨ψ|P|ψ⟩ ∈ {-1, 0, +1}` on this single stabilizer state.
    ///
    /// Zero when `P` (ignoring phase) lies outside the stabilizer group;
    /// otherwise the group sign combined with `P`'s own sign.
    ///
    /// # Panics
    /// Panics if `p` carries an imaginary phase (`±i`); expectations of such
    /// operators are not real and callers reject them up front.
    #[must_use]
    pub fn pauli_expectation(&self, p: &PauliRow) -> i8 {
        if self
            .stabilizer_rows()
            .iter()
            .any(|row| row.anticommutes_with(p))
        {
            return 0;
        }
        let acc = self.stabilizer_product_matching(p);
        assert!(
            acc.x == p.x && acc.z == p.z,
            "commuting Pauli not expressible in the stabilizer group"
        );
        match (4 + p.i_exp - acc.i_exp) % 4 {
            0 => 1,
            2 => -1,
            _ => panic!("Pauli expectation of an anti-Hermitian operator"),
        }
    }

    /// Measures qubit `q` in the Z basis, collapsing the tableau.
    ///
    /// The random branch flips a fair coin from `rng`; the deterministic
    /// branch reads the answer off a scratch row and leaves the tableau
    /// untouched.
    pub fn measure_z<R: SimRng>(&mut self, q: usize, rng: &mut R) -> MeasuredOutcome {
        let n = self.num_qubits;
        let pivot = (n..2 * n).find(|&k| self.rows[k].x.get(q));

        if let Some(pivot) = pivot {
            let outcome: bool = rng.random();
            for k in 0..2 * n {
                if k != pivot && self.rows[k].x.get(q) {
                    self.rowsum(k, pivot);
                }
            }
            self.rows[pivot - n] = self.rows[pivot].clone();
            self.rows[pivot] = PauliRow::z_on(n, q, outcome);
            MeasuredOutcome {
                outcome,
                deterministic: false,
            }
        } else {
            let probe = PauliRow::z_on(n, q, false);
            let scratch = self.stabilizer_product_matching(&probe);
            assert!(
                scratch.x == probe.x && scratch.z == probe.z,
                "deterministic measurement scratch row is not ±Z"
            );
            MeasuredOutcome {
                outcome: scratch.sign(),
                deterministic: true,
            }
        }
    }

    /// Post-projection bookkeeping for `(I + P)/2` when stabilizer `k`
    /// anticommutes with `P`: every other anticommuting row absorbs the
    /// pivot, the pivot moves into destabilizer slot `k`, and `P` becomes
    /// stabilizer `k`.
    pub(crate) fn project_anticommuting(&mut self, k: usize, p: &PauliRow) {
        let n = self.num_qubits;
        let pivot = n + k;
        for j in 0..2 * n {
            if j != pivot && self.rows[j].anticommutes_with(p) {
                self.rowsum(j, pivot);
            }
        }
        self.rows[k] = self.rows[pivot].clone();
        self.rows[pivot] = p.clone();
    }

    /// Conjugates every row by a Pauli: `R → P R P†` flips only the signs of
    /// rows that anticommute with `P`.
    pub(crate) fn conjugate_by_pauli(&mut self, p: &PauliRow) {
        for row in &mut self.rows {
            if row.anticommutes_with(p) {
                row.flip_sign();
            }
        }
    }

    // --- Invariant checking (test and debug support) --------------------

    /// Verifies the tableau invariants: even phases, the commutation
    /// pattern between (de)stabilizers, and GF(2) independence of all 2n
    /// rows.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let n = self.num_qubits;
        if self.rows.iter().any(|row| row.i_exp % 2 != 0) {
            return false;
        }
        for i in 0..n {
            for j in 0..n {
                let destab_destab = self.rows[i].anticommutes_with(&self.rows[j]);
                let stab_stab = self.rows[n + i].anticommutes_with(&self.rows[n + j]);
                let destab_stab = self.rows[i].anticommutes_with(&self.rows[n + j]);
                if destab_destab || stab_stab || destab_stab != (i == j) {
                    return false;
                }
            }
        }
        self.rows_independent()
    }

    fn rows_independent(&self) -> bool {
        let n = self.num_qubits;
        // Concatenate (x | z) into 2n-bit rows and row-reduce.
        let mut matrix: Vec<BitVec> = self
            .rows
            .iter()
            .map(|row| {
                let mut bits = BitVec::zeros(2 * n);
                for q in 0..n {
                    bits.set(q, row.x.get(q));
                    bits.set(n + q, row.z.get(q));
                }
                bits
            })
            .collect();
        let mut rank = 0;
        for col in 0..2 * n {
            let Some(pivot) = (rank..matrix.len()).find(|&r| matrix[r].get(col)) else {
                continue;
            };
            matrix.swap(rank, pivot);
            for r in 0..matrix.len() {
                if r != rank && matrix[r].get(col) {
                    let pivot_row = matrix[rank].clone();
                    matrix[r].xor_with(&pivot_row);
                }
            }
            rank += 1;
        }
        rank == 2 * n
    }
}
