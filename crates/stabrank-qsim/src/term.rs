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

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use num_complex::Complex64;
use stabrank_core::bits::BitVec;
use stabrank_core::{Gate, GateKind};

use crate::row::PauliRow;
use crate::tableau::Tableau;

/// One summand of a stabilizer-rank decomposition.
///
/// A tableau fixes a stabilizer state only up to global phase, so each term
/// anchors its exact vector with the amplitude at one support point:
/// `⟨ref_basis|v⟩ = amp`. The anchor absorbs the term's complex coefficient;
/// every gate keeps it exact, which is what makes cross-term interference
/// (inner products, off-diagonal expectations) come out right.
///
/// A term whose amplitude has been annihilated by a projection keeps its
/// tableau and represents the zero vector; it stays in the sum and
/// contributes nothing anywhere.
#[derive(Clone, Debug)]
pub(crate) struct StabTerm {
    tableau: Tableau,
    ref_basis: BitVec,
    amp: Complex64,
}

/// Row-echelon basis of a term's support: the stabilizer generators after
/// GF(2) elimination over their X-parts, plus the pivot columns.
struct SupportBasis {
    pivots: Vec<(usize, usize)>, // (pivot qubit, row index)
    rows: Vec<PauliRow>,
}

impl StabTerm {
    /// The term `1·|0…0⟩`.
    pub fn new_zero(num_qubits: usize) -> Self {
        Self {
            tableau: Tableau::new(num_qubits),
            ref_basis: BitVec::zeros(num_qubits),
            amp: Complex64::new(1.0, 0.0),
        }
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.tableau.num_qubits()
    }

    #[inline]
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    #[inline]
    pub fn is_vanished(&self) -> bool {
        self.amp.norm_sqr() == 0.0
    }

    pub fn scale(&mut self, factor: Complex64) {
        self.amp *= factor;
    }

    /// Squared norm of the term's vector: `|amp|² · 2^{support dim}`.
    pub fn norm_sqr(&self) -> f64 {
        if self.is_vanished() {
            return 0.0;
        }
        self.amp.norm_sqr() * exp2_int(self.support_dim())
    }

    pub fn support_dim(&self) -> usize {
        self.support_basis().pivots.len()
    }

    // --- Clifford application with anchor tracking ----------------------

    /// Applies a Clifford gate: conjugates the tableau and moves the anchor
    /// with the exact phase the gate imparts.
    ///
    /// # Panics
    /// Panics on a T-type gate; rank doubling is the caller's job.
    pub fn apply_gate(&mut self, gate: &Gate) {
        let q = gate.qubits();
        match gate.kind() {
            GateKind::H => self.apply_h(q[0]),
            GateKind::S => self.apply_s(q[0]),
            GateKind::Sdg => self.apply_sdg(q[0]),
            GateKind::X => {
                self.ref_basis.flip(q[0]);
                self.tableau.x(q[0]);
            }
            GateKind::Y => {
                // Y|b⟩ = i(-1)^{b_q} |b ⊕ e_q⟩
                self.amp *= if self.ref_basis.get(q[0]) {
                    Complex64::new(0.0, -1.0)
                } else {
                    Complex64::new(0.0, 1.0)
                };
                self.ref_basis.flip(q[0]);
                self.tableau.y(q[0]);
            }
            GateKind::Z => {
                if self.ref_basis.get(q[0]) {
                    self.amp = -self.amp;
                }
                self.tableau.z(q[0]);
            }
            GateKind::Sx => {
                self.apply_h(q[0]);
                self.apply_s(q[0]);
                self.apply_h(q[0]);
            }
            GateKind::Sxdg => {
                self.apply_h(q[0]);
                self.apply_sdg(q[0]);
                self.apply_h(q[0]);
            }
            GateKind::Cx => {
                if self.ref_basis.get(q[0]) {
                    self.ref_basis.flip(q[1]);
                }
                self.tableau.cx(q[0], q[1]);
            }
            GateKind::Cz => {
                if self.ref_basis.get(q[0]) && self.ref_basis.get(q[1]) {
                    self.amp = -self.amp;
                }
                self.tableau.cz(q[0], q[1]);
            }
            GateKind::Swap => {
                self.ref_basis.swap_bits(q[0], q[1]);
                self.tableau.swap(q[0], q[1]);
            }
            GateKind::T | GateKind::Tdg => {
                unreachable!("T-type gates double the rank and are applied at the sum level")
            }
        }
    }

    fn apply_s(&mut self, q: usize) {
        if self.ref_basis.get(q) {
            self.amp *= Complex64::new(0.0, 1.0);
        }
        self.tableau.s(q);
    }

    fn apply_sdg(&mut self, q: usize) {
        if self.ref_basis.get(q) {
            self.amp *= Complex64::new(0.0, -1.0);
        }
        self.tableau.sdg(q);
    }

    /// H spreads the anchor over two basis states; the amplitude at the
    /// missing partner is recovered from the stabilizer group, and whichever
    /// output amplitude is larger becomes the new anchor (at least one is
    /// nonzero).
    fn apply_h(&mut self, q: usize) {
        let mut b0 = self.ref_basis.clone();
        b0.set(q, false);
        let mut b1 = b0.clone();
        b1.set(q, true);

        let (amp0, amp1) = if self.ref_basis.get(q) {
            (self.amplitude_at(&b0), self.amp)
        } else {
            (self.amp, self.amplitude_at(&b1))
        };
        let new0 = (amp0 + amp1) * FRAC_1_SQRT_2;
        let new1 = (amp0 - amp1) * FRAC_1_SQRT_2;

        if new0.norm_sqr() >= new1.norm_sqr() {
            self.ref_basis = b0;
            self.amp = new0;
        } else {
            self.ref_basis = b1;
            self.amp = new1;
        }
        self.tableau.h(q);
    }

    // --- Amplitudes from the stabilizer group ---------------------------

    fn support_basis(&self) -> SupportBasis {
        let n = self.num_qubits();
        let mut rows = self.tableau.stabilizer_rows().to_vec();
        let mut pivots: Vec<(usize, usize)> = Vec::new();
        let mut used = vec![false; n];
        for col in 0..n {
            let Some(r) = (0..n).find(|&r| !used[r] && rows[r].x.get(col)) else {
                continue;
            };
            used[r] = true;
            for k in 0..n {
                if k != r && rows[k].x.get(col) {
                    let pivot_row = rows[r].clone();
                    rows[k].premultiply(&pivot_row);
                }
            }
            pivots.push((col, r));
        }
        SupportBasis { pivots, rows }
    }

    /// The exact amplitude `⟨basis|v⟩` of the term's vector.
    ///
    /// Walks from the anchor along the stabilizer-group element whose X-part
    /// connects the two basis states; zero when `basis` is outside the
    /// support.
    pub fn amplitude_at(&self, basis: &BitVec) -> Complex64 {
        if self.is_vanished() {
            return Complex64::new(0.0, 0.0);
        }
        let mut remaining = basis.clone();
        remaining.xor_with(&self.ref_basis);
        if !remaining.any() {
            return self.amp;
        }
        let support = self.support_basis();
        let mut acc = PauliRow::identity(self.num_qubits());
        for &(col, r) in &support.pivots {
            if remaining.get(col) {
                remaining.xor_with(&support.rows[r].x);
                acc.premultiply(&support.rows[r]);
            }
        }
        if remaining.any() {
            return Complex64::new(0.0, 0.0);
        }
        let (landed, factor) = acc.apply_to_basis(&self.ref_basis);
        debug_assert_eq!(&landed, basis, "support walk landed off target");
        factor * self.amp
    }

    // --- Projection, Pauli application, T injection ---------------------

    /// Applies `(I + P)/2` exactly, without rescaling.
    ///
    /// Anticommuting case: Aaronson–Gottesman bookkeeping swaps the pivot
    /// stabilizer into the destabilizers and installs `P`; the anchor is
    /// re-derived from pre-projection amplitudes. Commuting case: the term
    /// is either untouched or annihilated, depending on the group sign.
    ///
    /// # Panics
    /// Panics if `p` has an imaginary phase (not a projector direction).
    pub fn project_pauli(&mut self, p: &PauliRow) {
        assert!(p.i_exp % 2 == 0, "projector Pauli must be Hermitian");
        let n = self.num_qubits();
        let pivot = (0..n).find(|&k| self.tableau.stabilizer(k).anticommutes_with(p));

        if let Some(k) = pivot {
            let pivot_x = self.tableau.stabilizer(k).x.clone();
            let mut best_basis = self.ref_basis.clone();
            let mut best_amp = Complex64::new(0.0, 0.0);
            if !self.is_vanished() {
                let mut candidates = Vec::with_capacity(4);
                for with_pivot in [false, true] {
                    for with_p in [false, true] {
                        let mut b = self.ref_basis.clone();
                        if with_pivot {
                            b.xor_with(&pivot_x);
                        }
                        if with_p {
                            b.xor_with(&p.x);
                        }
                        candidates.push(b);
                    }
                }
                for basis in candidates {
                    let amp = self.projected_amplitude(p, &basis);
                    if amp.norm_sqr() > best_amp.norm_sqr() {
                        best_amp = amp;
                        best_basis = basis;
                    }
                }
            }
            self.tableau.project_anticommuting(k, p);
            self.ref_basis = best_basis;
            self.amp = best_amp;
        } else {
            let acc = self.tableau.stabilizer_product_matching(p);
            assert!(
                acc.x == p.x && acc.z == p.z,
                "commuting projector not expressible in the stabilizer group"
            );
            if acc.i_exp != p.i_exp {
                // Opposite sign: the projector annihilates this term.
                self.amp = Complex64::new(0.0, 0.0);
            }
        }
    }

    /// `⟨basis| (I + P)/2 |v⟩` from pre-projection amplitudes.
    fn projected_amplitude(&self, p: &PauliRow, basis: &BitVec) -> Complex64 {
        let direct = self.amplitude_at(basis);
        let mut partner = basis.clone();
        partner.xor_with(&p.x);
        let across = self.amplitude_at(&partner);
        let (landed, factor) = p.apply_to_basis(&partner);
        debug_assert_eq!(&landed, basis);
        (direct + factor * across) * 0.5
    }

    /// Left-multiplies the term's vector by a Pauli: rows conjugate with
    /// sign flips only, and the anchor permutes with `P`'s exact phase.
    pub fn apply_pauli(&mut self, p: &PauliRow) {
        self.tableau.conjugate_by_pauli(p);
        let (basis, factor) = p.apply_to_basis(&self.ref_basis);
        self.ref_basis = basis;
        self.amp *= factor;
    }

    /// Splits the term for `T = diag(1, e^{iπ/4})` (or its adjoint) on
    /// qubit `q`, using the exact identity
    /// `diag(1, e^{iθ}) = ((1+e^{iθ})/2)·I + ((1-e^{iθ})/2)·Z`.
    ///
    /// Returns the (identity branch, Z branch) pair that replaces this term.
    pub fn t_inject(&self, q: usize, dagger: bool) -> (StabTerm, StabTerm) {
        let theta = if dagger { -FRAC_PI_4 } else { FRAC_PI_4 };
        let rotation = Complex64::from_polar(1.0, theta);
        let coeff_a = (Complex64::new(1.0, 0.0) + rotation) * 0.5;
        let coeff_b = (Complex64::new(1.0, 0.0) - rotation) * 0.5;

        let mut branch_a = self.clone();
        branch_a.scale(coeff_a);

        let mut branch_b = self.clone();
        if branch_b.ref_basis.get(q) {
            branch_b.amp = -branch_b.amp;
        }
        branch_b.tableau.z(q);
        branch_b.scale(coeff_b);

        (branch_a, branch_b)
    }

    /// `⟨self|other⟩`, exact in magnitude and phase.
    ///
    /// Projects `other` through this term's n stabilizer projectors, which
    /// collapses it onto `λ·|ψ̂_self⟩`; the overlap is then read off the
    /// projected amplitude at this term's anchor.
    pub fn overlap(&self, other: &StabTerm) -> Complex64 {
        debug_assert_eq!(self.num_qubits(), other.num_qubits());
        if self.is_vanished() || other.is_vanished() {
            return Complex64::new(0.0, 0.0);
        }
        let mut projected = other.clone();
        for k in 0..self.num_qubits() {
            let generator = self.tableau.stabilizer(k).clone();
            projected.project_pauli(&generator);
            if projected.is_vanished() {
                return Complex64::new(0.0, 0.0);
            }
        }
        let at_anchor = projected.amplitude_at(&self.ref_basis);
        self.amp.conj() * at_anchor * exp2_int(self.support_dim())
    }

    /// Adds `⟨b|v⟩` into `out[b]` for every basis state, walking the 2^s
    /// support points in Gray-code order (one group element per step).
    ///
    /// # Panics
    /// Panics if `out` is shorter than `2^n`.
    pub fn accumulate_statevector(&self, out: &mut [Complex64]) {
        if self.is_vanished() {
            return;
        }
        let support = self.support_basis();
        let dim = support.pivots.len();
        let mut basis = self.ref_basis.clone();
        let mut amp = self.amp;
        out[basis.as_index()] += amp;
        for step in 1u64..(1u64 << dim) {
            let flip = step.trailing_zeros() as usize;
            let row = &support.rows[support.pivots[flip].1];
            let (next, factor) = row.apply_to_basis(&basis);
            basis = next;
            amp *= factor;
            out[basis.as_index()] += amp;
        }
    }
}

/// `2^k` as f64, exact for every k that fits a support dimension.
fn exp2_int(k: usize) -> f64 {
    f64::from(2u32).powi(i32::try_from(k).expect("support dimension fits i32"))
}
