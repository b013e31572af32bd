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

use std::collections::HashMap;
use std::fmt;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::Zero;
use rand::Rng;

use stabrank_core::sims_rngs::seed::rng_from_optional_seed;
use stabrank_core::{Circuit, GateKind, PauliString, SimError, SimRng};

use crate::row::PauliRow;
use crate::term::StabTerm;

/// Probability mass below which a projection outcome counts as impossible,
/// relative to the state's squared norm.
const ZERO_PROBABILITY_TOL: f64 = 1e-12;

/// A pure state held as a weighted sum of stabilizer states,
/// `|Ψ⟩ = Σ_k c_k |ψ_k⟩`, all over the same qubit count.
///
/// Clifford gates act on every term in place; each T-type gate doubles the
/// number of terms, so a circuit with t such gates yields rank `2^t`. No
/// term is ever dropped, however small its coefficient — annihilated terms
/// stay as explicit zeros.
///
/// The sum is not forcibly normalized: building from a unitary circuit gives
/// `norm() ≈ 1` by construction, and only `measure` and
/// `project_normalized` rescale.
#[derive(Clone, Debug)]
pub struct StabSum {
    num_qubits: usize,
    terms: Vec<StabTerm>,
}

impl StabSum {
    /// Folds a circuit into a stabilizer sum, starting from `|0…0⟩`.
    ///
    /// # Errors
    /// Value error when any gate names a qubit outside the circuit; the
    /// whole circuit is validated before any gate is applied.
    pub fn from_circuit(circuit: &Circuit) -> Result<Self, SimError> {
        let n = circuit.num_qubits();
        for gate in circuit.gates() {
            if let Some(&q) = gate.qubits().iter().find(|&&q| q >= n) {
                return Err(SimError::Value(format!(
                    "gate {gate} names qubit {q}, but the circuit has {n} qubits"
                )));
            }
        }

        let mut terms = vec![StabTerm::new_zero(n)];
        for gate in circuit.gates() {
            match gate.kind() {
                GateKind::T | GateKind::Tdg => {
                    let q = gate.qubits()[0];
                    let dagger = gate.kind() == GateKind::Tdg;
                    let mut doubled = Vec::with_capacity(terms.len() * 2);
                    for term in &terms {
                        let (identity_branch, z_branch) = term.t_inject(q, dagger);
                        doubled.push(identity_branch);
                        doubled.push(z_branch);
                    }
                    terms = doubled;
                }
                _ => {
                    for term in &mut terms {
                        term.apply_gate(gate);
                    }
                }
            }
        }
        log::debug!(
            "folded circuit: {n} qubits, {} gates, stabilizer rank {}",
            circuit.len(),
            terms.len()
        );
        Ok(Self {
            num_qubits: n,
            terms,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of stabilizer terms currently held.
    #[inline]
    #[must_use]
    pub fn stabilizer_rank(&self) -> usize {
        self.terms.len()
    }

    /// `√⟨Ψ|Ψ⟩` via the pairwise stabilizer inner-product kernel.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.inner_self().max(0.0).sqrt()
    }

    /// `⟨Ψ|Ψ⟩`, which is real: diagonal norms plus twice the real part of
    /// the upper-triangle overlaps.
    fn inner_self(&self) -> f64 {
        let mut total = 0.0;
        for (j, term_j) in self.terms.iter().enumerate() {
            total += term_j.norm_sqr();
            for term_k in &self.terms[j + 1..] {
                total += 2.0 * term_j.overlap(term_k).re;
            }
        }
        total
    }

    /// `⟨Ψ|P|Ψ⟩` without normalization.
    fn expectation_raw(&self, p: &PauliRow) -> f64 {
        let mut total = 0.0;
        for (j, term_j) in self.terms.iter().enumerate() {
            if !term_j.is_vanished() {
                let diagonal = term_j.tableau().pauli_expectation(p);
                if diagonal != 0 {
                    total += f64::from(diagonal) * term_j.norm_sqr();
                }
            }
            for term_k in &self.terms[j + 1..] {
                if term_k.is_vanished() {
                    continue;
                }
                let mut moved = term_k.clone();
                moved.apply_pauli(p);
                total += 2.0 * term_j.overlap(&moved).re;
            }
        }
        total
    }

    /// The expectation value `⟨Ψ|P|Ψ⟩` of a Pauli observable.
    ///
    /// Does not renormalize; on a unit-norm state this is the physical
    /// expectation.
    ///
    /// # Errors
    /// Value error when `pauli`'s width differs from the state's qubit
    /// count, or its phase is `±i` (the observable would not be Hermitian).
    pub fn exp_value(&self, pauli: &PauliString) -> Result<f64, SimError> {
        if pauli.num_qubits() != self.num_qubits {
            return Err(SimError::Value(format!(
                "Pauli acts on {} qubits, state has {}",
                pauli.num_qubits(),
                self.num_qubits
            )));
        }
        if !pauli.phase().is_real() {
            return Err(SimError::Value(
                "expectation of a Pauli with phase ±i is not real".into(),
            ));
        }
        Ok(self.expectation_raw(&PauliRow::from_pauli_string(pauli)))
    }

    /// `⟨self|other⟩`: `a.inner_product(b)` puts `a` on the bra side.
    ///
    /// # Errors
    /// Value error when the qubit counts differ.
    pub fn inner_product(&self, other: &StabSum) -> Result<Complex64, SimError> {
        if self.num_qubits != other.num_qubits {
            return Err(SimError::Value(format!(
                "qubit count mismatch: {} vs {}",
                self.num_qubits, other.num_qubits
            )));
        }
        let mut total = Complex64::zero();
        for term_j in &self.terms {
            for term_k in &other.terms {
                total += term_j.overlap(term_k);
            }
        }
        Ok(total)
    }

    fn validate_measurement_qubits(&self, qubits: &[usize]) -> Result<(), SimError> {
        for (i, &q) in qubits.iter().enumerate() {
            if q >= self.num_qubits {
                return Err(SimError::Value(format!(
                    "qubit index {q} out of range for {} qubits",
                    self.num_qubits
                )));
            }
            if qubits[..i].contains(&q) {
                return Err(SimError::Value(format!(
                    "duplicate qubit index {q} in measurement list"
                )));
            }
        }
        Ok(())
    }

    /// Measures the given qubits in order, collapsing the state.
    ///
    /// Each qubit's outcome is drawn from the Born probability
    /// `⟨Ψ|(I∓Z_q)/2|Ψ⟩ / ⟨Ψ|Ψ⟩`; the matching projector is applied to
    /// every term without rescaling (later qubits need the relative
    /// weights), and one final rescale restores unit norm. An empty qubit
    /// list is a no-op returning an empty vector.
    ///
    /// # Errors
    /// Value error for duplicate or out-of-range indices; seed overflow for
    /// a seed outside the 256-bit range. The state is untouched on error.
    pub fn measure(
        &mut self,
        qubits: &[usize],
        seed: Option<&BigInt>,
    ) -> Result<Vec<bool>, SimError> {
        self.validate_measurement_qubits(qubits)?;
        let mut rng = rng_from_optional_seed(seed)?;
        if qubits.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.measure_with_rng(qubits, &mut rng))
    }

    fn measure_with_rng<R: SimRng>(&mut self, qubits: &[usize], rng: &mut R) -> Vec<bool> {
        let mut outcomes = Vec::with_capacity(qubits.len());
        for &q in qubits {
            let total = self.inner_self();
            assert!(total > 0.0, "measured state has vanished");
            let z_expectation = self.expectation_raw(&PauliRow::z_on(self.num_qubits, q, false));
            let p_one = ((total - z_expectation) / (2.0 * total)).clamp(0.0, 1.0);
            let outcome = rng.random::<f64>() < p_one;

            let projector = PauliRow::z_on(self.num_qubits, q, outcome);
            for term in &mut self.terms {
                term.project_pauli(&projector);
            }
            outcomes.push(outcome);
        }
        let total = self.inner_self();
        assert!(total > 0.0, "collapsed branch has zero weight");
        let rescale = Complex64::new(1.0 / total.sqrt(), 0.0);
        for term in &mut self.terms {
            term.scale(rescale);
        }
        outcomes
    }

    /// Repeats `measure` on `shots` independent clones and tallies the
    /// outcome bitstrings (ordered as the input list).
    ///
    /// Shots that reach the same partial outcome share the collapsed state:
    /// conditional branch probabilities are memoized, so the heavy
    /// projections run once per distinct branch rather than once per shot.
    /// Outcomes are identical to measuring fresh clones shot by shot.
    ///
    /// # Errors
    /// Value error for an empty qubit list (unlike `measure`), duplicate or
    /// out-of-range indices; seed overflow for an oversized seed.
    pub fn sample(
        &self,
        qubits: &[usize],
        shots: usize,
        seed: Option<&BigInt>,
    ) -> Result<HashMap<String, usize>, SimError> {
        if qubits.is_empty() {
            return Err(SimError::Value(
                "sampling requires at least one target qubit".into(),
            ));
        }
        self.validate_measurement_qubits(qubits)?;
        let mut rng = rng_from_optional_seed(seed)?;

        struct Branch {
            state: StabSum,
            p_one: f64,
        }
        let mut cache: HashMap<Vec<bool>, Branch> = HashMap::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for _ in 0..shots {
            let mut prefix: Vec<bool> = Vec::with_capacity(qubits.len());
            for (depth, &q) in qubits.iter().enumerate() {
                if !cache.contains_key(prefix.as_slice()) {
                    let state = if depth == 0 {
                        self.clone()
                    } else {
                        let parent = &cache[&prefix[..depth - 1]];
                        let mut collapsed = parent.state.clone();
                        let projector = PauliRow::z_on(
                            self.num_qubits,
                            qubits[depth - 1],
                            prefix[depth - 1],
                        );
                        for term in &mut collapsed.terms {
                            term.project_pauli(&projector);
                        }
                        collapsed
                    };
                    let total = state.inner_self();
                    assert!(total > 0.0, "sampled branch has zero weight");
                    let z_expectation =
                        state.expectation_raw(&PauliRow::z_on(self.num_qubits, q, false));
                    let p_one = ((total - z_expectation) / (2.0 * total)).clamp(0.0, 1.0);
                    cache.insert(prefix.clone(), Branch { state, p_one });
                }
                let outcome = rng.random::<f64>() < cache[prefix.as_slice()].p_one;
                prefix.push(outcome);
            }
            let key: String = prefix.iter().map(|&b| if b { '1' } else { '0' }).collect();
            *counts.entry(key).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Projects qubit `q` onto the given outcome and renormalizes.
    ///
    /// # Errors
    /// Value error when `q` is out of range or the outcome has probability
    /// zero; the state is untouched on error.
    pub fn project_normalized(&mut self, q: usize, outcome: bool) -> Result<(), SimError> {
        if q >= self.num_qubits {
            return Err(SimError::Value(format!(
                "qubit index {q} out of range for {} qubits",
                self.num_qubits
            )));
        }
        let before = self.inner_self();
        let mut projected = self.clone();
        let projector = PauliRow::z_on(self.num_qubits, q, outcome);
        for term in &mut projected.terms {
            term.project_pauli(&projector);
        }
        let after = projected.inner_self();
        if after <= before * ZERO_PROBABILITY_TOL {
            return Err(SimError::Value(format!(
                "projection of qubit {q} onto outcome {} has probability 0",
                u8::from(outcome)
            )));
        }
        let rescale = Complex64::new(1.0 / after.sqrt(), 0.0);
        for term in &mut projected.terms {
            term.scale(rescale);
        }
        *self = projected;
        Ok(())
    }

    /// Materializes the full complex vector, qubit 0 least significant.
    ///
    /// Costs `O(rank · n · 2^n)`; meant for small systems.
    #[must_use]
    pub fn to_statevector(&self) -> Vec<Complex64> {
        let mut out = vec![Complex64::new(0.0, 0.0); 1usize << self.num_qubits];
        for term in &self.terms {
            term.accumulate_statevector(&mut out);
        }
        out
    }
}

impl fmt::Display for StabSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StabSum(num_qubits={}, stabilizer_rank={})",
            self.num_qubits,
            self.terms.len()
        )
    }
}
