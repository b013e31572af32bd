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

use std::fmt;

use num_bigint::BigInt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::gate::{Gate, GateKind};
use crate::sims_rngs::seed::rng_from_optional_seed;

/// An ordered gate sequence over a declared number of qubits.
///
/// A circuit is a plain value: it can be composed (`append`, `tensor`) and
/// serialized freely. Gate names and operand counts are validated as gates
/// are added; operand *ranges* are validated when a state is built from the
/// circuit, so a circuit may temporarily name qubits it does not have.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

macro_rules! single_qubit_apply {
    ($(#[$meta:meta])* $fn_name:ident, $gate_ctor:ident) => {
        $(#[$meta])*
        pub fn $fn_name(&mut self, qubit: usize) -> &mut Self {
            self.gates.push(Gate::$gate_ctor(qubit));
            self
        }
    };
}

macro_rules! two_qubit_apply {
    ($(#[$meta:meta])* $fn_name:ident, $gate_ctor:ident) => {
        $(#[$meta])*
        /// # Errors
        /// Value error when both operands name the same qubit.
        pub fn $fn_name(&mut self, q1: usize, q2: usize) -> Result<&mut Self, SimError> {
            self.gates.push(Gate::$gate_ctor(q1, q2)?);
            Ok(self)
        }
    };
}

impl Circuit {
    /// An empty circuit over `num_qubits` qubits.
    #[must_use]
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    #[must_use]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Number of gates.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Number of T-type gates; the state built from this circuit has
    /// stabilizer rank `2^t_count`.
    #[must_use]
    pub fn t_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_t_type()).count()
    }

    /// Appends an already-validated gate.
    pub fn push(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    /// Appends a gate by name, case-insensitively.
    ///
    /// # Errors
    /// Value error for an unknown name, a wrong operand count, or repeated
    /// operands on a two-qubit gate.
    pub fn apply_gate(&mut self, name: &str, qubits: &[usize]) -> Result<&mut Self, SimError> {
        let kind = GateKind::from_name(name)?;
        self.gates.push(Gate::new(kind, qubits.to_vec())?);
        Ok(self)
    }

    single_qubit_apply!(apply_h, h);
    single_qubit_apply!(apply_x, x);
    single_qubit_apply!(apply_y, y);
    single_qubit_apply!(apply_z, z);
    single_qubit_apply!(apply_s, s);
    single_qubit_apply!(apply_sdg, sdg);
    single_qubit_apply!(apply_sx, sx);
    single_qubit_apply!(apply_sxdg, sxdg);
    single_qubit_apply!(apply_t, t);
    single_qubit_apply!(apply_tdg, tdg);

    two_qubit_apply!(apply_cx, cx);
    two_qubit_apply!(apply_cz, cz);
    two_qubit_apply!(apply_swap, swap);

    /// Concatenates another circuit's gates after this one's.
    ///
    /// # Errors
    /// Value error when the qubit counts differ.
    pub fn append(&mut self, other: &Circuit) -> Result<&mut Self, SimError> {
        if self.num_qubits != other.num_qubits {
            return Err(SimError::Value(format!(
                "cannot append a {}-qubit circuit to a {}-qubit circuit",
                other.num_qubits, self.num_qubits
            )));
        }
        self.gates.extend(other.gates.iter().cloned());
        Ok(self)
    }

    /// The tensor product: `other`'s qubits are shifted up by
    /// `self.num_qubits()` and its gates follow this circuit's.
    #[must_use]
    pub fn tensor(&self, other: &Circuit) -> Circuit {
        let offset = self.num_qubits;
        let mut gates = self.gates.clone();
        for gate in &other.gates {
            let shifted: Vec<usize> = gate.qubits().iter().map(|&q| q + offset).collect();
            gates.push(Gate::new(gate.kind(), shifted).expect("shifting preserves validity"));
        }
        Circuit {
            num_qubits: self.num_qubits + other.num_qubits,
            gates,
        }
    }

    /// A pseudo-random Clifford circuit: alternating layers of uniformly
    /// drawn single-qubit Cliffords on every qubit and one two-qubit
    /// Clifford on a random pair.
    ///
    /// This is a practical proxy sampler, not an exactly uniform draw from
    /// the Clifford group; what it does guarantee is gate-for-gate
    /// determinism for a fixed seed.
    ///
    /// # Errors
    /// Seed overflow for a negative seed or one wider than 256 bits.
    pub fn random_clifford(num_qubits: usize, seed: Option<&BigInt>) -> Result<Self, SimError> {
        let mut rng = rng_from_optional_seed(seed)?;
        let mut circuit = Circuit::new(num_qubits);
        let layers = 3 * num_qubits.max(1);
        for _ in 0..layers {
            for qubit in 0..num_qubits {
                let kind = GateKind::SINGLE_QUBIT_CLIFFORDS
                    [rng.random_range(0..GateKind::SINGLE_QUBIT_CLIFFORDS.len())];
                circuit
                    .gates
                    .push(Gate::new(kind, vec![qubit]).expect("single-qubit gate is valid"));
            }
            if num_qubits >= 2 {
                let q1 = rng.random_range(0..num_qubits);
                let mut q2 = rng.random_range(0..num_qubits - 1);
                if q2 >= q1 {
                    q2 += 1;
                }
                let kind = GateKind::TWO_QUBIT_CLIFFORDS
                    [rng.random_range(0..GateKind::TWO_QUBIT_CLIFFORDS.len())];
                circuit
                    .gates
                    .push(Gate::new(kind, vec![q1, q2]).expect("operands are distinct"));
            }
        }
        log::debug!(
            "sampled random Clifford circuit: {} qubits, {} gates",
            num_qubits,
            circuit.len()
        );
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit(num_qubits={})", self.num_qubits)?;
        for gate in &self.gates {
            writeln!(f, "  {gate}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Circuit: {} qubits, {} gates>",
            self.num_qubits,
            self.gates.len()
        )
    }
}
