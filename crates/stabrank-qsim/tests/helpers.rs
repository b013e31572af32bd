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
use stabrank_core::{Circuit, Gate, GateKind, PauliString};

/// Compares two state vectors exactly (including global phase).
#[allow(dead_code)]
pub fn assert_states_close(actual: &[Complex64], expected: &[Complex64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "state lengths differ");
    for (index, (a, b)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - b).norm() < tolerance,
            "states differ at index {index}: {a} vs {b}"
        );
    }
}

/// A plain dense-statevector simulator used as the reference
/// implementation in cross-checks. Qubit 0 is the least significant bit.
#[allow(dead_code)]
pub struct DenseSim {
    num_qubits: usize,
    amps: Vec<Complex64>,
}

#[allow(dead_code)]
impl DenseSim {
    pub fn new(num_qubits: usize) -> Self {
        let mut amps = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amps[0] = Complex64::new(1.0, 0.0);
        Self { num_qubits, amps }
    }

    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut sim = Self::new(circuit.num_qubits());
        for gate in circuit.gates() {
            sim.apply_gate(gate);
        }
        sim
    }

    pub fn state(&self) -> &[Complex64] {
        &self.amps
    }

    fn apply_single(&mut self, target: usize, matrix: [[Complex64; 2]; 2]) {
        let step = 1 << target;
        for base in (0..self.amps.len()).step_by(2 * step) {
            for offset in 0..step {
                let i0 = base + offset;
                let i1 = i0 + step;
                let (a, b) = (self.amps[i0], self.amps[i1]);
                self.amps[i0] = matrix[0][0] * a + matrix[0][1] * b;
                self.amps[i1] = matrix[1][0] * a + matrix[1][1] * b;
            }
        }
    }

    pub fn apply_gate(&mut self, gate: &Gate) {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let q = gate.qubits();
        match gate.kind() {
            GateKind::H => self.apply_single(q[0], [[h, h], [h, -h]]),
            GateKind::X => self.apply_single(q[0], [[zero, one], [one, zero]]),
            GateKind::Y => self.apply_single(q[0], [[zero, -i], [i, zero]]),
            GateKind::Z => self.apply_single(q[0], [[one, zero], [zero, -one]]),
            GateKind::S => self.apply_single(q[0], [[one, zero], [zero, i]]),
            GateKind::Sdg => self.apply_single(q[0], [[one, zero], [zero, -i]]),
            GateKind::Sx => self.apply_single(
                q[0],
                [
                    [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
                    [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
                ],
            ),
            GateKind::Sxdg => self.apply_single(
                q[0],
                [
                    [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
                    [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
                ],
            ),
            GateKind::T => self.apply_single(
                q[0],
                [[one, zero], [zero, Complex64::from_polar(1.0, FRAC_PI_4)]],
            ),
            GateKind::Tdg => self.apply_single(
                q[0],
                [[one, zero], [zero, Complex64::from_polar(1.0, -FRAC_PI_4)]],
            ),
            GateKind::Cx => {
                let (c, t) = (1usize << q[0], 1usize << q[1]);
                for idx in 0..self.amps.len() {
                    if idx & c != 0 && idx & t == 0 {
                        self.amps.swap(idx, idx | t);
                    }
                }
            }
            GateKind::Cz => {
                let (c, t) = (1usize << q[0], 1usize << q[1]);
                for idx in 0..self.amps.len() {
                    if idx & c != 0 && idx & t != 0 {
                        self.amps[idx] = -self.amps[idx];
                    }
                }
            }
            GateKind::Swap => {
                let (a, b) = (1usize << q[0], 1usize << q[1]);
                for idx in 0..self.amps.len() {
                    if idx & a != 0 && idx & b == 0 {
                        self.amps.swap(idx, idx ^ a ^ b);
                    }
                }
            }
        }
    }

    /// `P|ψ⟩` as a fresh vector.
    fn apply_pauli(&self, pauli: &PauliString) -> Vec<Complex64> {
        let mut x_mask = 0usize;
        let mut z_mask = 0usize;
        let mut y_count = 0u32;
        for qubit in 0..pauli.num_qubits() {
            let x = pauli.x_bits().get(qubit);
            let z = pauli.z_bits().get(qubit);
            if x {
                x_mask |= 1 << qubit;
            }
            if z {
                z_mask |= 1 << qubit;
            }
            if x && z {
                y_count += 1;
            }
        }
        let base_phase = pauli.phase().to_complex()
            * match y_count % 4 {
                0 => Complex64::new(1.0, 0.0),
                1 => Complex64::new(0.0, 1.0),
                2 => Complex64::new(-1.0, 0.0),
                _ => Complex64::new(0.0, -1.0),
            };
        let mut out = vec![Complex64::new(0.0, 0.0); self.amps.len()];
        for (idx, amp) in self.amps.iter().enumerate() {
            let sign = if (idx & z_mask).count_ones() % 2 == 1 {
                -1.0
            } else {
                1.0
            };
            out[idx ^ x_mask] = base_phase * sign * amp;
        }
        out
    }

    pub fn exp_value(&self, pauli: &PauliString) -> f64 {
        let moved = self.apply_pauli(pauli);
        self.amps
            .iter()
            .zip(&moved)
            .map(|(a, b)| (a.conj() * b).re)
            .sum()
    }

    pub fn inner_product(&self, other: &DenseSim) -> Complex64 {
        self.amps
            .iter()
            .zip(&other.amps)
            .map(|(a, b)| a.conj() * b)
            .sum()
    }

    /// `(I + (-1)^outcome Z_q)/2` followed by renormalization.
    pub fn project_normalized(&mut self, qubit: usize, outcome: bool) {
        let mask = 1usize << qubit;
        for (idx, amp) in self.amps.iter_mut().enumerate() {
            if (idx & mask != 0) != outcome {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        let norm: f64 = self.amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        assert!(norm > 0.0, "projected reference state onto a zero branch");
        for amp in &mut self.amps {
            *amp /= norm;
        }
    }
}
