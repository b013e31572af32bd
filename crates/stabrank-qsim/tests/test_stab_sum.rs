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

mod helpers;

use num_bigint::BigInt;
use stabrank_core::Circuit;
use stabrank_qsim::StabSum;

/// (|000⟩ + |100⟩ + |010⟩ + |111⟩)/2 via a 7-T-gate Toffoli decomposition
/// on superposed controls.
fn toffoli_circuit() -> Circuit {
    let mut circuit = Circuit::new(3);
    circuit.apply_h(0);
    circuit.apply_h(1);

    circuit.apply_h(2);
    circuit.apply_cx(1, 2).unwrap();
    circuit.apply_tdg(2);
    circuit.apply_cx(0, 2).unwrap();
    circuit.apply_t(2);
    circuit.apply_cx(1, 2).unwrap();
    circuit.apply_tdg(2);
    circuit.apply_cx(0, 2).unwrap();

    circuit.apply_t(1);
    circuit.apply_t(2);
    circuit.apply_cx(0, 1).unwrap();
    circuit.apply_h(2);

    circuit.apply_t(0);
    circuit.apply_tdg(1);
    circuit.apply_cx(0, 1).unwrap();
    circuit
}

fn toffoli_state() -> StabSum {
    StabSum::from_circuit(&toffoli_circuit()).unwrap()
}

mod initialization {
    use super::*;
    use num_complex::Complex64;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_bell_state() {
        let mut circuit = Circuit::new(2);
        circuit.apply_h(0);
        circuit.apply_cx(0, 1).unwrap();
        let state = StabSum::from_circuit(&circuit).unwrap();

        assert_eq!(state.num_qubits(), 2);
        assert_eq!(state.stabilizer_rank(), 1);
        helpers::assert_states_close(
            &state.to_statevector(),
            &[
                Complex64::new(FRAC_1_SQRT_2, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(FRAC_1_SQRT_2, 0.0),
            ],
            1e-10,
        );
        assert!((state.exp_value(&"ZZ".parse().unwrap()).unwrap() - 1.0).abs() < 1e-10);
        assert!((state.exp_value(&"XX".parse().unwrap()).unwrap() - 1.0).abs() < 1e-10);
        assert!(state.exp_value(&"ZI".parse().unwrap()).unwrap().abs() < 1e-10);
    }

    #[test]
    fn test_h_t_single_qubit() {
        let mut circuit = Circuit::new(1);
        circuit.apply_h(0);
        circuit.apply_t(0);
        let state = StabSum::from_circuit(&circuit).unwrap();

        assert_eq!(state.stabilizer_rank(), 2);
        assert!((state.norm() - 1.0).abs() < 1e-10);
        helpers::assert_states_close(
            &state.to_statevector(),
            &[
                Complex64::new(FRAC_1_SQRT_2, 0.0),
                Complex64::new(0.5, 0.5),
            ],
            1e-10,
        );
    }

    #[test]
    fn test_h_t_cx_two_qubits() {
        let mut circuit = Circuit::new(2);
        circuit.apply_h(0);
        circuit.apply_t(0);
        circuit.apply_cx(0, 1).unwrap();
        let state = StabSum::from_circuit(&circuit).unwrap();

        assert_eq!(state.num_qubits(), 2);
        assert_eq!(state.stabilizer_rank(), 2);
        helpers::assert_states_close(
            &state.to_statevector(),
            &[
                Complex64::new(FRAC_1_SQRT_2, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.5, 0.5),
            ],
            1e-10,
        );
        assert!((state.norm() - 1.0).abs() < 1e-10);
        assert_eq!(
            state.to_string(),
            "StabSum(num_qubits=2, stabilizer_rank=2)"
        );
    }

    #[test]
    fn test_rank_doubles_per_t_gate() {
        let state = toffoli_state();
        assert_eq!(state.stabilizer_rank(), 1 << 7);
        assert!((state.norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_out_of_range_gate_rejected() {
        let mut circuit = Circuit::new(2);
        circuit.apply_h(0);
        circuit.apply_t(3);
        circuit.apply_cx(0, 1).unwrap();
        assert!(StabSum::from_circuit(&circuit).is_err());
    }

    #[test]
    fn test_norm_stays_one_over_random_clifford_t_circuits() {
        for seed in 0..4u64 {
            let mut circuit = Circuit::random_clifford(3, Some(&BigInt::from(seed))).unwrap();
            circuit.apply_t(0);
            circuit.apply_tdg(2);
            circuit
                .append(&Circuit::random_clifford(3, Some(&BigInt::from(seed + 100))).unwrap())
                .unwrap();
            let state = StabSum::from_circuit(&circuit).unwrap();
            assert_eq!(state.stabilizer_rank(), 4);
            assert!(
                (state.norm() - 1.0).abs() < 1e-10,
                "norm drifted for seed {seed}"
            );
        }
    }
}

mod calculation {
    use super::*;

    #[test]
    fn test_toffoli_expectation_value() {
        let state = toffoli_state();
        let value = state.exp_value(&"ZII".parse().unwrap()).unwrap();
        assert!((value - 0.5).abs() < 1e-10, "got {value}");
    }

    #[test]
    fn test_expectation_width_mismatch() {
        let state = toffoli_state();
        assert!(state.exp_value(&"ZZIIII".parse().unwrap()).is_err());
        assert!(state.exp_value(&"Z0 Y2 X4".parse().unwrap()).is_err());
        assert!(state.exp_value(&"ZI".parse().unwrap()).is_err());
    }

    #[test]
    fn test_expectation_bounded_by_norm() {
        let state = toffoli_state();
        let norm_sqr = state.norm().powi(2);
        for pauli in ["XXX", "ZZZ", "XYZ", "IZI", "YYI"] {
            let value = state.exp_value(&pauli.parse().unwrap()).unwrap();
            assert!(
                value.abs() <= norm_sqr + 1e-10,
                "|⟨{pauli}⟩| = {value} exceeds norm² = {norm_sqr}"
            );
        }
    }

    #[test]
    fn test_inner_product_identical_states() {
        let state1 = toffoli_state();
        let state2 = toffoli_state();
        let value = state1.inner_product(&state2).unwrap();
        assert!((value.re - 1.0).abs() < 1e-10);
        assert!(value.im.abs() < 1e-10);
    }

    #[test]
    fn test_inner_product_qubit_count_mismatch() {
        let state = toffoli_state();

        let mut large = Circuit::new(4);
        large.apply_h(0);
        let large_state = StabSum::from_circuit(&large).unwrap();
        assert!(state.inner_product(&large_state).is_err());

        let mut small = Circuit::new(2);
        small.apply_h(0);
        let small_state = StabSum::from_circuit(&small).unwrap();
        assert!(state.inner_product(&small_state).is_err());
    }

    #[test]
    fn test_inner_product_argument_order() {
        // a.inner_product(b) is ⟨a|b⟩: the bra is the receiver.
        let zero = StabSum::from_circuit(&Circuit::new(1)).unwrap();

        let mut circuit = Circuit::new(1);
        circuit.apply_h(0);
        circuit.apply_s(0);
        circuit.apply_h(0);
        // HSH|0⟩ = ((1+i)|0⟩ + (1-i)|1⟩)/2
        let rotated = StabSum::from_circuit(&circuit).unwrap();

        let forward = zero.inner_product(&rotated).unwrap();
        assert!((forward.re - 0.5).abs() < 1e-10);
        assert!((forward.im - 0.5).abs() < 1e-10);

        let backward = rotated.inner_product(&zero).unwrap();
        assert!((backward - forward.conj()).norm() < 1e-10);
    }
}

mod measurement {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_toffoli_sampling() {
        let state = toffoli_state();
        let shots = 10_000;
        let counts = state
            .sample(&[0, 1, 2], shots, Some(&BigInt::from(42u8)))
            .unwrap();

        assert_eq!(counts.values().sum::<usize>(), shots);
        for outcome in ["000", "100", "010", "111"] {
            let count = counts.get(outcome).copied().unwrap_or(0);
            assert!(count > 0, "expected outcome {outcome} never observed");
            let frequency = count as f64 / shots as f64;
            assert!(
                (frequency - 0.25).abs() < 0.05,
                "frequency of {outcome} was {frequency}"
            );
        }
        for outcome in counts.keys() {
            assert!(
                ["000", "100", "010", "111"].contains(&outcome.as_str()),
                "impossible outcome {outcome} observed"
            );
        }
    }

    #[test]
    fn test_sampling_respects_qubit_order() {
        let state = toffoli_state();
        let counts = state
            .sample(&[2, 1, 0], 10_000, Some(&BigInt::from(40u8)))
            .unwrap();
        for outcome in ["000", "001", "010", "111"] {
            assert!(
                counts.contains_key(outcome),
                "expected outcome {outcome} missing"
            );
        }
    }

    #[test]
    fn test_sampling_determinism() {
        let state = toffoli_state();
        let seed = BigInt::from(7u8);
        let a = state.sample(&[0, 1, 2], 200, Some(&seed)).unwrap();
        let b = state.sample(&[0, 1, 2], 200, Some(&seed)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sampling_argument_errors() {
        let state = toffoli_state();
        assert!(state.sample(&[0, 1, 2, 3], 10, None).is_err());
        assert!(state.sample(&[0, 0], 10, None).is_err());
        assert!(state.sample(&[], 10, None).is_err());
    }

    #[test]
    fn test_measurement_collapses_to_consistent_branch() {
        for trial in 0..10u64 {
            let mut state = toffoli_state();
            let outcome = state
                .measure(&[0, 1, 2], Some(&BigInt::from(trial)))
                .unwrap();
            let bits: String = outcome.iter().map(|&b| if b { '1' } else { '0' }).collect();
            assert!(
                ["000", "100", "010", "111"].contains(&bits.as_str()),
                "unexpected measurement result {bits}"
            );

            // Collapsed state is a single computational basis state.
            let statevector = state.to_statevector();
            let heavy: Vec<usize> = statevector
                .iter()
                .enumerate()
                .filter(|(_, amp)| amp.norm() > 1e-10)
                .map(|(idx, _)| idx)
                .collect();
            assert_eq!(heavy.len(), 1, "statevector is not one-hot");
            assert!((statevector[heavy[0]].norm() - 1.0).abs() < 1e-10);

            // Re-measuring the collapsed state is deterministic.
            let again = state.measure(&[0, 1, 2], None).unwrap();
            assert_eq!(outcome, again);
        }
    }

    #[test]
    fn test_measurement_argument_errors() {
        let mut state = toffoli_state();
        assert!(state.measure(&[0, 0], None).is_err());
        assert!(state.measure(&[0, 1, 10], None).is_err());
    }

    #[test]
    fn test_measure_empty_list_is_noop() {
        let mut state = toffoli_state();
        let before = state.to_statevector();
        let outcome = state.measure(&[], None).unwrap();
        assert!(outcome.is_empty());
        helpers::assert_states_close(&state.to_statevector(), &before, 1e-12);
    }

    #[test]
    fn test_deterministic_measurement_leaves_state() {
        let mut state = StabSum::from_circuit(&Circuit::new(1)).unwrap();
        for _ in 0..5 {
            let outcome = state.measure(&[0], None).unwrap();
            assert_eq!(outcome, vec![false]);
        }
        helpers::assert_states_close(
            &state.to_statevector(),
            &[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            1e-12,
        );
    }

    #[test]
    fn test_projection_renormalizes() {
        let mut circuit = Circuit::new(1);
        circuit.apply_h(0);
        let mut state = StabSum::from_circuit(&circuit).unwrap();
        state.project_normalized(0, true).unwrap();

        assert!((state.norm() - 1.0).abs() < 1e-10);
        helpers::assert_states_close(
            &state.to_statevector(),
            &[Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            1e-10,
        );
    }

    #[test]
    fn test_projection_onto_impossible_outcome() {
        let mut state = StabSum::from_circuit(&Circuit::new(1)).unwrap();
        let err = state.project_normalized(0, true);
        assert!(err.is_err());
        // Failed projection leaves the state untouched.
        helpers::assert_states_close(
            &state.to_statevector(),
            &[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            1e-12,
        );
        assert!(state.project_normalized(1, false).is_err());
    }

    #[test]
    fn test_projection_then_measurement_is_stable() {
        let mut state = toffoli_state();
        state.project_normalized(0, true).unwrap();
        let outcome = state.measure(&[0], None).unwrap();
        assert_eq!(outcome, vec![true]);
        assert!((state.norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_measurement_determinism_with_seed() {
        let seed = BigInt::from(9_001u32);
        let mut a = toffoli_state();
        let mut b = toffoli_state();
        assert_eq!(
            a.measure(&[0, 1, 2], Some(&seed)).unwrap(),
            b.measure(&[0, 1, 2], Some(&seed)).unwrap()
        );
    }
}
