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
use std::str::FromStr;

use crate::bits::BitVec;
use crate::error::SimError;
use crate::pauli::{product_i_exponent, Pauli};
use crate::phase::Phase;

/// How a Pauli string prints back.
///
/// Sparse operators remember the token order they were parsed in, so
/// `"X1 Y3 Z0"` round-trips verbatim. Derived operators (products, builders)
/// print densely.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    Dense,
    Sparse(Vec<usize>),
}

/// A Pauli operator over `n` qubits: two bit-vectors (x, z) and a global
/// phase in `{+1, -1, +i, -i}`.
///
/// Per-qubit letters decode as I=(0,0), X=(1,0), Y=(1,1), Z=(0,1). Two text
/// encodings are accepted: dense (`"IXYZ"`, position = qubit index) and
/// sparse (`"X1 Z3 Y0"`, unique indices). The empty string and `"I"` both
/// denote the identity.
#[derive(Clone, PartialEq, Eq)]
pub struct PauliString {
    phase: Phase,
    xs: BitVec,
    zs: BitVec,
    layout: Layout,
}

impl PauliString {
    /// The identity operator over `num_qubits` qubits.
    #[must_use]
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            phase: Phase::PlusOne,
            xs: BitVec::zeros(num_qubits),
            zs: BitVec::zeros(num_qubits),
            layout: Layout::Dense,
        }
    }

    /// A single-qubit Pauli embedded in an `num_qubits`-wide identity.
    ///
    /// # Errors
    /// Value error if `qubit >= num_qubits`.
    pub fn from_single(num_qubits: usize, qubit: usize, pauli: Pauli) -> Result<Self, SimError> {
        if qubit >= num_qubits {
            return Err(SimError::Value(format!(
                "qubit index {qubit} out of range for {num_qubits} qubits"
            )));
        }
        let mut out = Self::identity(num_qubits);
        out.xs.set(qubit, pauli.x_bit());
        out.zs.set(qubit, pauli.z_bit());
        Ok(out)
    }

    /// Parses the dense encoding: `^[IXYZ]+$`, uppercase, no whitespace.
    ///
    /// # Errors
    /// Value error on an unknown letter, lowercase letters, whitespace, or an
    /// empty body other than the empty string (which is the identity).
    pub fn from_dense(s: &str) -> Result<Self, SimError> {
        if s.is_empty() {
            return Ok(Self::identity(1));
        }
        let mut paulis = Vec::with_capacity(s.len());
        for ch in s.chars() {
            let pauli = match ch {
                'I' => Pauli::I,
                'X' => Pauli::X,
                'Y' => Pauli::Y,
                'Z' => Pauli::Z,
                c if c.is_whitespace() => {
                    return Err(SimError::Value(
                        "whitespace is not allowed in a dense Pauli string".into(),
                    ))
                }
                c if "ixyz".contains(c) => {
                    return Err(SimError::Value(format!(
                        "lowercase letter '{c}' in dense Pauli string"
                    )))
                }
                c => {
                    return Err(SimError::Value(format!(
                        "unknown letter '{c}' in dense Pauli string"
                    )))
                }
            };
            paulis.push(pauli);
        }
        let mut out = Self::identity(paulis.len());
        for (qubit, pauli) in paulis.iter().enumerate() {
            out.xs.set(qubit, pauli.x_bit());
            out.zs.set(qubit, pauli.z_bit());
        }
        Ok(out)
    }

    /// Parses the sparse encoding: whitespace-separated `[IXYZ]<index>`
    /// tokens, case-insensitive letters, unique indices. Identity tokens are
    /// accepted and ignored. Width is the largest non-identity index plus one.
    ///
    /// # Errors
    /// Value error on an unknown letter, a missing / duplicate / negative /
    /// non-integer / zero-padded index.
    pub fn from_sparse(s: &str) -> Result<Self, SimError> {
        let mut sites: Vec<(Pauli, usize)> = Vec::new();
        let mut seen: Vec<usize> = Vec::new();
        for token in s.split_whitespace() {
            let mut chars = token.chars();
            let letter = chars.next().expect("split_whitespace yields no empty tokens");
            let pauli = match letter {
                'I' | 'i' => Pauli::I,
                'X' | 'x' => Pauli::X,
                'Y' | 'y' => Pauli::Y,
                'Z' | 'z' => Pauli::Z,
                c => {
                    return Err(SimError::Value(format!(
                        "unknown letter '{c}' in sparse Pauli token '{token}'"
                    )))
                }
            };
            let digits = chars.as_str();
            if digits.is_empty() {
                return Err(SimError::Value(format!(
                    "missing qubit index in sparse Pauli token '{token}'"
                )));
            }
            if !digits.bytes().all(|b| b.is_ascii_digit()) || (digits.len() > 1 && digits.starts_with('0')) {
                return Err(SimError::Value(format!(
                    "invalid qubit index '{digits}' in sparse Pauli token '{token}'"
                )));
            }
            let index: usize = digits.parse().map_err(|_| {
                SimError::Value(format!(
                    "invalid qubit index '{digits}' in sparse Pauli token '{token}'"
                ))
            })?;
            if seen.contains(&index) {
                return Err(SimError::Value(format!(
                    "duplicate qubit index {index} in sparse Pauli string"
                )));
            }
            seen.push(index);
            if pauli != Pauli::I {
                sites.push((pauli, index));
            }
        }
        let num_qubits = sites.iter().map(|&(_, q)| q + 1).max().unwrap_or(1);
        let mut out = Self::identity(num_qubits);
        let mut order = Vec::with_capacity(sites.len());
        for &(pauli, qubit) in &sites {
            out.xs.set(qubit, pauli.x_bit());
            out.zs.set(qubit, pauli.z_bit());
            order.push(qubit);
        }
        out.layout = Layout::Sparse(order);
        Ok(out)
    }

    #[inline]
    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn x_bits(&self) -> &BitVec {
        &self.xs
    }

    #[inline]
    #[must_use]
    pub fn z_bits(&self) -> &BitVec {
        &self.zs
    }

    /// The single-qubit Pauli acting on `qubit`.
    #[must_use]
    pub fn pauli_at(&self, qubit: usize) -> Pauli {
        Pauli::from_bits(self.xs.get(qubit), self.zs.get(qubit))
    }

    /// True when every site is the identity (any global phase).
    #[must_use]
    pub fn is_identity(&self) -> bool {
        !self.xs.any() && !self.zs.any()
    }

    /// Number of non-identity sites.
    #[must_use]
    pub fn weight(&self) -> usize {
        let mut count = 0;
        for (a, b) in self.xs.words().iter().zip(self.zs.words()) {
            count += (a | b).count_ones() as usize;
        }
        count
    }

    /// True iff the symplectic overlap `sum_i (x1_i z2_i + z1_i x2_i)` is even.
    ///
    /// # Errors
    /// Value error if the widths differ.
    pub fn commutes_with(&self, other: &Self) -> Result<bool, SimError> {
        self.check_width(other)?;
        Ok(!(self.xs.parity_and(&other.zs) ^ self.zs.parity_and(&other.xs)))
    }

    /// The operator product `self * other`, phases combined site by site.
    ///
    /// # Errors
    /// Value error if the widths differ.
    pub fn multiply(&self, other: &Self) -> Result<Self, SimError> {
        self.check_width(other)?;
        let exponent = product_i_exponent(&self.xs, &self.zs, &other.xs, &other.zs);
        let mut xs = self.xs.clone();
        let mut zs = self.zs.clone();
        xs.xor_with(&other.xs);
        zs.xor_with(&other.zs);
        Ok(Self {
            phase: self
                .phase
                .multiply(other.phase)
                .multiply(Phase::from_i_exponent(exponent)),
            xs,
            zs,
            layout: Layout::Dense,
        })
    }

    fn check_width(&self, other: &Self) -> Result<(), SimError> {
        if self.num_qubits() == other.num_qubits() {
            Ok(())
        } else {
            Err(SimError::Value(format!(
                "Pauli width mismatch: {} vs {} qubits",
                self.num_qubits(),
                other.num_qubits()
            )))
        }
    }
}

impl FromStr for PauliString {
    type Err = SimError;

    /// Auto-detects the encoding: any digit or whitespace selects the sparse
    /// grammar, everything else is parsed densely.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().any(|c| c.is_ascii_digit() || c.is_whitespace()) {
            Self::from_sparse(s)
        } else {
            Self::from_dense(s)
        }
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layout {
            Layout::Dense => {
                if self.is_identity() && self.num_qubits() == 1 {
                    return write!(f, "I");
                }
                for qubit in 0..self.num_qubits() {
                    write!(f, "{}", self.pauli_at(qubit).letter())?;
                }
                Ok(())
            }
            Layout::Sparse(order) => {
                if order.is_empty() {
                    return write!(f, "I");
                }
                for (i, &qubit) in order.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}{}", self.pauli_at(qubit).letter(), qubit)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PauliString('{self}')")
    }
}
