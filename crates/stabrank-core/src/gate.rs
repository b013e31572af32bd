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

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// The supported gate set: Cliffords plus the two T-type gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    // Paulis
    X,
    Y,
    Z,

    // Hadamard
    H,

    // Sqrt of Paulis
    S,
    Sdg,
    Sx,
    Sxdg,

    // Two-qubit Cliffords
    Cx,
    Cz,
    Swap,

    // Non-Cliffords
    T,
    Tdg,
}

impl GateKind {
    /// The single-qubit Clifford kinds, in canonical order.
    pub const SINGLE_QUBIT_CLIFFORDS: [GateKind; 8] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::Sdg,
        GateKind::Sx,
        GateKind::Sxdg,
    ];

    /// The two-qubit Clifford kinds, in canonical order.
    pub const TWO_QUBIT_CLIFFORDS: [GateKind; 3] = [GateKind::Cx, GateKind::Cz, GateKind::Swap];

    /// Looks a gate up by name, case-insensitively.
    ///
    /// # Errors
    /// Value error for a name outside the gate set.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name.to_ascii_uppercase().as_str() {
            "H" => Ok(GateKind::H),
            "X" => Ok(GateKind::X),
            "Y" => Ok(GateKind::Y),
            "Z" => Ok(GateKind::Z),
            "S" => Ok(GateKind::S),
            "SDG" => Ok(GateKind::Sdg),
            "SX" => Ok(GateKind::Sx),
            "SXDG" => Ok(GateKind::Sxdg),
            "CX" => Ok(GateKind::Cx),
            "CZ" => Ok(GateKind::Cz),
            "SWAP" => Ok(GateKind::Swap),
            "T" => Ok(GateKind::T),
            "TDG" => Ok(GateKind::Tdg),
            _ => Err(SimError::Value(format!("unknown gate name '{name}'"))),
        }
    }

    /// Canonical uppercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::Sdg => "SDG",
            GateKind::Sx => "SX",
            GateKind::Sxdg => "SXDG",
            GateKind::Cx => "CX",
            GateKind::Cz => "CZ",
            GateKind::Swap => "SWAP",
            GateKind::T => "T",
            GateKind::Tdg => "TDG",
        }
    }

    /// Number of operand qubits.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            GateKind::Cx | GateKind::Cz | GateKind::Swap => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn is_clifford(self) -> bool {
        !self.is_t_type()
    }

    #[must_use]
    pub fn is_t_type(self) -> bool {
        matches!(self, GateKind::T | GateKind::Tdg)
    }
}

/// A named gate applied to specific qubits.
///
/// Operand *ranges* are not validated here; a circuit is a plain value and
/// only meets a qubit count when a state is built from it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    kind: GateKind,
    qubits: Vec<usize>,
}

macro_rules! single_qubit_ctor {
    ($(#[$meta:meta])* $fn_name:ident, $kind:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $fn_name(qubit: usize) -> Self {
            Self { kind: $kind, qubits: vec![qubit] }
        }
    };
}

macro_rules! two_qubit_ctor {
    ($(#[$meta:meta])* $fn_name:ident, $kind:expr) => {
        $(#[$meta])*
        /// # Errors
        /// Value error when both operands name the same qubit.
        pub fn $fn_name(q1: usize, q2: usize) -> Result<Self, SimError> {
            Self::new($kind, vec![q1, q2])
        }
    };
}

impl Gate {
    /// Builds a gate, checking operand count and distinctness.
    ///
    /// # Errors
    /// Value error when the operand count does not match the gate's arity or
    /// a two-qubit gate is given twice the same qubit.
    pub fn new(kind: GateKind, qubits: Vec<usize>) -> Result<Self, SimError> {
        if qubits.len() != kind.arity() {
            return Err(SimError::Value(format!(
                "gate {} takes {} qubit(s), got {}",
                kind.name(),
                kind.arity(),
                qubits.len()
            )));
        }
        if kind.arity() == 2 && qubits[0] == qubits[1] {
            return Err(SimError::Value(format!(
                "gate {} requires two distinct qubits, got {} twice",
                kind.name(),
                qubits[0]
            )));
        }
        Ok(Self { kind, qubits })
    }

    single_qubit_ctor!(h, GateKind::H);
    single_qubit_ctor!(x, GateKind::X);
    single_qubit_ctor!(y, GateKind::Y);
    single_qubit_ctor!(z, GateKind::Z);
    single_qubit_ctor!(s, GateKind::S);
    single_qubit_ctor!(sdg, GateKind::Sdg);
    single_qubit_ctor!(
        /// Square root of X.
        sx,
        GateKind::Sx
    );
    single_qubit_ctor!(sxdg, GateKind::Sxdg);
    single_qubit_ctor!(t, GateKind::T);
    single_qubit_ctor!(tdg, GateKind::Tdg);

    two_qubit_ctor!(cx, GateKind::Cx);
    two_qubit_ctor!(cz, GateKind::Cz);
    two_qubit_ctor!(swap, GateKind::Swap);

    #[inline]
    #[must_use]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Canonical uppercase gate name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    #[must_use]
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    #[inline]
    #[must_use]
    pub fn is_clifford(&self) -> bool {
        self.kind.is_clifford()
    }

    #[inline]
    #[must_use]
    pub fn is_t_type(&self) -> bool {
        self.kind.is_t_type()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Gate: {self}>")
    }
}
