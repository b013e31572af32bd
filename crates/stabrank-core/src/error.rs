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

use std::error::Error;
use std::{fmt, io};

/// Error type shared by the whole simulator surface.
///
/// Mutating operations validate every argument before touching state, so a
/// returned error implies nothing was modified. Violated *internal*
/// invariants are bugs and panic instead of surfacing here.
#[derive(Debug)]
pub enum SimError {
    /// A violated precondition on user-supplied arguments: unknown gate
    /// names, operand count or qubit-range mismatches, malformed Pauli or
    /// QASM text, probability-zero projections, and the like.
    Value(String),
    /// A seed outside the unsigned 256-bit range.
    SeedOverflow(String),
    /// I/O failure from the QASM file wrappers.
    Io(io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Value(msg) => write!(f, "value error: {msg}"),
            SimError::SeedOverflow(msg) => write!(f, "seed overflow: {msg}"),
            SimError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Io(err)
    }
}
