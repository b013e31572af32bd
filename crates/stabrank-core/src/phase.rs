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

/// Global phase of a Pauli operator: one of `{+1, -1, +i, -i}`.
///
/// Internally a power of `i`; `multiply` adds exponents mod 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Phase {
    #[default]
    PlusOne = 0,
    PlusI = 1,
    MinusOne = 2,
    MinusI = 3,
}

impl Phase {
    /// The phase `i^exponent`.
    #[inline]
    #[must_use]
    pub fn from_i_exponent(exponent: u8) -> Self {
        match exponent % 4 {
            0 => Phase::PlusOne,
            1 => Phase::PlusI,
            2 => Phase::MinusOne,
            _ => Phase::MinusI,
        }
    }

    /// The exponent `k` such that this phase is `i^k`.
    #[inline]
    #[must_use]
    pub fn i_exponent(self) -> u8 {
        self as u8
    }

    #[inline]
    #[must_use]
    pub fn multiply(self, other: Phase) -> Phase {
        Self::from_i_exponent(self.i_exponent() + other.i_exponent())
    }

    #[must_use]
    pub fn conjugate(self) -> Self {
        match self {
            Phase::PlusOne | Phase::MinusOne => self,
            Phase::PlusI => Phase::MinusI,
            Phase::MinusI => Phase::PlusI,
        }
    }

    #[must_use]
    pub fn is_real(self) -> bool {
        matches!(self, Phase::PlusOne | Phase::MinusOne)
    }

    #[must_use]
    pub fn to_complex(self) -> Complex64 {
        match self {
            Phase::PlusOne => Complex64::new(1.0, 0.0),
            Phase::MinusOne => Complex64::new(-1.0, 0.0),
            Phase::PlusI => Complex64::new(0.0, 1.0),
            Phase::MinusI => Complex64::new(0.0, -1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Phase::{MinusI, MinusOne, PlusI, PlusOne};

    #[test]
    fn test_default_phase() {
        assert_eq!(Phase::default(), PlusOne);
    }

    #[test]
    fn test_phase_multiplication() {
        let cases = [
            (PlusOne, PlusOne, PlusOne),
            (PlusOne, MinusI, MinusI),
            (MinusOne, MinusOne, PlusOne),
            (MinusOne, PlusI, MinusI),
            (PlusI, PlusI, MinusOne),
            (PlusI, MinusI, PlusOne),
            (MinusI, MinusI, MinusOne),
            (MinusI, MinusOne, PlusI),
        ];
        for &(lhs, rhs, expected) in &cases {
            assert_eq!(lhs.multiply(rhs), expected, "{lhs:?} * {rhs:?}");
        }
    }

    #[test]
    fn test_i_exponent_round_trip() {
        for k in 0..8u8 {
            assert_eq!(Phase::from_i_exponent(k).i_exponent(), k % 4);
        }
    }

    #[test]
    fn test_phase_conjugation() {
        assert_eq!(PlusOne.conjugate(), PlusOne);
        assert_eq!(MinusOne.conjugate(), MinusOne);
        assert_eq!(PlusI.conjugate(), MinusI);
        assert_eq!(MinusI.conjugate(), PlusI);
    }

    #[test]
    fn test_phase_to_complex() {
        assert_eq!(PlusOne.to_complex(), Complex64::new(1.0, 0.0));
        assert_eq!(MinusI.to_complex(), Complex64::new(0.0, -1.0));
    }
}
