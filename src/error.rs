// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt;

/// An error from an operation on [`Numeric`](crate::Numeric) values.
///
/// Every fallible operation reports at most one of these kinds. Allocation
/// failure is not represented: digit buffers live in `Vec`s, whose
/// allocator aborts rather than reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// A divisor with no nonzero digit.
    DivisionByZero,
    /// An unparseable string, the logarithm of a non-positive value, the
    /// square root of a negative value, zero raised to a negative power, a
    /// negative value raised to a non-integral power, or an integer
    /// conversion of NaN.
    InvalidArgument,
    /// A weight or display scale outside the signed 16-bit range, an `exp`
    /// argument too large to be representable, a parse that violates its
    /// precision bound, or an integer conversion that overflows.
    ValueOutOfRange,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => f.write_str("division by zero"),
            NumericError::InvalidArgument => f.write_str("invalid numeric argument"),
            NumericError::ValueOutOfRange => f.write_str("numeric value out of range"),
        }
    }
}

impl Error for NumericError {}
