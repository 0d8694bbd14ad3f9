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

//! bigdec is an arbitrary-precision decimal arithmetic library for Rust.
//!
//! Binary floating point cannot represent common decimal fractions exactly:
//! `0.1` has no finite base-two expansion, so financial and other
//! hand-checkable calculations drift. bigdec instead stores numbers in
//! decimal, as SQL's `NUMERIC` type does, and computes on them exactly.
//!
//! The main types exposed by this library are:
//!
//!  * [`Numeric`], a decimal value of essentially unbounded precision. It
//!    carries an explicit display scale, so `1.10` and `1.1` are equal
//!    values that print differently. A distinguished NaN value propagates
//!    through arithmetic and sorts greater than every other value, which
//!    gives `Numeric` a total order suitable for sorting and indexing.
//!
//!  * [`NumericError`], the failure taxonomy of the fallible operations:
//!    division by zero, invalid arguments (such as the logarithm of a
//!    negative number), and results whose weight or scale leaves the
//!    representable range.
//!
//! Addition, subtraction, and multiplication are exact. Division computes
//! enough digits to guarantee at least 16 significant digits. The
//! transcendental operations ([`Numeric::sqrt`], [`Numeric::exp`],
//! [`Numeric::ln`], [`Numeric::log10`], and [`Numeric::pow`]) select their
//! own result scale the same way and may carry noise in the final digit,
//! as they compute through a fast approximate division path.
//!
//! # Examples
//!
//! ```
//! use bigdec::Numeric;
//!
//! let x: Numeric = ".1".parse()?;
//! let y: Numeric = ".2".parse()?;
//! let z: Numeric = ".3".parse()?;
//!
//! assert_eq!(x + y, z);
//!
//! let q = Numeric::from(1).checked_div(&Numeric::from(3))?;
//! assert_eq!(q.to_string(), "0.33333333333333333333");
//! # Ok::<_, bigdec::NumericError>(())
//! ```
//!
//! The optional `serde` feature serializes values as their display
//! strings.

#![deny(missing_debug_implementations, missing_docs)]

mod arith;
mod conv;
mod error;
mod macros;
mod numeric;
mod strconv;
mod transc;
mod var;

pub use error::NumericError;
pub use numeric::Numeric;
