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

//! Conversions between working values and machine integers and floats.
//!
//! The float bridges go through decimal text in both directions: a float
//! becomes the shortest string carrying its type's guaranteed significant
//! digits (15 for `f64`, 6 for `f32`) and is re-parsed; a value becomes its
//! display string and is handed to the platform float parser.

use crate::error::NumericError;
use crate::strconv;
use crate::var::{Digit, NumericVar, Sign, NBASE};

/// Builds a working value from an `i64` by repeated division by the base.
/// The result may carry trailing zero limbs; callers strip as needed.
pub(crate) fn from_i64(val: i64) -> NumericVar {
    if val == 0 {
        return NumericVar::zero();
    }

    let sign = if val < 0 { Sign::Neg } else { Sign::Pos };
    let mut uval = val.unsigned_abs();

    // An i64 needs at most five limbs.
    let mut digits: Vec<Digit> = Vec::with_capacity(5);
    while uval != 0 {
        digits.push((uval % NBASE as u64) as Digit);
        uval /= NBASE as u64;
    }
    digits.reverse();

    let weight = digits.len() as i32 - 1;
    NumericVar {
        sign,
        weight,
        dscale: 0,
        digits,
    }
}

/// Rounds `var` to an integer and accumulates it into an `i64`, or returns
/// `None` on overflow. `var` is modified by the rounding.
pub(crate) fn to_i64(var: &mut NumericVar) -> Option<i64> {
    // Round, then re-strip: rounding can cancel all digits.
    var.round(0);
    var.strip();

    if var.digits.is_empty() {
        return Some(0);
    }

    // Stripped trailing zeroes still count as real digits here, so walk
    // weight+1 positions, not just the stored limbs. Accumulate on the
    // negative side so that i64::MIN survives.
    let neg = var.sign == Sign::Neg;
    let mut val: i64 = -i64::from(var.digits[0]);
    for i in 1..=var.weight {
        val = val.checked_mul(i64::from(NBASE))?;
        if i < var.ndigits() {
            val = val.checked_sub(i64::from(var.digits[i as usize]))?;
        }
    }

    if neg {
        Some(val)
    } else {
        val.checked_neg()
    }
}

/// Approximates `var` as an `f64`. Values beyond the float range come back
/// infinite; the caller decides whether that is an error.
pub(crate) fn to_f64(var: &NumericVar) -> f64 {
    strconv::to_str_default(var)
        .parse()
        .expect("formatted numeric is a valid float literal")
}

/// Builds a working value from an `f64`, carrying 15 significant digits.
pub(crate) fn from_f64(val: f64) -> Result<NumericVar, NumericError> {
    if val.is_nan() {
        return Ok(NumericVar::nan());
    }
    if val.is_infinite() {
        return Err(NumericError::InvalidArgument);
    }
    strconv::parse(&shortest(format!("{:.*e}", 14, val)))
}

/// Builds a working value from an `f32`, carrying 6 significant digits.
pub(crate) fn from_f32(val: f32) -> Result<NumericVar, NumericError> {
    if val.is_nan() {
        return Ok(NumericVar::nan());
    }
    if val.is_infinite() {
        return Err(NumericError::InvalidArgument);
    }
    strconv::parse(&shortest(format!("{:.*e}", 5, val)))
}

/// Drops trailing zeroes from the mantissa of an `e`-notation float string,
/// so `1.50000000000000e-1` reads back with display scale 2, not 15.
fn shortest(s: String) -> String {
    match s.find('e') {
        Some(pos) if s[..pos].contains('.') => {
            let mantissa = s[..pos].trim_end_matches('0').trim_end_matches('.');
            format!("{}{}", mantissa, &s[pos..])
        }
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strconv::to_str_default;

    #[test]
    fn test_from_i64() {
        assert_eq!(to_str_default(&from_i64(0)), "0");
        assert_eq!(to_str_default(&from_i64(12345678)), "12345678");
        assert_eq!(to_str_default(&from_i64(-40000)), "-40000");
        assert_eq!(
            to_str_default(&from_i64(i64::MIN)),
            "-9223372036854775808"
        );
    }

    #[test]
    fn test_to_i64_rounds_half_up() {
        let mut v = strconv::parse("7.5").unwrap();
        assert_eq!(to_i64(&mut v), Some(8));

        let mut v = strconv::parse("-7.5").unwrap();
        assert_eq!(to_i64(&mut v), Some(-8));

        let mut v = strconv::parse("0.49").unwrap();
        assert_eq!(to_i64(&mut v), Some(0));
    }

    #[test]
    fn test_to_i64_range() {
        let mut v = strconv::parse("9223372036854775807").unwrap();
        assert_eq!(to_i64(&mut v), Some(i64::MAX));

        let mut v = strconv::parse("-9223372036854775808").unwrap();
        assert_eq!(to_i64(&mut v), Some(i64::MIN));

        let mut v = strconv::parse("9223372036854775808").unwrap();
        assert_eq!(to_i64(&mut v), None);

        let mut v = strconv::parse("-9223372036854775809").unwrap();
        assert_eq!(to_i64(&mut v), None);
    }

    #[test]
    fn test_float_round_trip() {
        assert_eq!(to_str_default(&from_f64(0.1).unwrap()), "0.1");
        assert_eq!(to_str_default(&from_f64(-123.456).unwrap()), "-123.456");
        assert_eq!(to_str_default(&from_f64(0.0).unwrap()), "0");
        assert!(from_f64(f64::NAN).unwrap().is_nan());
        assert_eq!(
            from_f64(f64::INFINITY).unwrap_err(),
            NumericError::InvalidArgument
        );

        assert_eq!(to_str_default(&from_f32(1.5f32).unwrap()), "1.5");
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(&strconv::parse("2.5").unwrap()), 2.5);
        assert_eq!(to_f64(&strconv::parse("-0.125").unwrap()), -0.125);
    }
}
