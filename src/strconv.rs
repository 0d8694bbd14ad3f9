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

//! Conversions between decimal text and working values.
//!
//! The accepted grammar is
//! `{ws}* [+-]? (digits [. digits?] | . digits) ([eE][+-]?digits)? {ws}*`
//! plus the literal `NaN`, case-insensitively. Anything else is an invalid
//! argument.

use crate::arith;
use crate::error::NumericError;
use crate::transc;
use crate::var::{Digit, NumericVar, Sign, DEC_DIGITS, MAX_PRECISION, NBASE};

/// Parses a complete string (leading and trailing whitespace allowed) into
/// a stripped working value.
pub(crate) fn parse(s: &str) -> Result<NumericVar, NumericError> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    // NaN, then nothing but spaces.
    if len - i >= 3 && bytes[i..i + 3].eq_ignore_ascii_case(b"NaN") {
        i += 3;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i != len {
            return Err(NumericError::InvalidArgument);
        }
        return Ok(NumericVar::nan());
    }

    let mut sign = Sign::Pos;
    if i < len {
        match bytes[i] {
            b'+' => i += 1,
            b'-' => {
                sign = Sign::Neg;
                i += 1;
            }
            _ => {}
        }
    }

    let mut have_dp = false;
    if i < len && bytes[i] == b'.' {
        have_dp = true;
        i += 1;
    }

    if i >= len || !bytes[i].is_ascii_digit() {
        return Err(NumericError::InvalidArgument);
    }

    // First extract the decimal digits and find the decimal weight (the
    // power-of-ten position of the most significant digit) and the display
    // scale; conversion to limbs comes after. The buffer carries leading
    // and trailing zero padding so limb packing can read past the ends.
    let mut decdigits: Vec<u8> = Vec::with_capacity(len - i + 2 * DEC_DIGITS as usize);
    decdigits.extend_from_slice(&[0; DEC_DIGITS as usize]);

    let mut dweight: i32 = -1;
    let mut dscale: i32 = 0;
    while i < len {
        let c = bytes[i];
        if c.is_ascii_digit() {
            decdigits.push(c - b'0');
            if !have_dp {
                dweight += 1;
            } else {
                dscale += 1;
            }
            i += 1;
        } else if c == b'.' {
            if have_dp {
                return Err(NumericError::InvalidArgument);
            }
            have_dp = true;
            i += 1;
        } else {
            break;
        }
    }

    let ddigits = decdigits.len() as i32 - DEC_DIGITS;
    decdigits.extend_from_slice(&[0; DEC_DIGITS as usize - 1]);

    // Handle the exponent, if any. The exponent shifts both the weight and
    // the scale; the scale cannot go negative.
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        let mut exp_neg = false;
        if i < len {
            match bytes[i] {
                b'+' => i += 1,
                b'-' => {
                    exp_neg = true;
                    i += 1;
                }
                _ => {}
            }
        }
        let exp_start = i;
        let mut exponent: i32 = 0;
        while i < len && bytes[i].is_ascii_digit() {
            exponent = exponent * 10 + i32::from(bytes[i] - b'0');
            if exponent > MAX_PRECISION {
                return Err(NumericError::InvalidArgument);
            }
            i += 1;
        }
        if i == exp_start {
            return Err(NumericError::InvalidArgument);
        }
        if exp_neg {
            exponent = -exponent;
        }
        dweight += exponent;
        dscale -= exponent;
        if dscale < 0 {
            dscale = 0;
        }
    }

    while i < len && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i != len {
        return Err(NumericError::InvalidArgument);
    }

    // Convert the pure-decimal digit run to base NBASE. offset is the
    // number of decimal zeroes to insert before the first given digit so
    // that the first limb ends at the decimal-point alignment.
    let weight = if dweight >= 0 {
        (dweight + 1 + DEC_DIGITS - 1) / DEC_DIGITS - 1
    } else {
        -((-dweight - 1) / DEC_DIGITS + 1)
    };
    let offset = (weight + 1) * DEC_DIGITS - (dweight + 1);
    let ndigits = (ddigits + offset + DEC_DIGITS - 1) / DEC_DIGITS;

    let mut digits: Vec<Digit> = Vec::with_capacity(ndigits as usize);
    let mut di = (DEC_DIGITS - offset) as usize;
    for _ in 0..ndigits {
        let limb = ((i32::from(decdigits[di]) * 10 + i32::from(decdigits[di + 1])) * 10
            + i32::from(decdigits[di + 2]))
            * 10
            + i32::from(decdigits[di + 3]);
        digits.push(limb as Digit);
        di += DEC_DIGITS as usize;
    }

    let mut var = NumericVar {
        sign,
        weight,
        dscale,
        digits,
    };
    var.strip();
    Ok(var)
}

/// Rounds `var` to `scale` fractional digits and verifies that its
/// significant leading digits fit within `precision - scale`, the way a SQL
/// `NUMERIC(precision, scale)` column constrains its values.
pub(crate) fn apply_precision(
    var: &mut NumericVar,
    precision: i32,
    scale: i32,
) -> Result<(), NumericError> {
    let maxdigits = precision - scale;

    var.round(scale);

    // The check must follow the rounding, which can raise the weight. The
    // weight may also be inflated by leading zeroes not yet stripped, so
    // measure from the first nonzero limb; an all-zero value always fits.
    let mut ddigits = (var.weight + 1) * DEC_DIGITS;
    if ddigits > maxdigits {
        for &dig in &var.digits {
            if dig != 0 {
                // Discount high-order decimal zeroes inside the limb.
                let d = i32::from(dig);
                if d < 10 {
                    ddigits -= 3;
                } else if d < 100 {
                    ddigits -= 2;
                } else if d < 1000 {
                    ddigits -= 1;
                }
                if ddigits > maxdigits {
                    return Err(NumericError::ValueOutOfRange);
                }
                break;
            }
            ddigits -= DEC_DIGITS;
        }
    }
    Ok(())
}

fn push_ascii_digit(out: &mut String, d: i32) {
    out.push(char::from(b'0' + d as u8));
}

/// Renders `var` in plain notation with exactly `dscale` fractional digits.
/// The value is rounded to `dscale` first, so `var` is modified.
pub(crate) fn to_str(var: &mut NumericVar, dscale: i32) -> String {
    let dscale = dscale.max(0);

    // Round to the target scale before printing; rounding may grow the
    // value by a limb at the top.
    var.round(dscale);

    let int_digits = ((var.weight + 1) * DEC_DIGITS).max(1);
    let mut out = String::with_capacity((int_digits + dscale + DEC_DIGITS + 2) as usize);

    if var.sign == Sign::Neg {
        out.push('-');
    }

    // Digits before the decimal point.
    let mut d;
    if var.weight < 0 {
        d = var.weight + 1;
        out.push('0');
    } else {
        d = 0;
        while d <= var.weight {
            let mut dig = var.digit(d);
            if d == 0 {
                // Suppress leading zeroes inside the first limb, but print
                // at least the units place.
                let mut putit = false;
                for pow10 in [1000, 100, 10] {
                    let d1 = dig / pow10;
                    dig -= d1 * pow10;
                    putit |= d1 > 0;
                    if putit {
                        push_ascii_digit(&mut out, d1);
                    }
                }
                push_ascii_digit(&mut out, dig);
            } else {
                for pow10 in [1000, 100, 10] {
                    let d1 = dig / pow10;
                    dig -= d1 * pow10;
                    push_ascii_digit(&mut out, d1);
                }
                push_ascii_digit(&mut out, dig);
            }
            d += 1;
        }
    }

    // The fractional digits, emitted a whole limb at a time and trimmed to
    // exactly dscale characters at the end.
    if dscale > 0 {
        out.push('.');
        let end = out.len() + dscale as usize;
        let mut emitted = 0;
        while emitted < dscale {
            let mut dig = var.digit(d);
            for pow10 in [1000, 100, 10] {
                let d1 = dig / pow10;
                dig -= d1 * pow10;
                push_ascii_digit(&mut out, d1);
            }
            push_ascii_digit(&mut out, dig);
            d += 1;
            emitted += DEC_DIGITS;
        }
        out.truncate(end);
    }

    out
}

/// Renders `var` in scientific notation, `significand e±NN`, with `rscale`
/// fractional digits in the significand and at least two exponent digits.
pub(crate) fn to_str_sci(var: &NumericVar, rscale: i32) -> String {
    let rscale = rscale.max(0);

    // The exponent that leaves exactly one decimal digit before the point.
    // Zero has no meaningful normalized exponent; report it as zero.
    let exponent = if var.digits.is_empty() {
        0
    } else {
        let e = (var.weight + 1) * DEC_DIGITS;
        e - (DEC_DIGITS - int_log10(i32::from(var.digits[0])))
    };

    // Divide out 10^exponent to get the significand, rounding to rscale in
    // the process.
    let denom_scale = if exponent < 0 { -exponent } else { 0 };
    let denominator = transc::power_int(&NumericVar::ten(), exponent, denom_scale)
        .expect("a power of ten is always computable");
    let mut significand = arith::div(var, &denominator, rscale, true)
        .expect("dividing by a power of ten cannot fail");

    format!("{}e{:+03}", to_str(&mut significand, rscale), exponent)
}

/// Number of decimal digits in `d` minus one, for `d` in `1..NBASE`.
fn int_log10(d: i32) -> i32 {
    debug_assert!(d >= 1 && d < NBASE);
    if d >= 1000 {
        3
    } else if d >= 100 {
        2
    } else if d >= 10 {
        1
    } else {
        0
    }
}

/// Renders `var` the way [`to_str`] does with the value's own display
/// scale, without mutating the caller's value.
pub(crate) fn to_str_default(var: &NumericVar) -> String {
    let mut copy = var.clone();
    let dscale = copy.dscale;
    to_str(&mut copy, dscale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let v = parse("0.12").unwrap();
        assert_eq!(v.digits, vec![1200]);
        assert_eq!(v.weight, -1);
        assert_eq!(v.dscale, 2);
        assert_eq!(v.sign, Sign::Pos);

        let v = parse("  -00123.4500  ").unwrap();
        assert_eq!(v.digits, vec![123, 4500]);
        assert_eq!(v.weight, 0);
        assert_eq!(v.dscale, 4);
        assert_eq!(v.sign, Sign::Neg);
    }

    #[test]
    fn test_parse_exponent() {
        let v = parse("1.2e3").unwrap();
        assert_eq!(to_str_default(&v), "1200");

        let v = parse("1.2e-3").unwrap();
        assert_eq!(to_str_default(&v), "0.0012");

        assert!(parse("1e10000").is_err());
    }

    #[test]
    fn test_parse_nan() {
        assert!(parse("NaN").unwrap().is_nan());
        assert!(parse("  nan  ").unwrap().is_nan());
        assert!(parse("NaNx").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", " ", "abc", "1..2", "1.2.3", "5e", "+", "1 2", "12a"] {
            assert!(parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_to_str_suppresses_leading_zeroes_in_first_limb_only() {
        let mut v = parse("10203.045").unwrap();
        assert_eq!(to_str(&mut v, 3), "10203.045");

        let mut v = parse("0.000001").unwrap();
        assert_eq!(to_str(&mut v, 6), "0.000001");
    }

    #[test]
    fn test_to_str_pads_fraction() {
        let mut v = parse("5").unwrap();
        assert_eq!(to_str(&mut v, 3), "5.000");
    }

    #[test]
    fn test_to_str_sci() {
        let v = parse("0.12").unwrap();
        assert_eq!(to_str_sci(&v, 1), "1.2e-01");

        let v = parse("1234").unwrap();
        assert_eq!(to_str_sci(&v, 1), "1.2e+03");

        let v = parse("0").unwrap();
        assert_eq!(to_str_sci(&v, 2), "0.00e+00");
    }

    #[test]
    fn test_apply_precision() {
        let mut v = parse("0.0").unwrap();
        apply_precision(&mut v, 2, 1).unwrap();
        assert_eq!(to_str_default(&v), "0.0");

        let mut v = parse("99.995").unwrap();
        // Rounding to scale 2 yields 100.00, which needs three digits
        // before the decimal point where only two are allowed.
        assert_eq!(
            apply_precision(&mut v, 4, 2).unwrap_err(),
            NumericError::ValueOutOfRange
        );
    }
}
