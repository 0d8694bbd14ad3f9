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

//! Transcendental functions over working values: square root, exponential,
//! logarithms, and exponentiation. All of these compute at an augmented
//! local scale and lean on the fast division path, so callers must expect
//! noise in the last digit or two beyond the requested scale.

use std::cmp::Ordering;

use crate::arith::{add, cmp, div, div_fast, mul, select_div_scale, sub};
use crate::conv::{to_f64, to_i64};
use crate::error::NumericError;
use crate::var::{
    NumericVar, Sign, DEC_DIGITS, MAX_DISPLAY_SCALE, MAX_RESULT_SCALE, MIN_DISPLAY_SCALE,
    MIN_SIG_DIGITS, MUL_GUARD_DIGITS, NBASE,
};

/// Computes the square root of `arg` by Newton's method, to `rscale`
/// fractional digits. Negative input is invalid; zero yields zero at the
/// requested scale.
pub(crate) fn sqrt(arg: &NumericVar, rscale: i32) -> Result<NumericVar, NumericError> {
    let local_rscale = rscale + 8;

    match cmp(arg, &NumericVar::zero()) {
        Ordering::Equal => return Ok(NumericVar::zero_with_dscale(rscale)),
        Ordering::Less => return Err(NumericError::InvalidArgument),
        Ordering::Greater => {}
    }

    // Initial guess: halve the first limb and the weight.
    let mut result = NumericVar {
        sign: Sign::Pos,
        weight: arg.weight / 2,
        dscale: 0,
        digits: vec![(arg.digits[0] / 2).max(1)],
    };
    let mut last_val = result.clone();

    // x <- (x + arg/x) / 2, until the iterates stop moving at local scale.
    loop {
        let quotient = div_fast(arg, &result, local_rscale, true)?;
        result = add(&result, &quotient);
        result = mul(&result, &NumericVar::one_half(), local_rscale);

        if cmp(&last_val, &result) == Ordering::Equal {
            break;
        }
        last_val = result.clone();
    }

    result.round(rscale);
    Ok(result)
}

/// Raises *e* to the power of `arg`, to `rscale` fractional digits.
///
/// The argument is split as `e^x = e^xint * e^xfrac`: the fractional part
/// goes through the Taylor kernel, whose limited input range keeps the
/// series short, and the integer part is applied by raising `e` to it with
/// binary exponentiation.
pub(crate) fn exp(arg: &NumericVar, rscale: i32) -> Result<NumericVar, NumericError> {
    let mut x = arg.clone();
    let mut xneg = false;
    if x.sign == Sign::Neg {
        xneg = true;
        x.sign = Sign::Pos;
    }

    // Consume positive-weight limbs to extract the integer part.
    let mut xintval = 0i32;
    while x.weight >= 0 {
        xintval *= NBASE;
        if !x.digits.is_empty() {
            xintval += i32::from(x.digits[0]);
            x.digits.remove(0);
        }
        x.weight -= 1;
        if xintval >= MAX_RESULT_SCALE * 3 {
            return Err(NumericError::ValueOutOfRange);
        }
    }

    let local_rscale = rscale + MUL_GUARD_DIGITS * 2;

    let mut result = exp_series(&x, local_rscale)?;

    if xintval > 0 {
        let e = exp_series(&NumericVar::one(), local_rscale)?;
        let e_int = power_int(&e, xintval, local_rscale)?;
        result = mul(&e_int, &result, local_rscale);
    }

    // Compensate for the input sign, and round to the requested scale.
    if xneg {
        result = div_fast(&NumericVar::one(), &result, rscale, true)?;
    } else {
        result.round(rscale);
    }
    Ok(result)
}

/// Taylor kernel for `e^x` over `0 <= x <= 1`. The result is good to at
/// least `rscale` digits but is not rounded; the caller does that.
fn exp_series(arg: &NumericVar, rscale: i32) -> Result<NumericVar, NumericError> {
    debug_assert!(arg.sign == Sign::Pos);

    let mut x = arg.clone();
    let mut local_rscale = rscale + 8;

    // Halve the input until it is at most 0.01, counting the halvings.
    let one_half = NumericVar::one_half();
    let threshold = NumericVar::zero_point_01();
    let mut ndiv2 = 0;
    while cmp(&x, &threshold) == Ordering::Greater {
        ndiv2 += 1;
        local_rscale += 1;
        let dscale = x.dscale;
        x = mul(&x, &one_half, dscale + 1);
    }

    // exp(x) = 1 + x + x^2/2! + x^3/3! + ...
    //
    // Run the series until the terms vanish at local scale.
    let one = NumericVar::one();
    let mut result = add(&one, &x);
    let mut xpow = x.clone();
    let mut ifac = one.clone();
    let mut ni = one.clone();

    loop {
        ni = add(&ni, &one);
        xpow = mul(&xpow, &x, local_rscale);
        ifac = mul(&ifac, &ni, 0);
        let elem = div_fast(&xpow, &ifac, local_rscale, true)?;

        if elem.digits.is_empty() {
            break;
        }

        result = add(&result, &elem);
    }

    // Square the result once per halving of the argument.
    for _ in 0..ndiv2 {
        result = mul(&result, &result, local_rscale);
    }

    Ok(result)
}

/// Computes the natural logarithm of `arg`, to `rscale` fractional digits.
/// Non-positive input is invalid.
pub(crate) fn ln(arg: &NumericVar, rscale: i32) -> Result<NumericVar, NumericError> {
    if cmp(arg, &NumericVar::zero()) != Ordering::Greater {
        return Err(NumericError::InvalidArgument);
    }

    let mut local_rscale = rscale + 8;

    // Reduce the input into (0.9, 1.1) by repeated square roots, doubling
    // the compensation factor each time.
    let mut x = arg.clone();
    let two = NumericVar::two();
    let mut fact = two.clone();
    let lower = NumericVar::zero_point_nine();
    let upper = NumericVar::one_point_one();
    while cmp(&x, &lower) != Ordering::Greater {
        local_rscale += 1;
        x = sqrt(&x, local_rscale)?;
        fact = mul(&fact, &two, 0);
    }
    while cmp(&x, &upper) != Ordering::Less {
        local_rscale += 1;
        x = sqrt(&x, local_rscale)?;
        fact = mul(&fact, &two, 0);
    }

    // ln(x) = fact * (z + z^3/3 + z^5/5 + ...) with z = (x-1)/(x+1); after
    // the reduction z lies in roughly (-0.053, 0.048), so the series
    // converges tolerably. The factor 2 of the textbook series is folded
    // into fact's starting value.
    let one = NumericVar::one();
    let numerator = sub(&x, &one);
    let denominator = add(&x, &one);
    let mut sum = div_fast(&numerator, &denominator, local_rscale, true)?;
    let mut zpow = sum.clone();
    let zsq = mul(&sum, &sum, local_rscale);
    let mut ni = one;

    loop {
        ni = add(&ni, &two);
        zpow = mul(&zpow, &zsq, local_rscale);
        let elem = div_fast(&zpow, &ni, local_rscale, true)?;

        if elem.digits.is_empty() {
            break;
        }

        sum = add(&sum, &elem);

        if elem.weight < sum.weight - local_rscale * 2 / DEC_DIGITS {
            break;
        }
    }

    // Undo the range reduction; mul rounds to the requested scale.
    Ok(mul(&sum, &fact, rscale))
}

/// Computes the logarithm of `num` in base `base`. This routine chooses the
/// result scale itself, by the same rule as `ln`.
pub(crate) fn log(base: &NumericVar, num: &NumericVar) -> Result<NumericVar, NumericError> {
    // Approximate decimal digits before the decimal point.
    let dec_digits = (num.weight + 1) * DEC_DIGITS;

    let mut rscale = if dec_digits > 1 {
        MIN_SIG_DIGITS - (f64::from(dec_digits - 1)).log10() as i32
    } else if dec_digits < 1 {
        MIN_SIG_DIGITS - (f64::from(1 - dec_digits)).log10() as i32
    } else {
        MIN_SIG_DIGITS
    };
    rscale = rscale
        .max(base.dscale)
        .max(num.dscale)
        .max(MIN_DISPLAY_SCALE)
        .min(MAX_DISPLAY_SCALE);

    let local_rscale = rscale + 8;

    let mut ln_base = ln(base, local_rscale)?;
    let mut ln_num = ln(num, local_rscale)?;
    ln_base.dscale = rscale;
    ln_num.dscale = rscale;

    let div_rscale = select_div_scale(&ln_num, &ln_base);
    div_fast(&ln_num, &ln_base, div_rscale, true)
}

/// Raises `base` to the power `exponent`. This routine chooses the result
/// scale itself. The caller has already rejected a negative base with a
/// non-integral exponent and zero raised to a negative power.
pub(crate) fn power(base: &NumericVar, exponent: &NumericVar) -> Result<NumericVar, NumericError> {
    // An exponent with no fractional limbs may fit a machine integer, in
    // which case binary exponentiation is exact and much cheaper.
    if exponent.digits.is_empty() || exponent.ndigits() <= exponent.weight + 1 {
        let mut x = exponent.clone();
        if let Some(expval64) = to_i64(&mut x) {
            if let Ok(expval) = i32::try_from(expval64) {
                let rscale = MIN_SIG_DIGITS
                    .max(base.dscale)
                    .max(MIN_DISPLAY_SCALE)
                    .min(MAX_DISPLAY_SCALE);
                return power_int(base, expval, rscale);
            }
        }
    }

    // Avoid ln(0) when zero is raised to a positive non-integer.
    if base.digits.is_empty() {
        return Ok(NumericVar::zero_with_dscale(MIN_SIG_DIGITS));
    }

    // The ln() runs need extra accuracy here, so roughly double the usual
    // significance before the final exp() rounding.
    let dec_digits = (base.weight + 1) * DEC_DIGITS;
    let mut rscale = if dec_digits > 1 {
        MIN_SIG_DIGITS * 2 - (f64::from(dec_digits - 1)).log10() as i32
    } else if dec_digits < 1 {
        MIN_SIG_DIGITS * 2 - (f64::from(1 - dec_digits)).log10() as i32
    } else {
        MIN_SIG_DIGITS * 2
    };
    rscale = rscale
        .max(base.dscale * 2)
        .max(exponent.dscale * 2)
        .max(MIN_DISPLAY_SCALE * 2)
        .min(MAX_DISPLAY_SCALE * 2);

    let local_rscale = rscale + 8;

    let ln_base = ln(base, local_rscale)?;
    let ln_num = mul(&ln_base, exponent, local_rscale);

    // log10(result) = ln_num * log10(e) approximates the decimal weight of
    // the result; pick a scale that leaves MIN_SIG_DIGITS significant
    // digits after it.
    let mut val = to_f64(&ln_num);
    val *= 0.434294481903252;
    val = val.max(-f64::from(MAX_RESULT_SCALE)).min(f64::from(MAX_RESULT_SCALE));

    let exp_rscale = (MIN_SIG_DIGITS - val as i32)
        .max(base.dscale)
        .max(exponent.dscale)
        .max(MIN_DISPLAY_SCALE)
        .min(MAX_DISPLAY_SCALE);

    exp(&ln_num, exp_rscale)
}

/// Raises `base` to an integer power by binary exponentiation, with special
/// cases for -1, 0, 1, and 2. By SQL convention `0^0` is 1.
pub(crate) fn power_int(
    base: &NumericVar,
    exponent: i32,
    rscale: i32,
) -> Result<NumericVar, NumericError> {
    match exponent {
        0 => {
            let mut result = NumericVar::one();
            result.dscale = rscale;
            return Ok(result);
        }
        1 => {
            let mut result = base.clone();
            result.round(rscale);
            return Ok(result);
        }
        -1 => return div(&NumericVar::one(), base, rscale, true),
        2 => return Ok(mul(base, base, rscale)),
        _ => {}
    }

    // Repeatedly square base following the bit pattern of the exponent,
    // carrying some extra precision through the multiplications.
    let neg = exponent < 0;
    let mut e = exponent.unsigned_abs();
    let local_rscale = rscale + MUL_GUARD_DIGITS * 2;

    let mut base_prod = base.clone();
    let mut result = if e & 1 == 1 {
        base.clone()
    } else {
        NumericVar::one()
    };

    loop {
        e >>= 1;
        if e == 0 {
            break;
        }
        base_prod = mul(&base_prod, &base_prod, local_rscale);
        if e & 1 == 1 {
            result = mul(&base_prod, &result, local_rscale);
        }
    }

    // Compensate for the exponent sign, and round to the requested scale.
    if neg {
        result = div_fast(&NumericVar::one(), &result, rscale, true)?;
    } else {
        result.round(rscale);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strconv;

    fn parse(s: &str) -> NumericVar {
        strconv::parse(s).unwrap()
    }

    fn render(mut var: NumericVar) -> String {
        let dscale = var.dscale;
        strconv::to_str(&mut var, dscale)
    }

    #[test]
    fn test_sqrt_converges() {
        assert_eq!(render(sqrt(&parse("4"), 15).unwrap()), "2.000000000000000");
        assert_eq!(
            render(sqrt(&parse("2"), 15).unwrap()),
            "1.414213562373095"
        );
        assert_eq!(
            sqrt(&parse("-1"), 15).unwrap_err(),
            NumericError::InvalidArgument
        );
    }

    #[test]
    fn test_exp_series_bounds() {
        assert_eq!(
            render(exp(&parse("1"), 16).unwrap()),
            "2.7182818284590452"
        );
        assert_eq!(
            exp(&parse("100000000"), 16).unwrap_err(),
            NumericError::ValueOutOfRange
        );
    }

    #[test]
    fn test_ln_range_reduction() {
        assert_eq!(render(ln(&parse("10"), 16).unwrap()), "2.3025850929940457");
        assert_eq!(
            ln(&parse("0"), 16).unwrap_err(),
            NumericError::InvalidArgument
        );
    }

    #[test]
    fn test_power_int_special_cases() {
        assert_eq!(render(power_int(&parse("7"), 0, 2).unwrap()), "1.00");
        assert_eq!(render(power_int(&parse("2"), 31, 0).unwrap()), "2147483648");
        assert_eq!(
            render(power_int(&parse("3"), -1, 16).unwrap()),
            "0.3333333333333333"
        );
    }
}
