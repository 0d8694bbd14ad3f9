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

//! Signed arithmetic over working values: comparison, addition,
//! subtraction, multiplication, the two division algorithms, remainder,
//! ceiling, and floor. None of these routines accept NaN; the public
//! façade routes NaN before calling in.

use std::cmp::Ordering;

use crate::error::NumericError;
use crate::var::{
    add_abs, cmp_abs, sub_abs, Digit, NumericVar, Sign, DEC_DIGITS, DIV_GUARD_DIGITS, HALF_NBASE,
    MAX_DISPLAY_SCALE, MIN_DISPLAY_SCALE, MIN_SIG_DIGITS, MUL_GUARD_DIGITS, NBASE,
};

/// Compares two values. Zeroes are assumed stripped to no limbs.
pub(crate) fn cmp(var1: &NumericVar, var2: &NumericVar) -> Ordering {
    if var1.digits.is_empty() {
        if var2.digits.is_empty() {
            Ordering::Equal
        } else if var2.sign == Sign::Neg {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    } else if var2.digits.is_empty() {
        if var1.sign == Sign::Pos {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    } else if var1.sign == Sign::Pos {
        if var2.sign == Sign::Neg {
            Ordering::Greater
        } else {
            cmp_abs(var1, var2)
        }
    } else if var2.sign == Sign::Pos {
        Ordering::Less
    } else {
        cmp_abs(var2, var1)
    }
}

pub(crate) fn add(var1: &NumericVar, var2: &NumericVar) -> NumericVar {
    combine(var1, var1.sign, var2, var2.sign)
}

pub(crate) fn sub(var1: &NumericVar, var2: &NumericVar) -> NumericVar {
    combine(var1, var1.sign, var2, var2.sign.flip())
}

/// Computes `±|var1| ± |var2|` given the effective signs of the operands,
/// dispatching to the unsigned primitives. Equal magnitudes of opposite
/// sign produce zero carrying the wider dscale.
fn combine(var1: &NumericVar, sign1: Sign, var2: &NumericVar, sign2: Sign) -> NumericVar {
    if sign1 == sign2 {
        let mut result = add_abs(var1, var2);
        result.sign = sign1;
        result
    } else {
        match cmp_abs(var1, var2) {
            Ordering::Equal => NumericVar::zero_with_dscale(var1.dscale.max(var2.dscale)),
            Ordering::Greater => {
                let mut result = sub_abs(var1, var2);
                result.sign = sign1;
                result
            }
            Ordering::Less => {
                let mut result = sub_abs(var2, var1);
                result.sign = sign2;
                result
            }
        }
    }
}

/// Schoolbook multiplication with deferred carry propagation. The result is
/// rounded to no more than `rscale` fractional decimal digits.
pub(crate) fn mul(var1: &NumericVar, var2: &NumericVar, rscale: i32) -> NumericVar {
    let mut var1ndigits = var1.ndigits();
    let mut var2ndigits = var2.ndigits();

    if var1ndigits == 0 || var2ndigits == 0 {
        return NumericVar::zero_with_dscale(rscale);
    }

    let res_sign = if var1.sign == var2.sign {
        Sign::Pos
    } else {
        Sign::Neg
    };
    let res_weight = var1.weight + var2.weight + 2;

    // If the exact result would have more fractional digits than requested,
    // truncate the computation, keeping guard digits, by pretending the
    // inputs are shorter than they are.
    let mut res_ndigits = var1ndigits + var2ndigits + 1;
    let mut maxdigits = res_weight + 1 + rscale * DEC_DIGITS + MUL_GUARD_DIGITS;
    if res_ndigits > maxdigits {
        if maxdigits < 3 {
            // No useful precision at all in the result.
            return NumericVar::zero_with_dscale(rscale);
        }
        // Force maxdigits odd so the input limb counts can be made equal.
        if maxdigits & 1 == 0 {
            maxdigits += 1;
        }
        if var1ndigits > var2ndigits {
            var1ndigits -= res_ndigits - maxdigits;
            if var1ndigits < var2ndigits {
                var1ndigits = (var1ndigits + var2ndigits) / 2;
                var2ndigits = var1ndigits;
            }
        } else {
            var2ndigits -= res_ndigits - maxdigits;
            if var2ndigits < var1ndigits {
                var2ndigits = (var1ndigits + var2ndigits) / 2;
                var1ndigits = var2ndigits;
            }
        }
        res_ndigits = maxdigits;
        debug_assert_eq!(res_ndigits, var1ndigits + var2ndigits + 1);
    }

    // The accumulator holds signed 32-bit sums. maxdig tracks the maximum
    // possible value of any entry, divided by NBASE-1 to avoid overflowing
    // maxdig itself; a full carry sweep runs whenever the next row could
    // push an entry past i32::MAX.
    let mut dig = vec![0i32; res_ndigits as usize];
    let mut maxdig = 0i32;

    for i1 in (0..var1ndigits as usize).rev() {
        let var1digit = i32::from(var1.digits[i1]);
        if var1digit == 0 {
            continue;
        }

        maxdig += var1digit;
        if maxdig > i32::MAX / (NBASE - 1) {
            let mut carry = 0i32;
            for i in (0..res_ndigits as usize).rev() {
                let mut newdig = dig[i] + carry;
                if newdig >= NBASE {
                    carry = newdig / NBASE;
                    newdig -= carry * NBASE;
                } else {
                    carry = 0;
                }
                dig[i] = newdig;
            }
            debug_assert_eq!(carry, 0);
            maxdig = 1 + var1digit;
        }

        // Add the appropriate multiple of var2 into the accumulator. The
        // row for limb i1 ends at this position:
        let ri = (res_ndigits - var1ndigits) as usize + i1;
        let lo = ri + 1 - var2ndigits as usize;
        for i2 in 0..var2ndigits as usize {
            dig[lo + i2] += var1digit * i32::from(var2.digits[i2]);
        }
    }

    // Final carry propagation, combined with narrowing into limbs.
    let mut digits = vec![0 as Digit; res_ndigits as usize];
    let mut carry = 0i32;
    for i in (0..res_ndigits as usize).rev() {
        let mut newdig = dig[i] + carry;
        if newdig >= NBASE {
            carry = newdig / NBASE;
            newdig -= carry * NBASE;
        } else {
            carry = 0;
        }
        digits[i] = newdig as Digit;
    }
    debug_assert_eq!(carry, 0);

    let mut result = NumericVar {
        sign: res_sign,
        weight: res_weight,
        dscale: 0,
        digits,
    };
    result.round(rscale);
    result.strip();
    result
}

/// Exact long division (Knuth volume 2, Algorithm 4.3.1D). The quotient is
/// computed to exactly `rscale` fractional decimal digits and rounded there
/// when `round` is set, truncated toward zero otherwise.
pub(crate) fn div(
    var1: &NumericVar,
    var2: &NumericVar,
    rscale: i32,
    round: bool,
) -> Result<NumericVar, NumericError> {
    let var1ndigits = var1.ndigits();
    let var2ndigits = var2.ndigits();

    // We must not be handed an unnormalized divisor.
    if var2ndigits == 0 || var2.digits[0] == 0 {
        return Err(NumericError::DivisionByZero);
    }

    if var1ndigits == 0 {
        return Ok(NumericVar::zero_with_dscale(rscale));
    }

    // The weight figured here is correct if the emitted quotient has no
    // leading zero limbs; otherwise strip() fixes things up.
    let res_sign = if var1.sign == var2.sign {
        Sign::Pos
    } else {
        Sign::Neg
    };
    let res_weight = var1.weight - var2.weight;
    let mut res_ndigits = (res_weight + 1 + (rscale + DEC_DIGITS - 1) / DEC_DIGITS).max(1);
    // One extra quotient digit ensures a correct final rounding.
    if round {
        res_ndigits += 1;
    }

    // The working dividend normally needs res_ndigits + var2ndigits limbs,
    // but at least var1ndigits so all of var1 can be loaded into it. Slot 0
    // is a leading zero that receives the normalization carry.
    let div_ndigits = (res_ndigits + var2ndigits).max(var1ndigits);
    let mut dividend = vec![0 as Digit; div_ndigits as usize + 1];
    dividend[1..=var1ndigits as usize].copy_from_slice(&var1.digits);
    let mut divisor = vec![0 as Digit; var2ndigits as usize + 1];
    divisor[1..].copy_from_slice(&var2.digits);

    let mut res_digits = vec![0 as Digit; res_ndigits as usize];

    if var2ndigits == 1 {
        // Single divisor limb: short division (Knuth 4.3.1 exercise 16).
        let divisor1 = i32::from(divisor[1]);
        let mut carry = 0i32;
        for i in 0..res_ndigits as usize {
            carry = carry * NBASE + i32::from(dividend[i + 1]);
            res_digits[i] = (carry / divisor1) as Digit;
            carry %= divisor1;
        }
    } else {
        // The quotient-digit estimate needs the leading divisor limb to be
        // at least NBASE/2; scale both operands up by d to make it so.
        if i32::from(divisor[1]) < HALF_NBASE {
            let d = NBASE / (i32::from(divisor[1]) + 1);

            let mut carry = 0i32;
            for i in (1..=var2ndigits as usize).rev() {
                carry += i32::from(divisor[i]) * d;
                divisor[i] = (carry % NBASE) as Digit;
                carry /= NBASE;
            }
            debug_assert_eq!(carry, 0);

            // At this point only var1ndigits limbs of the dividend can be
            // nonzero; the carry out of the top lands in slot 0.
            let mut carry = 0i32;
            for i in (0..=var1ndigits as usize).rev() {
                carry += i32::from(dividend[i]) * d;
                dividend[i] = (carry % NBASE) as Digit;
                carry /= NBASE;
            }
            debug_assert_eq!(carry, 0);
            debug_assert!(i32::from(divisor[1]) >= HALF_NBASE);
        }

        let divisor1 = i32::from(divisor[1]);
        let divisor2 = i32::from(divisor[2]);

        // Each iteration produces the j'th quotient limb by dividing
        // dividend[j ..= j + var2ndigits] by the divisor.
        for j in 0..res_ndigits as usize {
            // Estimate the quotient limb from the first two dividend limbs.
            let next2digits = i32::from(dividend[j]) * NBASE + i32::from(dividend[j + 1]);

            // A zero window means a zero quotient limb; worth testing to
            // fall out fast on trailing zeroes in the dividend.
            if next2digits == 0 {
                res_digits[j] = 0;
                continue;
            }

            let mut qhat = if i32::from(dividend[j]) == divisor1 {
                NBASE - 1
            } else {
                next2digits / divisor1
            };

            // After this adjustment the estimate is correct or one too
            // high. Using dividend[j+2] is safe since the divisor has at
            // least two limbs.
            while divisor2 * qhat > (next2digits - qhat * divisor1) * NBASE + i32::from(dividend[j + 2])
            {
                qhat -= 1;
            }

            if qhat > 0 {
                // Multiply the divisor by qhat and subtract that from the
                // working dividend; carry tracks the multiplication, borrow
                // the subtraction.
                let mut carry = 0i32;
                let mut borrow = 0i32;
                for i in (0..=var2ndigits as usize).rev() {
                    carry += i32::from(divisor[i]) * qhat;
                    borrow -= carry % NBASE;
                    carry /= NBASE;
                    borrow += i32::from(dividend[j + i]);
                    if borrow < 0 {
                        dividend[j + i] = (borrow + NBASE) as Digit;
                        borrow = -1;
                    } else {
                        dividend[j + i] = borrow as Digit;
                        borrow = 0;
                    }
                }
                debug_assert_eq!(carry, 0);

                // A borrow out of the top limb means qhat was one too
                // large; add the divisor back. Knuth shows this happens
                // only about 3/NBASE of the time.
                if borrow != 0 {
                    qhat -= 1;
                    let mut carry = 0i32;
                    for i in (0..=var2ndigits as usize).rev() {
                        carry += i32::from(dividend[j + i]) + i32::from(divisor[i]);
                        if carry >= NBASE {
                            dividend[j + i] = (carry - NBASE) as Digit;
                            carry = 1;
                        } else {
                            dividend[j + i] = carry as Digit;
                            carry = 0;
                        }
                    }
                    // This carry cancels the borrow above.
                    debug_assert_eq!(carry, 1);
                }
            }

            res_digits[j] = qhat as Digit;
        }
    }

    let mut result = NumericVar {
        sign: res_sign,
        weight: res_weight,
        dscale: 0,
        digits: res_digits,
    };
    if round {
        result.round(rscale);
    } else {
        result.trunc(rscale);
    }
    result.strip();
    Ok(result)
}

/// Approximate division after the FM library: each quotient limb is
/// estimated by floating-point division of the leading limbs, the residual
/// folded into the next position, and a final carry pass cleans up. This is
/// significantly faster than [`div`] but can be wrong in the last few guard
/// digits, so it is used only inside the transcendental routines, where
/// everything is approximate anyway.
pub(crate) fn div_fast(
    var1: &NumericVar,
    var2: &NumericVar,
    rscale: i32,
    round: bool,
) -> Result<NumericVar, NumericError> {
    let var1ndigits = var1.ndigits();
    let var2ndigits = var2.ndigits();

    if var2ndigits == 0 || var2.digits[0] == 0 {
        return Err(NumericError::DivisionByZero);
    }

    if var1ndigits == 0 {
        return Ok(NumericVar::zero_with_dscale(rscale));
    }

    let res_sign = if var1.sign == var2.sign {
        Sign::Pos
    } else {
        Sign::Neg
    };
    let res_weight = var1.weight - var2.weight + 1;
    let div_ndigits = (res_weight + 1 + (rscale + DEC_DIGITS - 1) / DEC_DIGITS + DIV_GUARD_DIGITS)
        .max(DIV_GUARD_DIGITS)
        .max(var1ndigits) as usize;

    // div starts as one zero entry followed by the dividend limbs, extended
    // with zeroes out to the requested precision plus guard digits. Each
    // round stores a quotient digit over one consumed dividend position.
    let mut div = vec![0i32; div_ndigits + 1];
    for i in 0..var1ndigits as usize {
        div[i + 1] = i32::from(var1.digits[i]);
    }

    // Quotient digits are estimated with floating point from the first four
    // limbs of the (current) dividend and of the divisor.
    let mut fdivisor = f64::from(var2.digits[0]);
    for i in 1..4 {
        fdivisor *= f64::from(NBASE);
        if i < var2ndigits {
            fdivisor += f64::from(var2.digits[i as usize]);
        }
    }
    let fdivisorinverse = 1.0 / fdivisor;

    // maxdiv tracks the maximum possible absolute value of any div entry,
    // divided by NBASE-1 so maxdiv itself cannot overflow; when it nears
    // i32::MAX a carry-propagation pass renormalizes.
    let mut maxdiv = 1i32;

    let approx_digit = |f: f64| -> i32 {
        // Truncate toward minus infinity.
        if f >= 0.0 {
            f as i32
        } else {
            f as i32 - 1
        }
    };

    for qi in 0..div_ndigits {
        let mut fdividend = f64::from(div[qi]);
        for i in 1..4usize {
            fdividend *= f64::from(NBASE);
            if qi + i <= div_ndigits {
                fdividend += f64::from(div[qi + i]);
            }
        }
        let mut qdigit = approx_digit(fdividend * fdivisorinverse);

        if qdigit != 0 {
            maxdiv += qdigit.abs();
            if maxdiv > i32::MAX / (NBASE - 1) {
                let mut carry = 0i32;
                for i in ((qi + 1)..=div_ndigits).rev() {
                    let mut newdig = div[i] + carry;
                    if newdig < 0 {
                        carry = -((-newdig - 1) / NBASE) - 1;
                        newdig -= carry * NBASE;
                    } else if newdig >= NBASE {
                        carry = newdig / NBASE;
                        newdig -= carry * NBASE;
                    } else {
                        carry = 0;
                    }
                    div[i] = newdig;
                }
                div[qi] += carry;

                // Everything except possibly div[qi] is back in range.
                maxdiv = (div[qi].abs() / (NBASE - 1)).max(1);

                // Re-estimate: new information may have propagated into the
                // top four dividend limbs.
                let mut fdividend = f64::from(div[qi]);
                for i in 1..4usize {
                    fdividend *= f64::from(NBASE);
                    if qi + i <= div_ndigits {
                        fdividend += f64::from(div[qi + i]);
                    }
                }
                qdigit = approx_digit(fdividend * fdivisorinverse);
                maxdiv += qdigit.abs();
            }

            // Subtract the appropriate multiple of the divisor.
            if qdigit != 0 {
                let istop = (var2ndigits as usize).min(div_ndigits - qi + 1);
                for i in 0..istop {
                    div[qi + i] -= qdigit * i32::from(var2.digits[i]);
                }
            }
        }

        // The consumed dividend position may still be nonzero; fold it into
        // the next position. No overflow worry: it nearly cancels with the
        // subtraction of the divisor.
        div[qi + 1] += div[qi] * NBASE;
        div[qi] = qdigit;
    }

    // Approximate and store the last quotient digit.
    let mut fdividend = f64::from(div[div_ndigits]);
    for _ in 1..4 {
        fdividend *= f64::from(NBASE);
    }
    div[div_ndigits] = approx_digit(fdividend * fdivisorinverse);

    // Final carry propagation, narrowing into limbs.
    let mut digits = vec![0 as Digit; div_ndigits + 1];
    let mut carry = 0i32;
    for i in (0..=div_ndigits).rev() {
        let mut newdig = div[i] + carry;
        if newdig < 0 {
            carry = -((-newdig - 1) / NBASE) - 1;
            newdig -= carry * NBASE;
        } else if newdig >= NBASE {
            carry = newdig / NBASE;
            newdig -= carry * NBASE;
        } else {
            carry = 0;
        }
        digits[i] = newdig as Digit;
    }
    debug_assert_eq!(carry, 0);

    let mut result = NumericVar {
        sign: res_sign,
        weight: res_weight,
        dscale: 0,
        digits,
    };
    if round {
        result.round(rscale);
    } else {
        result.trunc(rscale);
    }
    result.strip();
    Ok(result)
}

/// Chooses the result scale for a division: enough for at least
/// `MIN_SIG_DIGITS` significant digits of quotient, never less than either
/// input's display scale, clamped to the display-scale limits.
pub(crate) fn select_div_scale(var1: &NumericVar, var2: &NumericVar) -> i32 {
    // Get the normalized weight and first limb of each input.
    let mut weight1 = 0;
    let mut firstdigit1 = 0;
    for i in 0..var1.ndigits() {
        firstdigit1 = var1.digit(i);
        if firstdigit1 != 0 {
            weight1 = var1.weight - i;
            break;
        }
    }

    let mut weight2 = 0;
    let mut firstdigit2 = 0;
    for i in 0..var2.ndigits() {
        firstdigit2 = var2.digit(i);
        if firstdigit2 != 0 {
            weight2 = var2.weight - i;
            break;
        }
    }

    // Estimate the quotient weight; when the leading limbs are equal we
    // cannot be sure, so assume the quotient is below one.
    let mut qweight = weight1 - weight2;
    if firstdigit1 <= firstdigit2 {
        qweight -= 1;
    }

    (MIN_SIG_DIGITS - qweight * DEC_DIGITS)
        .max(var1.dscale)
        .max(var2.dscale)
        .max(MIN_DISPLAY_SCALE)
        .min(MAX_DISPLAY_SCALE)
}

/// Computes `var1 mod var2` as `var1 - trunc(var1/var2) * var2`.
pub(crate) fn rem(var1: &NumericVar, var2: &NumericVar) -> Result<NumericVar, NumericError> {
    let quotient = div(var1, var2, 0, false)?;
    let product = mul(var2, &quotient, var2.dscale);
    Ok(sub(var1, &product))
}

/// Smallest integer greater than or equal to the argument.
pub(crate) fn ceil(var: &NumericVar) -> NumericVar {
    let mut result = var.clone();
    result.trunc(0);
    if var.sign == Sign::Pos && cmp(var, &result) != Ordering::Equal {
        result = add(&result, &NumericVar::one());
    }
    result
}

/// Largest integer less than or equal to the argument.
pub(crate) fn floor(var: &NumericVar) -> NumericVar {
    let mut result = var.clone();
    result.trunc(0);
    if var.sign == Sign::Neg && cmp(var, &result) != Ordering::Equal {
        result = sub(&result, &NumericVar::one());
    }
    result
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
    fn test_combine_signs() {
        assert_eq!(render(add(&parse("1.13"), &parse("-1.13"))), "0.00");
        assert_eq!(render(add(&parse("1.13"), &parse("-1.03"))), "0.10");
        assert_eq!(render(sub(&parse("0.1"), &parse("1.13"))), "-1.03");
        assert_eq!(render(sub(&parse("1.13"), &parse("-0.1"))), "1.23");
    }

    #[test]
    fn test_mul_rounds_to_rscale() {
        let product = mul(&parse("1.13"), &parse("1.1"), 3);
        assert_eq!(render(product), "1.243");
    }

    #[test]
    fn test_div_single_and_multi_limb() {
        // Single-limb divisor takes the short-division path.
        let q = div(&parse("1"), &parse("3"), 20, true).unwrap();
        assert_eq!(render(q), "0.33333333333333333333");

        // A divisor with a small leading limb forces Knuth normalization;
        // the quotient here is exact.
        let q = div(&parse("1.23450012345"), &parse("0.10000001"), 3, true).unwrap();
        assert_eq!(render(q), "12.345");
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            div(&parse("1.243"), &parse("0"), 0, false).unwrap_err(),
            NumericError::DivisionByZero
        );
        assert_eq!(
            div_fast(&parse("1"), &parse("0"), 0, true).unwrap_err(),
            NumericError::DivisionByZero
        );
    }

    #[test]
    fn test_div_fast_agrees_on_leading_digits() {
        let exact = div(&parse("2"), &parse("7"), 20, true).unwrap();
        let fast = div_fast(&parse("2"), &parse("7"), 20, true).unwrap();
        // The fast path may be off in the guard digits, never the leading
        // requested digits.
        assert_eq!(render(exact)[..18], render(fast)[..18]);
    }

    #[test]
    fn test_select_div_scale_minimum_significance() {
        assert_eq!(select_div_scale(&parse("1"), &parse("3")), 20);
        assert_eq!(select_div_scale(&parse("1.13"), &parse("0.1")), 16);
    }

    #[test]
    fn test_rem() {
        assert_eq!(render(rem(&parse("1.243"), &parse("1.1")).unwrap()), "0.143");
        assert_eq!(render(rem(&parse("5"), &parse("2")).unwrap()), "1");
    }

    #[test]
    fn test_ceil_floor() {
        assert_eq!(render(ceil(&parse("12.345"))), "13");
        assert_eq!(render(ceil(&parse("-12.345"))), "-12");
        assert_eq!(render(floor(&parse("12.345"))), "12");
        assert_eq!(render(floor(&parse("-12.345"))), "-13");
    }
}
