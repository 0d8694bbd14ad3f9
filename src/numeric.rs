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

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use num_traits::{One, Zero};
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::arith;
use crate::conv;
use crate::error::NumericError;
use crate::strconv;
use crate::transc;
use crate::var::{
    NumericVar, Sign, DEC_DIGITS, MAX_DISPLAY_SCALE, MAX_RESULT_SCALE, MIN_DISPLAY_SCALE,
    MIN_SIG_DIGITS,
};

/// An arbitrary-precision decimal number with SQL `NUMERIC` semantics.
///
/// A `Numeric` is exact: it stores a sign, a decimal digit string of
/// essentially unbounded length, and a display scale that records how many
/// fractional digits the value presents. A distinguished NaN value
/// propagates through arithmetic and sorts above every other value, giving
/// the type a total order (and hence [`Ord`], [`Eq`], and [`Hash`]).
///
/// For convenience, `Numeric` overloads the standard Rust operators:
///
/// ```
/// use bigdec::Numeric;
///
/// let x: Numeric = "0.1".parse()?;
/// let y: Numeric = "0.2".parse()?;
/// assert_eq!((x + y).to_string(), "0.3");
/// # Ok::<_, bigdec::NumericError>(())
/// ```
///
/// The operators panic on the rare failure cases (a result whose weight or
/// scale leaves the representable range, division by zero); the
/// `checked_*` methods report those as [`NumericError`] instead and are the
/// primary interface.
///
/// Formatting honors the requested precision as the display scale, and
/// scientific notation is available through [`fmt::LowerExp`]:
///
/// ```
/// use bigdec::num;
///
/// assert_eq!(format!("{:.2}", num!(12.345)), "12.35");
/// assert_eq!(format!("{:.1e}", num!(0.12)), "1.2e-01");
/// ```
#[derive(Clone)]
pub struct Numeric {
    pub(crate) var: NumericVar,
}

/// Normalizes a computed working value into a result: strips leading and
/// trailing zero limbs and rejects a weight or display scale that no longer
/// fits the signed 16-bit range.
fn make_result(mut var: NumericVar) -> Result<Numeric, NumericError> {
    if var.is_nan() {
        return Ok(Numeric::nan());
    }
    var.strip();
    if var.weight < i32::from(i16::MIN)
        || var.weight > i32::from(i16::MAX)
        || var.dscale < 0
        || var.dscale > i32::from(i16::MAX)
    {
        return Err(NumericError::ValueOutOfRange);
    }
    Ok(Numeric { var })
}

impl Numeric {
    /// Constructs the NaN value.
    pub fn nan() -> Numeric {
        Numeric {
            var: NumericVar::nan(),
        }
    }

    /// Reports whether the value is NaN.
    pub fn is_nan(&self) -> bool {
        self.var.is_nan()
    }

    /// Reports whether the value is zero. NaN is not zero.
    pub fn is_zero(&self) -> bool {
        self.var.is_zero()
    }

    /// Reports whether the value is less than zero. NaN is not negative.
    pub fn is_negative(&self) -> bool {
        self.var.sign == Sign::Neg
    }

    /// Returns the display scale: the number of decimal digits the value
    /// carries after the decimal point, which may exceed the number of
    /// digits physically stored.
    pub fn scale(&self) -> i32 {
        self.var.dscale
    }

    /// Parses a string under a `NUMERIC(precision, scale)` constraint: the
    /// value is rounded to `scale` fractional digits and must then fit in
    /// `precision - scale` digits before the decimal point.
    ///
    /// `"NaN"` parses regardless of the constraint. For an unconstrained
    /// parse use [`str::parse`] via the [`FromStr`] impl.
    ///
    /// ```
    /// use bigdec::Numeric;
    ///
    /// let n = Numeric::from_str_bounded("0.12", 3, 2)?;
    /// assert_eq!(n.to_string(), "0.12");
    /// assert!(Numeric::from_str_bounded("123.45", 3, 2).is_err());
    /// # Ok::<_, bigdec::NumericError>(())
    /// ```
    pub fn from_str_bounded(
        s: &str,
        precision: u16,
        scale: u16,
    ) -> Result<Numeric, NumericError> {
        let mut var = strconv::parse(s)?;
        if var.is_nan() {
            return Ok(Numeric::nan());
        }
        strconv::apply_precision(&mut var, i32::from(precision), i32::from(scale))?;
        make_result(var)
    }

    /// Computes the absolute value.
    pub fn abs(&self) -> Numeric {
        if self.is_nan() {
            return Numeric::nan();
        }
        let mut var = self.var.clone();
        var.sign = Sign::Pos;
        Numeric { var }
    }

    /// Returns -1, 0, or 1 as a `Numeric` according to the sign of the
    /// value; NaN yields NaN.
    pub fn signum(&self) -> Numeric {
        if self.is_nan() {
            return Numeric::nan();
        }
        if self.is_zero() {
            return Numeric::default();
        }
        let mut var = NumericVar::one();
        var.sign = self.var.sign;
        Numeric { var }
    }

    /// Rounds to `scale` digits after the decimal point, half away from
    /// zero. A negative `scale` rounds to the left of the decimal point:
    /// `round("12.355", -1)` is `10`.
    pub fn round(&self, scale: i32) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        let scale = scale.clamp(-MAX_RESULT_SCALE, MAX_RESULT_SCALE);
        let mut var = self.var.clone();
        var.round(scale);
        // The output never claims a negative display scale.
        if scale < 0 {
            var.dscale = 0;
        }
        make_result(var)
    }

    /// Truncates toward zero at `scale` digits after the decimal point.
    /// Negative scales truncate to the left of the decimal point.
    pub fn trunc(&self, scale: i32) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        let scale = scale.clamp(-MAX_RESULT_SCALE, MAX_RESULT_SCALE);
        let mut var = self.var.clone();
        var.trunc(scale);
        if scale < 0 {
            var.dscale = 0;
        }
        make_result(var)
    }

    /// The smallest integer greater than or equal to the value.
    pub fn ceil(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        make_result(arith::ceil(&self.var))
    }

    /// The largest integer less than or equal to the value.
    pub fn floor(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        make_result(arith::floor(&self.var))
    }

    /// Adds two values. The result carries the wider of the two display
    /// scales.
    pub fn checked_add(&self, rhs: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || rhs.is_nan() {
            return Ok(Numeric::nan());
        }
        make_result(arith::add(&self.var, &rhs.var))
    }

    /// Subtracts `rhs` from `self`.
    pub fn checked_sub(&self, rhs: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || rhs.is_nan() {
            return Ok(Numeric::nan());
        }
        make_result(arith::sub(&self.var, &rhs.var))
    }

    /// Multiplies two values, requesting exact representation of the
    /// product: the result scale is the sum of the input display scales.
    pub fn checked_mul(&self, rhs: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || rhs.is_nan() {
            return Ok(Numeric::nan());
        }
        let rscale = self.var.dscale + rhs.var.dscale;
        make_result(arith::mul(&self.var, &rhs.var, rscale))
    }

    /// Divides `self` by `rhs`. The result scale is chosen to deliver at
    /// least 16 significant digits and no less than either input's display
    /// scale.
    ///
    /// ```
    /// use bigdec::num;
    ///
    /// let q = num!(1).checked_div(&num!(3))?;
    /// assert_eq!(q.to_string(), "0.33333333333333333333");
    /// # Ok::<_, bigdec::NumericError>(())
    /// ```
    pub fn checked_div(&self, rhs: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || rhs.is_nan() {
            return Ok(Numeric::nan());
        }
        let rscale = arith::select_div_scale(&self.var, &rhs.var);
        make_result(arith::div(&self.var, &rhs.var, rscale, true)?)
    }

    /// Divides `self` by `rhs`, truncating the quotient to an integer.
    pub fn div_trunc(&self, rhs: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || rhs.is_nan() {
            return Ok(Numeric::nan());
        }
        make_result(arith::div(&self.var, &rhs.var, 0, false)?)
    }

    /// Computes `self mod rhs`, defined as `self - div_trunc(self, rhs) *
    /// rhs`, so the result takes the sign of the dividend.
    pub fn checked_rem(&self, rhs: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || rhs.is_nan() {
            return Ok(Numeric::nan());
        }
        make_result(arith::rem(&self.var, &rhs.var)?)
    }

    /// Computes the square root.
    ///
    /// ```
    /// use bigdec::num;
    ///
    /// assert_eq!(num!(2).sqrt()?.to_string(), "1.414213562373095");
    /// # Ok::<_, bigdec::NumericError>(())
    /// ```
    pub fn sqrt(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        // Choose a scale for at least MIN_SIG_DIGITS significant digits,
        // and not less than the input's display scale. The input is
        // normalized, so its weight is trustworthy.
        let sweight = (self.var.weight + 1) * DEC_DIGITS / 2 - 1;
        let rscale = (MIN_SIG_DIGITS - sweight)
            .max(self.var.dscale)
            .max(MIN_DISPLAY_SCALE)
            .min(MAX_DISPLAY_SCALE);
        make_result(transc::sqrt(&self.var, rscale)?)
    }

    /// Raises *e* to the power of the value.
    pub fn exp(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        // log10(result) = x * log10(e) approximates the decimal weight of
        // the result; use it to leave MIN_SIG_DIGITS significant digits.
        let mut val = conv::to_f64(&self.var);
        val *= 0.434294481903252;
        val = val
            .max(-f64::from(MAX_RESULT_SCALE))
            .min(f64::from(MAX_RESULT_SCALE));
        let rscale = (MIN_SIG_DIGITS - val as i32)
            .max(self.var.dscale)
            .max(MIN_DISPLAY_SCALE)
            .min(MAX_DISPLAY_SCALE);
        make_result(transc::exp(&self.var, rscale)?)
    }

    /// Computes the natural logarithm. Non-positive values are an invalid
    /// argument.
    pub fn ln(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        // Approximate decimal digits before the decimal point.
        let dec_digits = (self.var.weight + 1) * DEC_DIGITS;
        let rscale = if dec_digits > 1 {
            MIN_SIG_DIGITS - (f64::from(dec_digits - 1)).log10() as i32
        } else if dec_digits < 1 {
            MIN_SIG_DIGITS - (f64::from(1 - dec_digits)).log10() as i32
        } else {
            MIN_SIG_DIGITS
        };
        let rscale = rscale
            .max(self.var.dscale)
            .max(MIN_DISPLAY_SCALE)
            .min(MAX_DISPLAY_SCALE);
        make_result(transc::ln(&self.var, rscale)?)
    }

    /// Computes the base-10 logarithm. Non-positive values are an invalid
    /// argument.
    pub fn log10(&self) -> Result<Numeric, NumericError> {
        if self.is_nan() {
            return Ok(Numeric::nan());
        }
        make_result(transc::log(&NumericVar::ten(), &self.var)?)
    }

    /// Raises the value to the power `exponent`.
    ///
    /// Zero to a negative power and a negative base with a non-integral
    /// exponent are invalid arguments; `0^0` is 1 by SQL convention.
    ///
    /// ```
    /// use bigdec::num;
    ///
    /// let p = num!(2).pow(&num!(32))?;
    /// assert_eq!(p.to_string(), "4294967296.0000000000000000");
    /// # Ok::<_, bigdec::NumericError>(())
    /// ```
    pub fn pow(&self, exponent: &Numeric) -> Result<Numeric, NumericError> {
        if self.is_nan() || exponent.is_nan() {
            return Ok(Numeric::nan());
        }

        if self.var.is_zero() && exponent.var.sign == Sign::Neg {
            return Err(NumericError::InvalidArgument);
        }
        let mut exp_trunc = exponent.var.clone();
        exp_trunc.trunc(0);
        if self.var.sign == Sign::Neg && arith::cmp(&exponent.var, &exp_trunc) != Ordering::Equal
        {
            return Err(NumericError::InvalidArgument);
        }

        make_result(transc::power(&self.var, &exponent.var)?)
    }
}

impl Default for Numeric {
    fn default() -> Numeric {
        Numeric {
            var: NumericVar::zero(),
        }
    }
}

impl FromStr for Numeric {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Numeric, NumericError> {
        make_result(strconv::parse(s)?)
    }
}

impl fmt::Display for Numeric {
    /// Renders the value in plain decimal notation. Without a requested
    /// precision the value's own display scale is used; `{:.N}` rounds to
    /// `N` fractional digits first. NaN renders as `NaN`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("NaN");
        }
        let scale = match f.precision() {
            Some(p) => i32::try_from(p).unwrap_or(MAX_RESULT_SCALE).min(MAX_RESULT_SCALE),
            None => self.var.dscale,
        };
        let mut var = self.var.clone();
        f.write_str(&strconv::to_str(&mut var, scale))
    }
}

impl fmt::LowerExp for Numeric {
    /// Renders the value in scientific notation with a signed two-or-more
    /// digit exponent, e.g. `1.2e-01`. The precision gives the number of
    /// fractional digits in the significand.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("NaN");
        }
        let scale = match f.precision() {
            Some(p) => i32::try_from(p).unwrap_or(MAX_RESULT_SCALE).min(MAX_RESULT_SCALE),
            None => self.var.dscale,
        };
        f.write_str(&strconv::to_str_sci(&self.var, scale))
    }
}

impl fmt::Debug for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Numeric) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Numeric {}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Numeric) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Numeric {
    /// Total order over values: sign first, then magnitude. All NaNs are
    /// equal to each other and greater than every non-NaN, which keeps the
    /// order usable for sorting and indexing; trailing zeroes do not
    /// participate, so `1.2` and `1.200` are equal.
    fn cmp(&self, other: &Numeric) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => arith::cmp(&self.var, &other.var),
        }
    }
}

impl Hash for Numeric {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        // The stripped form is canonical per value, so hashing sign,
        // weight, and limbs (but not dscale) agrees with Eq.
        if self.is_nan() {
            state.write_u8(u8::MAX);
            return;
        }
        state.write_u8(self.is_negative() as u8);
        self.var.weight.hash(state);
        self.var.digits.hash(state);
    }
}

impl From<i32> for Numeric {
    fn from(n: i32) -> Numeric {
        Numeric::from(i64::from(n))
    }
}

impl From<u32> for Numeric {
    fn from(n: u32) -> Numeric {
        Numeric::from(i64::from(n))
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Numeric {
        let mut var = conv::from_i64(n);
        var.strip();
        Numeric { var }
    }
}

impl TryFrom<f64> for Numeric {
    type Error = NumericError;

    /// Converts through the value's 15 significant decimal digits. NaN
    /// converts to the NaN value; infinities are an invalid argument.
    fn try_from(n: f64) -> Result<Numeric, NumericError> {
        make_result(conv::from_f64(n)?)
    }
}

impl TryFrom<f32> for Numeric {
    type Error = NumericError;

    /// Converts through the value's 6 significant decimal digits. NaN
    /// converts to the NaN value; infinities are an invalid argument.
    fn try_from(n: f32) -> Result<Numeric, NumericError> {
        make_result(conv::from_f32(n)?)
    }
}

impl TryFrom<&Numeric> for i64 {
    type Error = NumericError;

    /// Rounds to the nearest integer, half away from zero. NaN is an
    /// invalid argument; values outside the `i64` range are out of range.
    fn try_from(n: &Numeric) -> Result<i64, NumericError> {
        if n.is_nan() {
            return Err(NumericError::InvalidArgument);
        }
        let mut var = n.var.clone();
        conv::to_i64(&mut var).ok_or(NumericError::ValueOutOfRange)
    }
}

impl TryFrom<Numeric> for i64 {
    type Error = NumericError;

    fn try_from(n: Numeric) -> Result<i64, NumericError> {
        i64::try_from(&n)
    }
}

impl TryFrom<&Numeric> for i32 {
    type Error = NumericError;

    fn try_from(n: &Numeric) -> Result<i32, NumericError> {
        let val = i64::try_from(n)?;
        i32::try_from(val).map_err(|_| NumericError::ValueOutOfRange)
    }
}

impl TryFrom<Numeric> for i32 {
    type Error = NumericError;

    fn try_from(n: Numeric) -> Result<i32, NumericError> {
        i32::try_from(&n)
    }
}

impl TryFrom<&Numeric> for f64 {
    type Error = NumericError;

    /// NaN converts to `f64::NAN`; a value beyond the `f64` range, or a
    /// nonzero value that would collapse to zero, is out of range.
    fn try_from(n: &Numeric) -> Result<f64, NumericError> {
        if n.is_nan() {
            return Ok(f64::NAN);
        }
        let val = conv::to_f64(&n.var);
        if val.is_infinite() || (val == 0.0 && !n.is_zero()) {
            return Err(NumericError::ValueOutOfRange);
        }
        Ok(val)
    }
}

impl TryFrom<Numeric> for f64 {
    type Error = NumericError;

    fn try_from(n: Numeric) -> Result<f64, NumericError> {
        f64::try_from(&n)
    }
}

impl TryFrom<&Numeric> for f32 {
    type Error = NumericError;

    fn try_from(n: &Numeric) -> Result<f32, NumericError> {
        if n.is_nan() {
            return Ok(f32::NAN);
        }
        let val = conv::to_f64(&n.var) as f32;
        if val.is_infinite() || (val == 0.0 && !n.is_zero()) {
            return Err(NumericError::ValueOutOfRange);
        }
        Ok(val)
    }
}

impl TryFrom<Numeric> for f32 {
    type Error = NumericError;

    fn try_from(n: Numeric) -> Result<f32, NumericError> {
        f32::try_from(&n)
    }
}

impl Neg for &Numeric {
    type Output = Numeric;

    fn neg(self) -> Numeric {
        if self.is_nan() {
            return Numeric::nan();
        }
        let mut var = self.var.clone();
        // Zero keeps its positive sign.
        if !var.digits.is_empty() {
            var.sign = var.sign.flip();
        }
        Numeric { var }
    }
}

impl Neg for Numeric {
    type Output = Numeric;

    fn neg(self) -> Numeric {
        -&self
    }
}

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $checked:ident, $msg:literal) => {
        impl $op<Numeric> for Numeric {
            type Output = Numeric;

            fn $method(self, rhs: Numeric) -> Numeric {
                self.$checked(&rhs).expect($msg)
            }
        }

        impl<'a> $op<&'a Numeric> for Numeric {
            type Output = Numeric;

            fn $method(self, rhs: &'a Numeric) -> Numeric {
                self.$checked(rhs).expect($msg)
            }
        }

        impl<'a> $op<Numeric> for &'a Numeric {
            type Output = Numeric;

            fn $method(self, rhs: Numeric) -> Numeric {
                self.$checked(&rhs).expect($msg)
            }
        }

        impl<'a, 'b> $op<&'b Numeric> for &'a Numeric {
            type Output = Numeric;

            fn $method(self, rhs: &'b Numeric) -> Numeric {
                self.$checked(rhs).expect($msg)
            }
        }

        impl $assign<Numeric> for Numeric {
            fn $assign_method(&mut self, rhs: Numeric) {
                *self = self.$checked(&rhs).expect($msg);
            }
        }

        impl<'a> $assign<&'a Numeric> for Numeric {
            fn $assign_method(&mut self, rhs: &'a Numeric) {
                *self = self.$checked(rhs).expect($msg);
            }
        }
    };
}

impl_binary_op!(
    Add,
    add,
    AddAssign,
    add_assign,
    checked_add,
    "numeric addition out of range"
);
impl_binary_op!(
    Sub,
    sub,
    SubAssign,
    sub_assign,
    checked_sub,
    "numeric subtraction out of range"
);
impl_binary_op!(
    Mul,
    mul,
    MulAssign,
    mul_assign,
    checked_mul,
    "numeric multiplication out of range"
);
impl_binary_op!(
    Div,
    div,
    DivAssign,
    div_assign,
    checked_div,
    "numeric division failed"
);
impl_binary_op!(
    Rem,
    rem,
    RemAssign,
    rem_assign,
    checked_rem,
    "numeric remainder failed"
);

impl Sum for Numeric {
    fn sum<I>(iter: I) -> Numeric
    where
        I: Iterator<Item = Numeric>,
    {
        iter.fold(Numeric::default(), |sum, d| sum + d)
    }
}

impl<'a> Sum<&'a Numeric> for Numeric {
    fn sum<I>(iter: I) -> Numeric
    where
        I: Iterator<Item = &'a Numeric>,
    {
        iter.fold(Numeric::default(), |sum, d| sum + d)
    }
}

impl Product for Numeric {
    fn product<I>(iter: I) -> Numeric
    where
        I: Iterator<Item = Numeric>,
    {
        iter.fold(Numeric::from(1), |product, d| product * d)
    }
}

impl<'a> Product<&'a Numeric> for Numeric {
    fn product<I>(iter: I) -> Numeric
    where
        I: Iterator<Item = &'a Numeric>,
    {
        iter.fold(Numeric::from(1), |product, d| product * d)
    }
}

impl Zero for Numeric {
    fn zero() -> Numeric {
        Numeric::default()
    }

    fn is_zero(&self) -> bool {
        Numeric::is_zero(self)
    }
}

impl One for Numeric {
    fn one() -> Numeric {
        Numeric::from(1)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Numeric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Numeric, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
