#[macro_export]
/// A macro to construct a [`Numeric`] from a literal.
/// Converts the input tokens to a string, and then parses the string into a [`Numeric`].
/// Panics if the provided input is not a valid [`Numeric`] literal.
///
/// [`Numeric`]: crate::Numeric
///
/// # Examples:
/// ```
/// use bigdec::num;
///
/// assert!(num!(NaN).is_nan());
/// assert!(num!(0).is_zero());
/// assert_eq!(num!(1.753).to_string(), "1.753");
/// ```
macro_rules! num {
    ($l:expr) => {
        <$crate::Numeric as ::std::str::FromStr>::from_str(stringify!($l))
            .unwrap_or_else(|e| panic!("{}", e.to_string()))
    };
}
