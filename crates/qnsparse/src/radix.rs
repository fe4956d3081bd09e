//! Mixed-radix positional encoding.
//!
//! Position 0 is the least significant digit and each position carries its own
//! radix. This is the column-major convention of NDTensors.jl, applied both to
//! sub-block choices (radix = number of sub-blocks of an axis) and to
//! coordinates inside a block (radix = size of the chosen sub-block).
//!
//! [`encode`] is the single routine that turns digits into a linear number;
//! construction and every lookup go through it.

/// Encode little-endian mixed-radix digits as one number.
///
/// Evaluated Horner-style from the most significant position down, which gives
/// `Σ digits[j] * Π radices[..j]`.
///
/// # Panics
/// Panics in debug builds if `digits` and `radices` differ in length.
///
/// # Examples
///
/// ```
/// use qnsparse::radix::encode;
///
/// // 2 + 3*3 + 4*12
/// assert_eq!(encode(&[2, 3, 4], &[3, 4, 5]), 59);
/// assert_eq!(encode(&[], &[]), 0);
/// ```
#[inline]
pub fn encode(digits: &[usize], radices: &[usize]) -> usize {
    debug_assert_eq!(
        digits.len(),
        radices.len(),
        "digit count must match radix count"
    );
    let Some((&lowest, higher)) = digits.split_first() else {
        return 0;
    };
    // higher[j] is the digit at position j + 1
    let mut acc = 0;
    for (j, &digit) in higher.iter().enumerate().rev() {
        acc = (acc + digit) * radices[j];
    }
    acc + lowest
}

/// Decode a number into little-endian mixed-radix digits.
///
/// Inverse of [`encode`] for `code < Π radices`. A zero radix yields digit 0
/// and leaves the remaining code untouched.
///
/// # Examples
///
/// ```
/// use qnsparse::radix::decode;
///
/// assert_eq!(decode(59, &[3, 4, 5]), vec![2, 3, 4]);
/// ```
pub fn decode(mut code: usize, radices: &[usize]) -> Vec<usize> {
    radices
        .iter()
        .map(|&radix| {
            if radix == 0 {
                return 0;
            }
            let digit = code % radix;
            code /= radix;
            digit
        })
        .collect()
}
