/// The numeric half of the code alphabet.
pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// The ideographic half of the code alphabet. Every code starts with one of
/// these.
pub const IDEOGRAPHS: [char; 16] = [
    '가', '나', '다', '라', '마', '바', '사', '아', '자', '차', '카', '타', '파', '하', '거', '너',
];

/// Number of distinct symbols a code position past the first may hold.
pub const ALPHABET_SIZE: usize = DIGITS.len() + IDEOGRAPHS.len();

/// Whether `symbol` belongs to the ideographic subset.
pub fn is_ideograph(symbol: char) -> bool {
    IDEOGRAPHS.contains(&symbol)
}

/// Whether `symbol` belongs to the code alphabet at all.
pub fn is_code_symbol(symbol: char) -> bool {
    symbol.is_ascii_digit() || is_ideograph(symbol)
}

/// Number of distinct codes of `length` symbols: `16 * 26^(length - 1)`.
///
/// Returns `None` when the count does not fit in a `u128`, which happens from
/// 28 symbols on and means the space is effectively unbounded.
///
/// ```
/// use coupon_engine::code_capacity;
///
/// assert_eq!(code_capacity(0), Some(0));
/// assert_eq!(code_capacity(1), Some(16));
/// assert_eq!(code_capacity(2), Some(16 * 26));
/// assert_eq!(code_capacity(64), None);
/// ```
pub fn code_capacity(length: usize) -> Option<u128> {
    let Some(tail) = length.checked_sub(1) else {
        return Some(0);
    };
    let tail = u32::try_from(tail).ok()?;
    (ALPHABET_SIZE as u128)
        .checked_pow(tail)?
        .checked_mul(IDEOGRAPHS.len() as u128)
}
