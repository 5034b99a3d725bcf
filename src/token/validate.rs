//! # Byte classes
//! Lookup tables used by the scanner to decide which bytes may continue a run.

/// Lookup table for bytes which could appear in a name: an object type, an entry key, a field
/// key, or a macro variable. This includes the ascii printable characters with
/// `"{}(),=\\#%\"@"` removed, as well as bytes that could appear in non-ascii UTF-8.
///
/// Note that this table is insufficient for UTF-8 validation outside the ASCII range:
/// it is only used for short-circuited termination of scanning!
pub(crate) static NAME_ALLOWED: [bool; 256] = {
    const PR: bool = false; // disallowed printable bytes
    const CT: bool = false; // non-printable ascii
    const __: bool = true; // permitted bytes
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 0
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 1
        CT, __, PR, PR, __, PR, __, __, PR, PR, __, __, PR, __, __, __, // 2
        __, __, __, __, __, __, __, __, __, __, __, __, __, PR, __, __, // 3
        PR, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, PR, __, __, __, // 5
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, PR, __, PR, __, CT, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

/// Lookup table for ASCII whitespace, following `u8::is_ascii_whitespace`.
///
/// Like `is_ascii_whitespace`, and unlike biber, U+000B VERTICAL TAB is not whitespace.
pub(crate) static WHITESPACE: [bool; 256] = {
    let mut table = [false; 256];
    table[b' ' as usize] = true;
    table[b'\t' as usize] = true;
    table[b'\n' as usize] = true;
    table[b'\r' as usize] = true;
    table[0x0c] = true;
    table
};

/// Check if a given string can be lexed as a single name.
#[inline]
pub fn is_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| NAME_ALLOWED[b as usize])
}

/// Check if a given name consists only of ASCII digits and is therefore lexed as a number.
#[inline]
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
