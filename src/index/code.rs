use crate::index::constants::{Domain, SEPARATOR, position_of};

/// Strips separators and uppercases.
pub(crate) fn clean(code: &str) -> String {
    code.chars()
        .filter(|&c| c != SEPARATOR)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Returns `true` if `code` is a well-formed code once separators are removed.
///
/// Case-insensitive. Never fails; use [`decode`](crate::decode) to learn why a
/// code is rejected.
///
/// # Example
/// ```
/// use digipin_rs::is_valid;
///
/// assert!(is_valid("39J-49L-L8T4"));
/// assert!(is_valid("39j49ll8t4"));
/// assert!(!is_valid("39J-49L-L8T"));
/// assert!(!is_valid("39J-49L-L8TA"));
/// ```
pub fn is_valid(code: &str) -> bool {
    let cleaned = clean(code);
    Domain::from_code_length(cleaned.chars().count()).is_some()
        && cleaned.chars().all(|c| position_of(c).is_some())
}

/// Normalises a code to canonical form: uppercase with separators at the
/// positions for its length (3/6 for 10 symbols, 4/8 for 12).
///
/// Any other length comes back cleaned but otherwise unchanged. The alphabet is
/// not checked here.
///
/// # Example
/// ```
/// use digipin_rs::format;
///
/// assert_eq!(format("39j49ll8t4"), "39J-49L-L8T4");
/// assert_eq!(format("3F26C368P4T9"), "3F26-C368-P4T9");
/// assert_eq!(format("39-J4"), "39J4");
/// ```
pub fn format(code: &str) -> String {
    let cleaned = clean(code);
    let symbols: Vec<char> = cleaned.chars().collect();

    let Some(domain) = Domain::from_code_length(symbols.len()) else {
        return cleaned;
    };

    let separators = domain.separator_positions();
    let mut out = String::with_capacity(symbols.len() + separators.len());
    for (i, symbol) in symbols.into_iter().enumerate() {
        if separators.contains(&i) {
            out.push(SEPARATOR);
        }
        out.push(symbol);
    }
    out
}
