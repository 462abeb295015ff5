//! Letter normalization shared by hangman guessing and word matching.
//!
//! Comparison happens on a folded form: uppercase with diacritics removed.
//! The native letter `Ñ` is not a decorated `N` in the languages these games
//! target, so it is shielded behind a private-use placeholder while the
//! diacritics are stripped and restored afterwards.

use tracing::instrument;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// The accented consonant that survives normalization.
pub const NATIVE_LETTER: char = 'Ñ';

/// Private-use code point that stands in for [`NATIVE_LETTER`] while folding.
const PLACEHOLDER: char = '\u{E000}';

/// Normalizes text for comparison.
///
/// Steps, in order: compose (so a decomposed `n` + combining tilde becomes a
/// single letter), shield `ñ`/`Ñ`, strip the remaining combining marks,
/// uppercase, restore the shielded letter as `Ñ`.
#[instrument]
pub fn normalize_text(input: &str) -> String {
    let shielded: String = input
        .nfc()
        .map(|c| if c == 'ñ' || c == 'Ñ' { PLACEHOLDER } else { c })
        .collect();

    shielded
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
        .map(|c| if c == PLACEHOLDER { NATIVE_LETTER } else { c })
        .collect()
}

/// Normalizes a single guessed letter.
///
/// Returns `None` for characters that are not alphabetic once folded.
pub fn normalize_letter(letter: char) -> Option<String> {
    let folded = normalize_text(&letter.to_string());
    if !folded.is_empty() && folded.chars().all(char::is_alphabetic) {
        Some(folded)
    } else {
        None
    }
}

/// Returns true if both strings are equal after normalization.
pub fn same_letters(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(normalize_text("canción"), "CANCION");
        assert_eq!(normalize_text("Pingüino"), "PINGUINO");
        assert_eq!(normalize_text("árbol"), "ARBOL");
    }

    #[test]
    fn keeps_native_letter() {
        assert_eq!(normalize_text("niño"), "NIÑO");
        assert_eq!(normalize_text("NIÑO"), "NIÑO");
        assert_eq!(normalize_text("ni\u{0303}o"), "NIÑO");
    }

    #[test]
    fn native_letter_is_not_plain_n() {
        assert!(!same_letters("ñ", "n"));
        assert!(same_letters("ñ", "Ñ"));
    }

    #[test]
    fn normalize_letter_rejects_non_letters() {
        assert_eq!(normalize_letter('é').as_deref(), Some("E"));
        assert_eq!(normalize_letter('ñ').as_deref(), Some("Ñ"));
        assert_eq!(normalize_letter('-'), None);
        assert_eq!(normalize_letter(' '), None);
        assert_eq!(normalize_letter('7'), None);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(s in "[a-zA-ZñÑáéíóúÁÉÍÓÚüÜ \u{0303}]{0,24}") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once);
        }
    }
}
