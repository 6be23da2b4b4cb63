//! Canonical text form for keyword matching.
//!
//! Page text coming out of a PDF decoder mixes case and accents freely
//! ("Gabarito", "GABARITO", "Conhecimentos Específicos"). Keyword checks run on
//! a canonical form: accented letters folded to their base letter, combining
//! marks dropped, everything uppercased.
//!
//! Captured answer data (question numbers and letters) never goes through this
//! module; those are read verbatim from the decoded text.
//!
//! # Coverage
//!
//! Folding covers the precomposed letters of Latin-1 Supplement and Latin
//! Extended-A, which is every accented letter Portuguese, Spanish and French
//! text uses. Other characters are only uppercased.

use phf::phf_map;

/// Precomposed Latin letters mapped to their uppercase base letter.
static ACCENT_FOLD_MAP: phf::Map<char, char> = phf_map! {
    'À' => 'A', 'Á' => 'A', 'Â' => 'A', 'Ã' => 'A', 'Ä' => 'A', 'Å' => 'A',
    'Ç' => 'C', 'È' => 'E', 'É' => 'E', 'Ê' => 'E', 'Ë' => 'E', 'Ì' => 'I',
    'Í' => 'I', 'Î' => 'I', 'Ï' => 'I', 'Ñ' => 'N', 'Ò' => 'O', 'Ó' => 'O',
    'Ô' => 'O', 'Õ' => 'O', 'Ö' => 'O', 'Ù' => 'U', 'Ú' => 'U', 'Û' => 'U',
    'Ü' => 'U', 'Ý' => 'Y', 'à' => 'A', 'á' => 'A', 'â' => 'A', 'ã' => 'A',
    'ä' => 'A', 'å' => 'A', 'ç' => 'C', 'è' => 'E', 'é' => 'E', 'ê' => 'E',
    'ë' => 'E', 'ì' => 'I', 'í' => 'I', 'î' => 'I', 'ï' => 'I', 'ñ' => 'N',
    'ò' => 'O', 'ó' => 'O', 'ô' => 'O', 'õ' => 'O', 'ö' => 'O', 'ù' => 'U',
    'ú' => 'U', 'û' => 'U', 'ü' => 'U', 'ý' => 'Y', 'ÿ' => 'Y', 'Ā' => 'A',
    'ā' => 'A', 'Ă' => 'A', 'ă' => 'A', 'Ą' => 'A', 'ą' => 'A', 'Ć' => 'C',
    'ć' => 'C', 'Ĉ' => 'C', 'ĉ' => 'C', 'Ċ' => 'C', 'ċ' => 'C', 'Č' => 'C',
    'č' => 'C', 'Ď' => 'D', 'ď' => 'D', 'Ē' => 'E', 'ē' => 'E', 'Ĕ' => 'E',
    'ĕ' => 'E', 'Ė' => 'E', 'ė' => 'E', 'Ę' => 'E', 'ę' => 'E', 'Ě' => 'E',
    'ě' => 'E', 'Ĝ' => 'G', 'ĝ' => 'G', 'Ğ' => 'G', 'ğ' => 'G', 'Ġ' => 'G',
    'ġ' => 'G', 'Ģ' => 'G', 'ģ' => 'G', 'Ĥ' => 'H', 'ĥ' => 'H', 'Ĩ' => 'I',
    'ĩ' => 'I', 'Ī' => 'I', 'ī' => 'I', 'Ĭ' => 'I', 'ĭ' => 'I', 'Į' => 'I',
    'į' => 'I', 'İ' => 'I', 'Ĵ' => 'J', 'ĵ' => 'J', 'Ķ' => 'K', 'ķ' => 'K',
    'Ĺ' => 'L', 'ĺ' => 'L', 'Ļ' => 'L', 'ļ' => 'L', 'Ľ' => 'L', 'ľ' => 'L',
    'Ń' => 'N', 'ń' => 'N', 'Ņ' => 'N', 'ņ' => 'N', 'Ň' => 'N', 'ň' => 'N',
    'Ō' => 'O', 'ō' => 'O', 'Ŏ' => 'O', 'ŏ' => 'O', 'Ő' => 'O', 'ő' => 'O',
    'Ŕ' => 'R', 'ŕ' => 'R', 'Ŗ' => 'R', 'ŗ' => 'R', 'Ř' => 'R', 'ř' => 'R',
    'Ś' => 'S', 'ś' => 'S', 'Ŝ' => 'S', 'ŝ' => 'S', 'Ş' => 'S', 'ş' => 'S',
    'Š' => 'S', 'š' => 'S', 'Ţ' => 'T', 'ţ' => 'T', 'Ť' => 'T', 'ť' => 'T',
    'Ũ' => 'U', 'ũ' => 'U', 'Ū' => 'U', 'ū' => 'U', 'Ŭ' => 'U', 'ŭ' => 'U',
    'Ů' => 'U', 'ů' => 'U', 'Ű' => 'U', 'ű' => 'U', 'Ų' => 'U', 'ų' => 'U',
    'Ŵ' => 'W', 'ŵ' => 'W', 'Ŷ' => 'Y', 'ŷ' => 'Y', 'Ÿ' => 'Y', 'Ź' => 'Z',
    'ź' => 'Z', 'Ż' => 'Z', 'ż' => 'Z', 'Ž' => 'Z', 'ž' => 'Z',
};

/// Combining Diacritical Marks block (U+0300-U+036F).
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

/// Produce the canonical uppercase, accent-stripped form of `text`.
///
/// Pure and total: any input, including the empty string, is accepted.
///
/// # Examples
///
/// ```
/// use gabarito_oxide::text::canonicalize;
///
/// assert_eq!(canonicalize("Gabarito Definitivo"), "GABARITO DEFINITIVO");
/// assert_eq!(canonicalize("Específicos"), "ESPECIFICOS");
/// ```
pub fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_combining_mark(c) {
            continue;
        }
        match ACCENT_FOLD_MAP.get(&c) {
            Some(&base) => out.push(base),
            None => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Whether `text` contains `marker` once both are canonicalized.
///
/// ```
/// use gabarito_oxide::text::contains_marker;
///
/// assert!(contains_marker("Gabárito oficial definitivo", "GABARITO"));
/// assert!(!contains_marker("Resultado final", "gabarito"));
/// ```
pub fn contains_marker(text: &str, marker: &str) -> bool {
    canonicalize(text).contains(&canonicalize(marker))
}
