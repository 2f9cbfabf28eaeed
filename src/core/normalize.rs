/// Fold text into the form used for filter comparisons
///
/// Letters are lowercased and the Catalan/Spanish grave and acute vowels lose
/// their accent. ASCII letters, digits and spaces survive; every other
/// character is dropped, so `"Carrer-123, Àlaba!"` becomes `"carrer123 alaba"`.
///
/// Lowercasing runs first and follows Unicode, so the few non-ASCII capitals
/// whose lowercase form is ASCII survive: the Kelvin sign (U+212A) becomes `k` and
/// `İ` becomes `i`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter_map(fold_char)
        .collect()
}

#[inline]
fn fold_char(c: char) -> Option<char> {
    match c {
        'a'..='z' | '0'..='9' | ' ' => Some(c),
        'à' | 'á' => Some('a'),
        'è' | 'é' => Some('e'),
        'í' | 'ì' => Some('i'),
        'ó' | 'ò' => Some('o'),
        'ú' | 'ù' => Some('u'),
        _ => None,
    }
}
