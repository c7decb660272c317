//! Slug normalisation

use nav_shared::constants::{DEFAULT_MENU_SLUG, MAX_SLUG_LENGTH};

/// Lowercase ASCII slug: Latin letters transliterated, every other run of
/// characters collapsed into one hyphen, capped at [`MAX_SLUG_LENGTH`].
/// Falls back to [`DEFAULT_MENU_SLUG`] when nothing usable remains.
///
/// Only Latin-script letters are folded. Cyrillic, Greek, CJK and other
/// scripts are treated as separators and dropped, so a name written entirely
/// in them becomes `menu` (and then `menu-2`, `menu-3`, ... through the
/// allocator). Pass an explicit slug for such menus.
pub fn sanitize(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.trim().chars() {
        let folded = transliterate(ch);
        if folded.is_empty() {
            pending_dash = true;
            continue;
        }
        for c in folded.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                slug.push(c.to_ascii_lowercase());
                pending_dash = false;
            } else {
                pending_dash = true;
            }
        }
    }

    let capped = truncate(&slug, MAX_SLUG_LENGTH);
    if capped.is_empty() {
        DEFAULT_MENU_SLUG.to_string()
    } else {
        capped
    }
}

/// `base` for the first attempt, `base-N` afterwards, still within the cap.
pub fn candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        return truncate(base, MAX_SLUG_LENGTH);
    }
    let suffix = format!("-{attempt}");
    let head = truncate(base, MAX_SLUG_LENGTH.saturating_sub(suffix.len()));
    format!("{head}{suffix}")
}

fn truncate(slug: &str, max: usize) -> String {
    // slugs are ASCII, byte slicing is safe
    let cut = if slug.len() > max { &slug[..max] } else { slug };
    cut.trim_matches('-').to_string()
}

fn transliterate(ch: char) -> &'static str {
    if ch.is_ascii() {
        return ascii_str(ch);
    }
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "a",
        'æ' | 'Æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' | 'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "c",
        'ď' | 'đ' | 'Ď' | 'Đ' | 'ð' | 'Ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' | 'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' | 'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "g",
        'ĥ' | 'ħ' | 'Ĥ' | 'Ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' | 'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "i",
        'ĵ' | 'Ĵ' => "j",
        'ķ' | 'Ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' | 'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' | 'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "o",
        'œ' | 'Œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' | 'Ŕ' | 'Ŗ' | 'Ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' | 'Ś' | 'Ŝ' | 'Ş' | 'Š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' | 'Ţ' | 'Ť' | 'Ŧ' => "t",
        'þ' | 'Þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' | 'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "u",
        'ŵ' | 'Ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' | 'Ý' | 'Ÿ' | 'Ŷ' => "y",
        'ź' | 'ż' | 'ž' | 'Ź' | 'Ż' | 'Ž' => "z",
        _ => "",
    }
}

fn ascii_str(ch: char) -> &'static str {
    const TABLE: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    match TABLE.find(ch) {
        Some(i) => &TABLE[i..i + 1],
        None => "",
    }
}
