//! Text folding shared by the neighborhood and free-text filters.

/// Lowercase and fold Turkish letters to their ASCII base, so that "YALI",
/// "Yalı" and "yali" compare equal.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ç' | 'Ç' => out.push('c'),
            'ğ' | 'Ğ' => out.push('g'),
            'ı' | 'I' | 'İ' | 'î' | 'Î' => out.push('i'),
            'ö' | 'Ö' => out.push('o'),
            'ş' | 'Ş' => out.push('s'),
            'ü' | 'Ü' | 'û' | 'Û' => out.push('u'),
            'â' | 'Â' => out.push('a'),
            // stray combining dot left over from "i̇"
            '\u{0307}' => {}
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

/// URL-safe slug: folded, alphanumeric runs joined by single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in fold(text).chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_turkish_letters() {
        assert_eq!(fold("YALI"), "yali");
        assert_eq!(fold("Yalı"), "yali");
        assert_eq!(fold("İskele Çarşı"), "iskele carsi");
        assert_eq!(fold("Gümüşlük"), "gumusluk");
    }

    #[test]
    fn slugifies_display_names() {
        assert_eq!(slugify("Yalı Mahallesi"), "yali-mahallesi");
        assert_eq!(slugify("  Türkbükü / Gölköy  "), "turkbuku-golkoy");
        assert_eq!(slugify("--"), "");
        assert_eq!(slugify(""), "");
    }
}
