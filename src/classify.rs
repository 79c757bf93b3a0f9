//! Character classification for CJK layout
//!
//! Table-driven categorization of codepoints, the vertical-rotation
//! predicate, and the vertical-presentation-form substitution table.

/// Layout category of a codepoint.
///
/// Anything other than [`CharCategory::Normal`] takes a special drawing path
/// in vertical mode (substitution form, line segment, or rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharCategory {
    #[default]
    Normal,
    /// Opening/closing brackets, ASCII and fullwidth
    Bracket,
    /// Dashes, fullwidth hyphen, long-vowel mark
    HorizontalBar,
    /// Terminal punctuation (、。！？ and ASCII equivalents)
    Punctuation,
    /// Miscellaneous ASCII symbols that still rotate in vertical text
    OtherSpecial,
}

/// Brackets, ASCII and CJK.
const BRACKETS: &[u16] = &[
    b'(' as u16,
    b')' as u16,
    b'[' as u16,
    b']' as u16,
    b'{' as u16,
    b'}' as u16,
    b'<' as u16,
    b'>' as u16,
    0xFF08, 0xFF09, // （）
    0x300C, 0x300D, // 「」
    0x300E, 0x300F, // 『』
    0x3010, 0x3011, // 【】
];

/// Dashes and long-vowel marks that become vertical strokes.
const HORIZONTAL_BARS: &[u16] = &[
    0x2014, // — em dash
    0x2015, // ― horizontal bar
    0xFF0D, // － fullwidth hyphen-minus
    0x30FC, // ー long-vowel mark
];

/// Terminal punctuation.
const PUNCTUATION: &[u16] = &[
    0x3001, 0x3002, // 、。
    b'!' as u16,
    b'?' as u16,
    0xFF01, 0xFF1F, // ！？
    b':' as u16,
    b';' as u16,
    0xFF1A, 0xFF1B, // ：；
];

/// Remaining ASCII symbols with no dedicated vertical treatment.
const OTHER_SPECIAL: &[u16] = &[
    b'@' as u16,
    b'#' as u16,
    b'$' as u16,
    b'%' as u16,
    b'&' as u16,
    b'*' as u16,
    b'+' as u16,
    b'=' as u16,
    b'/' as u16,
    b'\\' as u16,
    b'-' as u16,
];

/// Codepoint → Unicode vertical presentation form, sorted by codepoint.
const VERTICAL_FORMS: &[(u16, u16)] = &[
    (0x0028, 0xFE35), // ( → ︵
    (0x0029, 0xFE36), // ) → ︶
    (0x005B, 0xFE47), // [ → ﹇
    (0x005D, 0xFE48), // ] → ﹈
    (0x005F, 0xFE33), // _ → ︳
    (0x007B, 0xFE37), // { → ︷
    (0x007D, 0xFE38), // } → ︸
    (0x2013, 0xFE32), // – → ︲
    (0x2014, 0xFE31), // — → ︱
    (0x2015, 0xFE31), // ― → ︱
    (0x2025, 0xFE30), // ‥ → ︰
    (0x2026, 0xFE19), // … → ︙
    (0x3001, 0xFE11), // 、
    (0x3002, 0xFE12), // 。
    (0x3008, 0xFE3F), // 〈 → ︿
    (0x3009, 0xFE40), // 〉 → ﹀
    (0x300A, 0xFE3D), // 《 → ︽
    (0x300B, 0xFE3E), // 》 → ︾
    (0x300C, 0xFE41), // 「 → ﹁
    (0x300D, 0xFE42), // 」 → ﹂
    (0x300E, 0xFE43), // 『 → ﹃
    (0x300F, 0xFE44), // 』 → ﹄
    (0x3010, 0xFE3B), // 【 → ︻
    (0x3011, 0xFE3C), // 】 → ︼
    (0x3014, 0xFE39), // 〔 → ︹
    (0x3015, 0xFE3A), // 〕 → ︺
    (0x30FC, 0xFE31), // ー → ︱
    (0xFF0D, 0xFE32), // － → ︲
];

/// Categorize a codepoint.
///
/// Tables are checked in order, so `<` and `>` classify as brackets even
/// though they also appear among the plain symbols.
pub fn category(cp: u16) -> CharCategory {
    if BRACKETS.contains(&cp) {
        CharCategory::Bracket
    } else if HORIZONTAL_BARS.contains(&cp) {
        CharCategory::HorizontalBar
    } else if PUNCTUATION.contains(&cp) {
        CharCategory::Punctuation
    } else if OTHER_SPECIAL.contains(&cp) {
        CharCategory::OtherSpecial
    } else {
        CharCategory::Normal
    }
}

/// Whether a codepoint is drawn rotated 90° in vertical text.
///
/// Latin letters and digits read sideways in vertical Japanese text, while
/// kana and ideographs stay upright.
pub fn should_rotate_in_vertical(cp: u16) -> bool {
    // ASCII rotates
    if cp < 0x80 {
        return true;
    }
    // Fullwidth ASCII and halfwidth katakana rotate
    if (0xFF01..=0xFF5E).contains(&cp) || (0xFF61..=0xFF9F).contains(&cp) {
        return true;
    }
    // Hiragana, katakana and CJK ideographs stay upright
    if (0x3040..=0x30FF).contains(&cp) || (0x4E00..=0x9FFF).contains(&cp) {
        return false;
    }
    false
}

/// Vertical presentation form for a punctuation/bracket codepoint, if one
/// is assigned.
pub fn vertical_form(cp: u16) -> Option<u16> {
    VERTICAL_FORMS
        .binary_search_by_key(&cp, |&(from, _)| from)
        .ok()
        .map(|i| VERTICAL_FORMS[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_stability() {
        assert_eq!(category(0x3002), CharCategory::Punctuation);
        assert_eq!(category(b'(' as u16), CharCategory::Bracket);
        assert_eq!(category(0x2014), CharCategory::HorizontalBar);
        assert_eq!(category(b'A' as u16), CharCategory::Normal);
    }

    #[test]
    fn test_angle_brackets_are_brackets() {
        assert_eq!(category(b'<' as u16), CharCategory::Bracket);
        assert_eq!(category(b'>' as u16), CharCategory::Bracket);
    }

    #[test]
    fn test_kana_and_ideographs_normal() {
        assert_eq!(category(0x3042), CharCategory::Normal); // あ
        assert_eq!(category(0x6F22), CharCategory::Normal); // 漢
    }

    #[test]
    fn test_rotation_law() {
        for cp in b'0'..=b'9' {
            assert!(should_rotate_in_vertical(cp as u16));
        }
        for cp in b'A'..=b'Z' {
            assert!(should_rotate_in_vertical(cp as u16));
        }
        for cp in 0x3040..=0x309Fu16 {
            assert!(!should_rotate_in_vertical(cp), "U+{cp:04X} should be upright");
        }
    }

    #[test]
    fn test_fullwidth_rotation() {
        assert!(should_rotate_in_vertical(0xFF21)); // Ａ
        assert!(should_rotate_in_vertical(0xFF76)); // ｶ halfwidth katakana
        assert!(!should_rotate_in_vertical(0x30A2)); // ア
    }

    #[test]
    fn test_vertical_forms() {
        assert_eq!(vertical_form(0x300C), Some(0xFE41)); // 「 → ﹁
        assert_eq!(vertical_form(0x2014), Some(0xFE31)); // — → ︱
        assert_eq!(vertical_form(0x3002), Some(0xFE12)); // 。
        assert_eq!(vertical_form(b'A' as u16), None);
    }

    #[test]
    fn test_vertical_forms_sorted() {
        // binary_search requires the table sorted by source codepoint
        for pair in VERTICAL_FORMS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }
}
