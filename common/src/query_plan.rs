//! Builds the canonical [`QueryDescriptor`] for a filter record and term.
//!
//! The executor has no locale-aware folding at query time, so free text is
//! routed by script: ideographic terms match the native-case display name,
//! everything else matches the case-folded Latin name.

use crate::{
    cursor::OpaqueCursor,
    filter_record::FilterRecord,
    search_query::{FreeText, QueryDescriptor, QuerySignature, Script},
};


/// Any CJK code point routes the whole term to the ideographic field, so a
/// mixed term such as "Sushi 店" is matched as ideographic.
pub fn detect_script(term: &str) -> Script {
    if term.chars().any(is_cjk) {
        Script::Ideographic
    } else {
        Script::Latin
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x11FF      // Hangul Jamo
        | 0x2E80..=0x2FDF    // CJK radicals, Kangxi radicals
        | 0x3000..=0x303F    // CJK symbols and punctuation
        | 0x3040..=0x30FF    // Hiragana, Katakana
        | 0x3100..=0x312F    // Bopomofo
        | 0x3130..=0x318F    // Hangul compatibility Jamo
        | 0x31A0..=0x31FF    // Bopomofo extended, CJK strokes, Katakana ext.
        | 0x3200..=0x33FF    // enclosed CJK, CJK compatibility
        | 0x3400..=0x4DBF    // extension A
        | 0x4E00..=0x9FFF    // unified ideographs
        | 0xAC00..=0xD7AF    // Hangul syllables
        | 0xF900..=0xFAFF    // compatibility ideographs
        | 0xFF00..=0xFFEF    // halfwidth and fullwidth forms
        | 0x20000..=0x2FA1F  // extensions B-F, compatibility supplement
        | 0x30000..=0x323AF  // extensions G-H
    )
}

/// Trims; folds case only for Latin terms.
pub fn normalize_term(term: &str, script: Script) -> String {
    let term = term.trim();
    match script {
        Script::Latin => term.to_lowercase(),
        Script::Ideographic => term.to_string(),
    }
}

/// Free text for a raw term, or `None` when the trimmed term is empty.
///
/// The script is detected on the trimmed term: U+3000 is both whitespace
/// and a CJK code point.
pub fn free_text(raw_term: &str) -> Option<FreeText> {
    let term = raw_term.trim();
    if term.is_empty() {
        return None;
    }
    let script = detect_script(term);
    Some(FreeText {
        term: normalize_term(term, script),
        script,
    })
}

pub fn signature(facets: &FilterRecord, raw_term: &str) -> QuerySignature {
    QuerySignature {
        facets: facets.clone(),
        free_text: free_text(raw_term),
    }
}

/// Pure: equal inputs always give structurally equal descriptors.
pub fn build(facets: &FilterRecord, raw_term: &str, cursor: Option<&OpaqueCursor>) -> QueryDescriptor {
    QueryDescriptor::new(facets.clone(), free_text(raw_term), cursor.cloned())
}
