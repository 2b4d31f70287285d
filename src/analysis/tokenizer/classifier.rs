//! Character classification and normalization.
//!
//! Every character read by the scanners goes through [`Classifier::classify`],
//! which normalizes it and sorts it into one of three classes:
//!
//! - [`CharClass::Single`]: Latin letters, digits and allowed signs, lower-cased
//!   and folded from full-width to half-width.
//! - [`CharClass::Double`]: kana, kanji and any other letter outside the
//!   Latin and half-width/full-width blocks. Half-width katakana is widened,
//!   and merged with a following dakuten/handakuten mark when possible.
//! - [`CharClass::Symbol`]: everything else, skipped by the scanners.

use std::ops::RangeInclusive;

use unicode_general_category::{GeneralCategory, get_general_category};

use super::sign::SignTable;
use super::source::{CharSource, Cursor, Unit};
use crate::error::Result;

/// Basic Latin block.
const BASIC_LATIN: RangeInclusive<u32> = 0x0000..=0x007F;

/// Halfwidth and Fullwidth Forms block.
const HALFWIDTH_AND_FULLWIDTH_FORMS: RangeInclusive<u32> = 0xFF00..=0xFFEF;

/// Full-width ASCII variants, `！` through `～`.
const FULLWIDTH_ASCII: RangeInclusive<u32> = 0xFF01..=0xFF5E;

/// Distance between a full-width ASCII variant and its ASCII character.
const FULLWIDTH_DELTA: u32 = 0xFEE0;

/// Half-width katakana, `ｦ` through `ﾟ`.
const HALFWIDTH_KATAKANA: RangeInclusive<u32> = 0xFF66..=0xFF9F;

const HALFWIDTH_DAKUTEN: char = 'ﾞ';
const HALFWIDTH_HANDAKUTEN: char = 'ﾟ';

/// Full-width forms of the half-width katakana block, in code point order.
const HALFWIDTH_TO_FULLWIDTH_KANA: [char; 58] = [
    'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', // ｦ ｧ ｨ ｩ ｪ ｫ ｬ ｭ
    'ョ', 'ッ', 'ー', 'ア', 'イ', 'ウ', 'エ', 'オ', // ｮ ｯ ｰ ｱ ｲ ｳ ｴ ｵ
    'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', // ｶ ｷ ｸ ｹ ｺ ｻ ｼ ｽ
    'セ', 'ソ', 'タ', 'チ', 'ツ', 'テ', 'ト', 'ナ', // ｾ ｿ ﾀ ﾁ ﾂ ﾃ ﾄ ﾅ
    'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', // ﾆ ﾇ ﾈ ﾉ ﾊ ﾋ ﾌ ﾍ
    'ホ', 'マ', 'ミ', 'ム', 'メ', 'モ', 'ヤ', 'ユ', // ﾎ ﾏ ﾐ ﾑ ﾒ ﾓ ﾔ ﾕ
    'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン', // ﾖ ﾗ ﾘ ﾙ ﾚ ﾛ ﾜ ﾝ
    '゛', '゜', // ﾞ ﾟ
];

/// Character class used by the scanners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Skipped; also what end of input counts as.
    Symbol,
    /// Latin letters, digits and allowed signs.
    Single,
    /// Kana, kanji and other non-Latin letters.
    Double,
}

/// A normalized character and where it came from in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classified {
    /// Normalized value.
    pub value: char,
    /// Class of the normalized value.
    pub class: CharClass,
    /// True when a half-width kana and its voicing mark were merged.
    pub combined: bool,
    /// Source offset of the first character consumed.
    pub start: usize,
    /// Number of source characters consumed.
    pub width: usize,
}

impl Classified {
    /// Source offset just past this character.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    /// The unit to push back so the value is re-read at the same offset.
    #[inline]
    pub(crate) fn unit(&self) -> Unit {
        Unit {
            value: self.value,
            width: self.width,
        }
    }
}

/// Classifies characters according to an immutable configuration.
#[derive(Clone, Debug)]
pub struct Classifier {
    allowed_sign: SignTable,
    capitalize_kana: bool,
}

impl Classifier {
    pub fn new(allowed_sign: SignTable, capitalize_kana: bool) -> Self {
        Classifier {
            allowed_sign,
            capitalize_kana,
        }
    }

    /// Read and classify the next character, `Ok(None)` at end of input.
    ///
    /// A half-width katakana consumes one character of lookahead; the
    /// lookahead is pushed back unless it was merged in as a voicing mark.
    pub(crate) fn classify<S: CharSource>(
        &self,
        cursor: &mut Cursor<S>,
    ) -> Result<Option<Classified>> {
        let start = cursor.position();
        let Some(unit) = cursor.read()? else {
            return Ok(None);
        };
        let mut classified = Classified {
            value: normalize_wave_dash(unit.value),
            class: CharClass::Symbol,
            combined: false,
            start,
            width: unit.width,
        };

        let code = classified.value as u32;
        if BASIC_LATIN.contains(&code) || HALFWIDTH_AND_FULLWIDTH_FORMS.contains(&code) {
            let c = fold_fullwidth(classified.value);
            if HALFWIDTH_KATAKANA.contains(&(c as u32)) {
                classified.class = CharClass::Double;
                match cursor.read()? {
                    Some(mark) => match voice(c, mark.value) {
                        Some(voiced) => {
                            classified.value = voiced;
                            classified.combined = true;
                            classified.width += mark.width;
                        }
                        None => {
                            cursor.unread(mark);
                            classified.value = self.widen_kana(c);
                        }
                    },
                    None => classified.value = self.widen_kana(c),
                }
            } else if c.is_alphanumeric() || self.allowed_sign.contains(c) {
                classified.class = CharClass::Single;
                classified.value = c.to_ascii_lowercase();
            } else {
                classified.value = c;
            }
        } else if is_letter(classified.value) {
            classified.class = CharClass::Double;
            classified.value = self.fold_small_kana(classified.value);
        }

        Ok(Some(classified))
    }

    fn widen_kana(&self, c: char) -> char {
        let index = (c as u32 - HALFWIDTH_KATAKANA.start()) as usize;
        self.fold_small_kana(HALFWIDTH_TO_FULLWIDTH_KANA[index])
    }

    fn fold_small_kana(&self, c: char) -> char {
        if self.capitalize_kana {
            capitalize_kana(c)
        } else {
            c
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(SignTable::new(crate::config::DEFAULT_ALLOWED_SIGN), true)
    }
}

/// Wave dashes count as the prolonged sound mark.
#[inline]
fn normalize_wave_dash(c: char) -> char {
    match c {
        '～' | '〜' => 'ー',
        _ => c,
    }
}

/// Letters proper (general category `L*`). Letter-like numbers and
/// symbols such as `Ⅲ` or `Ⓐ` are not included.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Fold a full-width ASCII variant to ASCII, leaving anything else alone.
#[inline]
fn fold_fullwidth(c: char) -> char {
    let code = c as u32;
    if FULLWIDTH_ASCII.contains(&code) {
        char::from_u32(code - FULLWIDTH_DELTA).unwrap_or(c)
    } else {
        c
    }
}

/// Merge a half-width kana with a following half-width voicing mark.
fn voice(base: char, mark: char) -> Option<char> {
    match mark {
        HALFWIDTH_DAKUTEN => dakuten(base),
        HALFWIDTH_HANDAKUTEN => handakuten(base),
        _ => None,
    }
}

fn dakuten(base: char) -> Option<char> {
    let voiced = match base {
        'ｶ' => 'ガ',
        'ｷ' => 'ギ',
        'ｸ' => 'グ',
        'ｹ' => 'ゲ',
        'ｺ' => 'ゴ',
        'ｻ' => 'ザ',
        'ｼ' => 'ジ',
        'ｽ' => 'ズ',
        'ｾ' => 'ゼ',
        'ｿ' => 'ゾ',
        'ﾀ' => 'ダ',
        'ﾁ' => 'ヂ',
        'ﾂ' => 'ヅ',
        'ﾃ' => 'デ',
        'ﾄ' => 'ド',
        'ﾊ' => 'バ',
        'ﾋ' => 'ビ',
        'ﾌ' => 'ブ',
        'ﾍ' => 'ベ',
        'ﾎ' => 'ボ',
        _ => return None,
    };
    Some(voiced)
}

fn handakuten(base: char) -> Option<char> {
    let voiced = match base {
        'ﾊ' => 'パ',
        'ﾋ' => 'ピ',
        'ﾌ' => 'プ',
        'ﾍ' => 'ペ',
        'ﾎ' => 'ポ',
        _ => return None,
    };
    Some(voiced)
}

/// Fold small hiragana/katakana to their plain forms.
pub fn capitalize_kana(c: char) -> char {
    match c {
        'ぁ' => 'あ',
        'ぃ' => 'い',
        'ぅ' => 'う',
        'ぇ' => 'え',
        'ぉ' => 'お',
        'ゃ' => 'や',
        'ゅ' => 'ゆ',
        'ょ' => 'よ',
        'っ' => 'つ',
        'ァ' => 'ア',
        'ィ' => 'イ',
        'ゥ' => 'ウ',
        'ェ' => 'エ',
        'ォ' => 'オ',
        'ャ' => 'ヤ',
        'ュ' => 'ユ',
        'ョ' => 'ヨ',
        'ッ' => 'ツ',
        'ゎ' => 'わ',
        'ヮ' => 'ワ',
        'ヵ' => 'カ',
        'ヶ' => 'ケ',
        _ => c,
    }
}
