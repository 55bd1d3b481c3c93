//! Field text normalization.
//!
//! Raw field bytes are decoded with the configured encoding. UTF-8 input
//! that is not valid UTF-8 is decoded again as Windows-1252, so stray
//! single-byte letters survive. Replacement artifacts and invisible characters are
//! dropped, surrounding whitespace is trimmed, and the result is case folded.
//! Visually identical values therefore always produce the same key.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Case folding applied after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseFold {
    /// Fold to upper case.
    #[default]
    Upper,
    /// Keep the original casing.
    Preserve,
}

/// Decodes and cleans field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    encoding: &'static Encoding,
    case_fold: CaseFold,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            case_fold: CaseFold::default(),
        }
    }
}

impl Normalizer {
    pub fn new(encoding: &'static Encoding, case_fold: CaseFold) -> Self {
        Self {
            encoding,
            case_fold,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn case_fold(&self) -> CaseFold {
        self.case_fold
    }

    /// Decodes raw bytes without failing on malformed input.
    ///
    /// With UTF-8 configured, bytes that are not valid UTF-8 are decoded as
    /// Windows-1252 instead. Other encodings replace malformed sequences
    /// with U+FFFD.
    pub fn decode<'a>(&self, raw: &'a [u8]) -> Cow<'a, str> {
        let (text, malformed) = self.encoding.decode_without_bom_handling(raw);
        if malformed && self.encoding == UTF_8 {
            let (fallback, _) = WINDOWS_1252.decode_without_bom_handling(raw);
            return fallback;
        }
        text
    }

    /// Decodes and cleans a data field.
    pub fn normalize(&self, raw: &[u8]) -> String {
        self.clean(&self.decode(raw))
    }

    /// Cleans already-decoded text. Applying it twice equals applying it once.
    pub fn clean(&self, text: &str) -> String {
        let stripped = strip_artifacts(text);
        let trimmed = stripped.trim();
        match self.case_fold {
            CaseFold::Upper => trimmed.to_uppercase(),
            CaseFold::Preserve => trimmed.to_string(),
        }
    }

    /// Cleans a header cell. Headers are matched literally, so no case folding.
    pub fn header(&self, raw: &[u8]) -> String {
        strip_artifacts(&self.decode(raw)).trim().to_string()
    }
}

fn strip_artifacts(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_artifact) {
        Cow::Owned(text.chars().filter(|ch| !is_artifact(*ch)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn is_artifact(ch: char) -> bool {
    ch.is_control()
        || matches!(
            ch,
            '\u{fffd}' | '\u{feff}' | '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{2060}'
        )
}
