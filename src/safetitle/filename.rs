//! Cross-platform filename classification.
//!
//! A name is accepted only if Linux, macOS, and Windows would all allow a file
//! with that name to be created. The rules themselves live in
//! [`crate::constants`]; this module applies them in a fixed order so that
//! exactly one [`InvalidReason`] is reported per rejected name:
//!
//! 1. Empty (or absent) names
//! 2. Forbidden characters, including ASCII control codes
//! 3. A trailing dot or space
//! 4. Reserved names (`.`, `..`, and the Windows device names)
//!
//! Matching is done on chars. Anything outside the forbidden set is allowed,
//! so non-Latin scripts pass untouched. Only the reserved-name check ignores
//! case.
//!
//! # Examples
//! ```
//! use safetitle::filename::{classify, is_invalid, InvalidReason, Verdict};
//!
//! assert_eq!(classify("notes.md"), Verdict::Valid);
//! assert_eq!(classify("<foo>.txt"), Verdict::Invalid(InvalidReason::ForbiddenCharacter));
//! assert_eq!(classify("lpt1"), Verdict::Invalid(InvalidReason::Reserved));
//! assert!(!is_invalid("LPT10"));
//! ```

use crate::constants::{
    ERROR_MESSAGE_CHARS, ERROR_MESSAGE_DEFAULT, ERROR_MESSAGE_ENDING, ERROR_MESSAGE_RESERVED,
    FORBIDDEN_CHARS, INVALID_ENDINGS, LAST_CONTROL_CHAR, RESERVED_DEVICE_NAMES, RESERVED_DOT_NAMES,
    RESERVED_NUMBERED_DEVICES,
};
use serde::Serialize;

/// Why a filename was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// The name is empty or absent.
    Empty,
    /// The name contains a character like `/ \ < >` or a control code.
    ForbiddenCharacter,
    /// The name ends in a dot or a space.
    InvalidEnding,
    /// The name is reserved, like `CON` on Windows or `..` everywhere.
    Reserved,
}

impl InvalidReason {
    /// The message shown to a user whose input was rejected for this reason.
    ///
    /// Empty names are never reported while typing, so they fall back to the
    /// generic message.
    pub fn message(self) -> &'static str {
        match self {
            InvalidReason::ForbiddenCharacter => ERROR_MESSAGE_CHARS,
            InvalidReason::InvalidEnding => ERROR_MESSAGE_ENDING,
            InvalidReason::Reserved => ERROR_MESSAGE_RESERVED,
            InvalidReason::Empty => ERROR_MESSAGE_DEFAULT,
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for InvalidReason {}

/// Outcome of classifying a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Valid,
    Invalid(InvalidReason),
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn reason(self) -> Option<InvalidReason> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(reason) => Some(reason),
        }
    }
}

/// Classifies `name`, reporting the first rule it breaks.
///
/// Accepts either a `&str` or an `Option<&str>`, where `None` stands for a
/// name that was never supplied and is treated like the empty string.
pub fn classify<'a>(name: impl Into<Option<&'a str>>) -> Verdict {
    let name = match name.into() {
        Some(name) if !name.is_empty() => name,
        _ => return Verdict::Invalid(InvalidReason::Empty),
    };

    if name.chars().any(is_forbidden_char) {
        Verdict::Invalid(InvalidReason::ForbiddenCharacter)
    } else if has_invalid_ending(name) {
        Verdict::Invalid(InvalidReason::InvalidEnding)
    } else if is_reserved(name) {
        Verdict::Invalid(InvalidReason::Reserved)
    } else {
        Verdict::Valid
    }
}

/// Returns `true` if `name` breaks any rule.
///
/// Agrees with [`classify`] on every input, without working out which rule
/// was broken.
pub fn is_invalid<'a>(name: impl Into<Option<&'a str>>) -> bool {
    match name.into() {
        None => true,
        Some(name) => {
            name.is_empty()
                || name.chars().any(is_forbidden_char)
                || has_invalid_ending(name)
                || is_reserved(name)
        }
    }
}

/// The message to show for `name`, or `None` if it is valid.
pub fn rejection_message<'a>(name: impl Into<Option<&'a str>>) -> Option<&'static str> {
    classify(name).reason().map(InvalidReason::message)
}

/// [`classify`] for callers that want to propagate the rejection with `?`.
pub fn validate_filename(name: &str) -> Result<(), InvalidReason> {
    match classify(name) {
        Verdict::Valid => Ok(()),
        Verdict::Invalid(reason) => Err(reason),
    }
}

fn is_forbidden_char(ch: char) -> bool {
    ch <= LAST_CONTROL_CHAR || FORBIDDEN_CHARS.contains(&ch)
}

fn has_invalid_ending(name: &str) -> bool {
    name.ends_with(INVALID_ENDINGS)
}

/// `.` and `..`, or a device name standing alone or directly before a dot.
fn is_reserved(name: &str) -> bool {
    if RESERVED_DOT_NAMES.contains(&name) {
        return true;
    }
    let stem = name.split_once('.').map_or(name, |(stem, _)| stem);
    is_device_name(stem)
}

fn is_device_name(stem: &str) -> bool {
    if RESERVED_DEVICE_NAMES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(stem))
    {
        return true;
    }

    // COM0-COM9 and LPT0-LPT9: a three letter prefix plus exactly one digit.
    match (stem.get(..3), stem.get(3..)) {
        (Some(prefix), Some(digit)) => {
            digit.len() == 1
                && digit.bytes().all(|b| b.is_ascii_digit())
                && RESERVED_NUMBERED_DEVICES
                    .iter()
                    .any(|device| device.eq_ignore_ascii_case(prefix))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CASES: &[(&str, Option<InvalidReason>)] = &[
        ("", Some(InvalidReason::Empty)),
        ("foo", None),
        ("bar.txt", None),
        ("<foo>.txt", Some(InvalidReason::ForbiddenCharacter)),
        ("<bar.txt", Some(InvalidReason::ForbiddenCharacter)),
        ("foo>.md", Some(InvalidReason::ForbiddenCharacter)),
        ("hello:world", Some(InvalidReason::ForbiddenCharacter)),
        ("?", Some(InvalidReason::ForbiddenCharacter)),
        ("Why?", Some(InvalidReason::ForbiddenCharacter)),
        ("foo-\x00-bar.txt", Some(InvalidReason::ForbiddenCharacter)),
        ("com1-.jpg", None),
        ("lpt1", Some(InvalidReason::Reserved)),
        ("LPT10", None),
        ("COM0", Some(InvalidReason::Reserved)),
        ("COM6.okay.txt", Some(InvalidReason::Reserved)),
        ("foo.", Some(InvalidReason::InvalidEnding)),
        ("bar ", Some(InvalidReason::InvalidEnding)),
        ("hello\nworld", Some(InvalidReason::ForbiddenCharacter)),
        ("foo\tbar", Some(InvalidReason::ForbiddenCharacter)),
        ("بسوی-زیبایی.flv", None),
    ];

    fn expected_verdict(reason: Option<InvalidReason>) -> Verdict {
        reason.map_or(Verdict::Valid, Verdict::Invalid)
    }

    #[test]
    fn test_classify_table() {
        for (name, reason) in CASES {
            assert_eq!(
                classify(*name),
                expected_verdict(*reason),
                "unexpected verdict for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_is_invalid_table() {
        for (name, reason) in CASES {
            assert_eq!(is_invalid(*name), reason.is_some(), "{:?}", name);
        }
    }

    #[test]
    fn test_absent_name_is_empty() {
        assert_eq!(
            classify(None::<&str>),
            Verdict::Invalid(InvalidReason::Empty)
        );
        assert!(is_invalid(None::<&str>));
    }

    #[test]
    fn test_dot_names_are_reserved() {
        assert_eq!(
            classify("."),
            Verdict::Invalid(InvalidReason::InvalidEnding)
        );
        assert_eq!(
            classify(".."),
            Verdict::Invalid(InvalidReason::InvalidEnding)
        );
        assert!(is_reserved("."));
        assert!(is_reserved(".."));
        assert_eq!(classify(".hidden"), Verdict::Valid);
    }

    #[test]
    fn test_device_names_any_case() {
        for name in ["CON", "con", "Prn", "aUx", "nul.txt", "Com9.tar.gz", "lpt0"] {
            assert_eq!(
                classify(name),
                Verdict::Invalid(InvalidReason::Reserved),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn test_device_names_must_lead_the_name() {
        assert_eq!(classify("xCON"), Verdict::Valid);
        assert_eq!(classify("my.con"), Verdict::Valid);
        assert_eq!(classify("CONSOLE"), Verdict::Valid);
        assert_eq!(classify("COMX"), Verdict::Valid);
        assert_eq!(classify("COM"), Verdict::Valid);
        assert_eq!(classify("com1-"), Verdict::Valid);
    }

    #[test]
    fn test_non_ascii_digits_are_not_device_numbers() {
        assert_eq!(classify("COM١"), Verdict::Valid);
        assert_eq!(classify("LPT²"), Verdict::Valid);
    }

    #[test]
    fn test_forbidden_beats_ending_and_reserved() {
        assert_eq!(
            classify("CON:"),
            Verdict::Invalid(InvalidReason::ForbiddenCharacter)
        );
        assert_eq!(
            classify("a|b."),
            Verdict::Invalid(InvalidReason::ForbiddenCharacter)
        );
    }

    #[test]
    fn test_ending_beats_reserved() {
        assert_eq!(
            classify("NUL."),
            Verdict::Invalid(InvalidReason::InvalidEnding)
        );
        assert_eq!(
            classify("AUX "),
            Verdict::Invalid(InvalidReason::InvalidEnding)
        );
    }

    #[test]
    fn test_delete_char_is_allowed() {
        assert_eq!(classify("del\x7fete"), Verdict::Valid);
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("Groceries").is_ok());
        assert_eq!(
            validate_filename("a/b"),
            Err(InvalidReason::ForbiddenCharacter)
        );
    }

    #[test]
    fn test_messages_per_reason() {
        assert_eq!(
            InvalidReason::ForbiddenCharacter.message(),
            ERROR_MESSAGE_CHARS
        );
        assert_eq!(InvalidReason::InvalidEnding.message(), ERROR_MESSAGE_ENDING);
        assert_eq!(InvalidReason::Reserved.message(), ERROR_MESSAGE_RESERVED);
        assert_eq!(InvalidReason::Empty.message(), ERROR_MESSAGE_DEFAULT);
        assert_eq!(
            InvalidReason::InvalidEnding.to_string(),
            "File name cannot end in a dot or a space."
        );
    }

    #[test]
    fn test_rejection_message() {
        assert_eq!(rejection_message("ok"), None);
        assert_eq!(rejection_message("a*b"), Some(ERROR_MESSAGE_CHARS));
        assert_eq!(rejection_message("LPT3.log"), Some(ERROR_MESSAGE_RESERVED));
        assert_eq!(rejection_message(None::<&str>), Some(ERROR_MESSAGE_DEFAULT));
    }

    #[test]
    fn test_verdict_accessors() {
        assert!(Verdict::Valid.is_valid());
        assert_eq!(Verdict::Valid.reason(), None);
        let verdict = Verdict::Invalid(InvalidReason::Reserved);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason(), Some(InvalidReason::Reserved));
    }

    fn forbidden_char() -> impl Strategy<Value = char> {
        prop_oneof![
            proptest::sample::select(FORBIDDEN_CHARS.to_vec()),
            (0u32..0x20).prop_map(|c| char::from_u32(c).unwrap_or('\0')),
        ]
    }

    proptest! {
        #[test]
        fn prop_boolean_form_agrees_with_classify(name in any::<String>()) {
            prop_assert_eq!(is_invalid(name.as_str()), !classify(name.as_str()).is_valid());
        }

        #[test]
        fn prop_classify_is_deterministic(name in any::<String>()) {
            prop_assert_eq!(classify(name.as_str()), classify(name.as_str()));
        }

        #[test]
        fn prop_forbidden_char_wins(
            prefix in any::<String>(),
            bad in forbidden_char(),
            suffix in any::<String>(),
        ) {
            let name = format!("{}{}{}", prefix, bad, suffix);
            prop_assert_eq!(
                classify(name.as_str()),
                Verdict::Invalid(InvalidReason::ForbiddenCharacter)
            );
        }

        #[test]
        fn prop_clean_names_with_bad_ending(stem in "[a-zA-Z0-9_-]{1,12}", end in "[. ]") {
            let name = format!("{}{}", stem, end);
            prop_assert_eq!(
                classify(name.as_str()),
                Verdict::Invalid(InvalidReason::InvalidEnding)
            );
        }

        #[test]
        fn prop_device_names_reserved(
            device in "CON|PRN|AUX|NUL|COM[0-9]|LPT[0-9]",
            lowercase in any::<bool>(),
            ext in proptest::option::of("[a-z]{1,4}"),
        ) {
            let device = if lowercase { device.to_lowercase() } else { device };
            let name = match ext {
                Some(ext) => format!("{}.{}", device, ext),
                None => device,
            };
            prop_assert_eq!(
                classify(name.as_str()),
                Verdict::Invalid(InvalidReason::Reserved)
            );
        }

        #[test]
        fn prop_non_ascii_letters_allowed(name in "[\\p{Arabic}\\p{Han}\\p{Cyrillic}]{1,16}") {
            prop_assert_eq!(classify(name.as_str()), Verdict::Valid);
        }
    }
}
