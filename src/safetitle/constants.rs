//! Fixed rule data and user-facing strings.
//!
//! The filename rules cover what Linux, macOS, and Windows will refuse to
//! create:
//! - No forbidden character: `* " \ / < > : | ?`
//! - No non-printable ASCII characters: `0-31` (0x00 to 0x1f)
//! - No reserved file names:
//!   - Windows: `CON PRN AUX NUL COM[0-9] LPT[0-9]` with or without extension
//!   - Linux/macOS: `. ..`
//! - Cannot end in a space or dot

/// Characters no target filesystem accepts in a file name.
pub const FORBIDDEN_CHARS: [char; 9] = ['*', '"', '\\', '/', '<', '>', ':', '|', '?'];

/// Highest ASCII control code rejected in names (0x00 through 0x1f).
pub const LAST_CONTROL_CHAR: char = '\x1f';

/// Windows device names that are reserved on their own.
pub const RESERVED_DEVICE_NAMES: [&str; 4] = ["CON", "PRN", "AUX", "NUL"];

/// Windows device prefixes that are reserved when followed by a single digit.
///
/// `COM0` and `LPT0` are included even though older Windows releases accept
/// them.
pub const RESERVED_NUMBERED_DEVICES: [&str; 2] = ["COM", "LPT"];

/// Names that refer to the current and parent directory.
pub const RESERVED_DOT_NAMES: [&str; 2] = [".", ".."];

/// Characters a name must not end with.
pub const INVALID_ENDINGS: [char; 2] = ['.', ' '];

pub const ERROR_MESSAGE_CHARS: &str =
    "File name cannot contain any of these characters: * \" \\ / < > : | ?";
pub const ERROR_MESSAGE_ENDING: &str = "File name cannot end in a dot or a space.";
pub const ERROR_MESSAGE_RESERVED: &str =
    "File name cannot be any of these: CON PRN AUX NUL COM[0-9] LPT[0-9]";
pub const ERROR_MESSAGE_DEFAULT: &str = "Invalid filename.";

/// Selector locating the editable title inside an editor view.
pub const TITLE_QUERY_SELECTOR: &str = "div.inline-title";

/// Node name the located title element must have.
pub const TITLE_NODE_NAME: &str = "DIV";

/// Keys the host treats as "commit the title and move on".
///
/// `Escape` is handled by the host too, but it aborts the edit, so there is
/// nothing to guard.
pub const KEYDOWN_INTERCEPTS: [&str; 3] = ["Enter", "Tab", "ArrowDown"];

/// Legacy `keyCode` reported for keystrokes consumed by an input method.
pub const IME_PROCESS_KEY_CODE: u32 = 229;

pub const TOOLTIP_CLASSES: [&str; 2] = ["mod-error", "mod-wide"];
pub const TOOLTIP_PLACEMENT: &str = "bottom";
