//! crates/files/src/binary.rs
//! Text versus binary classification.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes sampled by [`is_binary`].
pub const SAMPLE_SIZE: usize = 2048;

/// Reports whether the file at `path` looks like binary data.
///
/// The first [`SAMPLE_SIZE`] bytes are decoded as UTF-8; a decode failure
/// means binary, otherwise the text is judged by [`is_binary_text`]. A
/// multibyte character cut off by the sample boundary does not count as a
/// failure. Paths that cannot be read are reported as not binary.
#[must_use]
pub fn is_binary(path: impl AsRef<Path>) -> bool {
    let Ok(file) = File::open(path.as_ref()) else {
        return false;
    };
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    if file.take(SAMPLE_SIZE as u64).read_to_end(&mut sample).is_err() {
        return false;
    }

    let text = match std::str::from_utf8(&sample) {
        Ok(text) => text,
        Err(error) if error.error_len().is_none() && sample.len() == SAMPLE_SIZE => {
            let valid = &sample[..error.valid_up_to()];
            match std::str::from_utf8(valid) {
                Ok(text) => text,
                Err(_) => return true,
            }
        }
        Err(_) => return true,
    };
    is_binary_text(text)
}

/// Reports whether `text` looks like binary data.
///
/// Text containing a NUL character is binary and empty text is not.
/// Otherwise the text is binary when more than 30% of its characters fall
/// outside printable ASCII, ASCII whitespace and backspace.
///
/// ```
/// use files::is_binary_text;
///
/// assert!(!is_binary_text("plain text\n"));
/// assert!(is_binary_text("nul\0inside"));
/// assert!(is_binary_text("\u{1}\u{2}\u{3}ok"));
/// ```
#[must_use]
pub fn is_binary_text(text: &str) -> bool {
    if text.contains('\0') {
        return true;
    }
    if text.is_empty() {
        return false;
    }

    let (total, nontext) = text.chars().fold((0usize, 0usize), |(total, nontext), c| {
        (total + 1, nontext + usize::from(!is_text_char(c)))
    });
    nontext * 10 > total * 3
}

const fn is_text_char(c: char) -> bool {
    c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x08' | '\x0b' | '\x0c')
}
