//! Backslash escaping of pattern occurrences.
//!
//! With escaping enabled, a message author can write `\` in front of an
//! occurrence to keep it from being replaced:
//!
//! - `foo` is a plain match.
//! - `\foo` is an *escaped* match. The backslash belongs to the match and
//!   [`crate::NodeMatch::is_escaped`] is set. The built-in replacers then
//!   emit the occurrence itself and drop the backslash.
//! - `\\foo` is an escaped backslash followed by a plain match. The second
//!   backslash is consumed, so the output is `\` followed by the replacement.
//!
//! After the main pass, a cleanup pass runs the same pattern again and
//! replaces every remaining `\` + occurrence with the bare occurrence. That
//! covers replacers that hand escaped matches back verbatim.

const BACKSLASH: u8 = b'\\';

/// Where the consumed span of an occurrence starting at byte `start` begins,
/// and whether the occurrence is escaped. Bytes before `floor` already belong
/// to a previous match and are never consumed.
pub(crate) fn consumed_start(text: &str, start: usize, floor: usize) -> (usize, bool) {
  let bytes = text.as_bytes();
  let preceded_by = |idx: usize| idx > floor && bytes[idx - 1] == BACKSLASH;

  if !preceded_by(start) {
    return (start, false);
  }
  let escaped = !preceded_by(start - 1);
  (start - 1, escaped)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn classify_occurrences() {
    assert_eq!(consumed_start("foo", 0, 0), (0, false));
    assert_eq!(consumed_start("a foo", 2, 0), (2, false));
    assert_eq!(consumed_start(r"\foo", 1, 0), (0, true));
    assert_eq!(consumed_start(r"\\foo", 2, 0), (1, false));
    assert_eq!(consumed_start(r"x\\\foo", 4, 0), (3, false));
  }

  #[test]
  fn consumed_bytes_stay_consumed() {
    // The backslash at 0 was part of the previous match.
    assert_eq!(consumed_start(r"\foo", 1, 1), (1, false));
    // Only the first backslash was consumed; the second one still escapes.
    assert_eq!(consumed_start(r"\\foo", 2, 1), (1, true));
  }
}
