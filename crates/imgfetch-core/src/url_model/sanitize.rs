//! Rejection of path segments that are unsafe as local filenames.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// True when `name` can be joined onto the output directory without escaping it
/// or producing an invalid filename.
///
/// Rejects empty names, `.` and `..`, path separators, NUL and control
/// characters, and names longer than 255 bytes. Accepted names are used
/// verbatim; nothing is rewritten.
pub fn is_safe_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." || name.len() > NAME_MAX {
        return false;
    }
    !name
        .chars()
        .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}
