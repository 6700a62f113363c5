//! Content hashing for generated metric identifiers.

use md5::{Digest, Md5};

/// Hash the inputs that determine a generated metric.
///
/// The digest covers `{expression}#{title}#{format}`, so identical inputs always
/// yield the same identifier and any change to the expression (for example a
/// different filter element set) yields a different one.
/// Returns a 32-character lowercase hexadecimal string.
pub fn content_hash(expression: &str, title: &str, format: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(expression.as_bytes());
    hasher.update(b"#");
    hasher.update(title.as_bytes());
    hasher.update(b"#");
    hasher.update(format.as_bytes());
    format!("{:x}", hasher.finalize())
}
