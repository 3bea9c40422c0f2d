//! Safety checks on response metadata, run before any body byte is persisted.

use crate::error::ValidationError;
use crate::response::ResponseMeta;

/// Required prefix of the lowercased `Content-Type`.
pub const IMAGE_PREFIX: &str = "image/";

/// Checks the declared content type and size of a successful response.
///
/// A missing `Content-Type` is treated as empty and rejected. A missing
/// `Content-Length` passes; the cap only applies to declared sizes. A declared
/// length that is not a plain decimal number is rejected, and one too large
/// for a `u64` counts as over the cap.
pub fn validate_response(meta: &ResponseMeta, max_content_length: u64) -> Result<(), ValidationError> {
    let content_type = meta
        .content_type
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    if !content_type.starts_with(IMAGE_PREFIX) {
        return Err(ValidationError::InvalidContentType(content_type));
    }

    if let Some(raw) = meta.content_length.as_deref() {
        check_declared_length(raw.trim(), max_content_length)?;
    }
    Ok(())
}

fn check_declared_length(declared: &str, limit: u64) -> Result<(), ValidationError> {
    if declared.is_empty() || !declared.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidContentLength(declared.to_string()));
    }
    // All digits: the only parse failure left is overflow.
    let too_large = declared.parse::<u64>().map_or(true, |n| n > limit);
    if too_large {
        return Err(ValidationError::ContentTooLarge {
            declared: declared.to_string(),
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 10 * 1024 * 1024;

    fn meta(content_type: Option<&str>, len: Option<u64>) -> ResponseMeta {
        ResponseMeta {
            status: Some(200),
            content_type: content_type.map(str::to_string),
            content_length: len.map(|n| n.to_string()),
        }
    }

    fn meta_raw_len(len: &str) -> ResponseMeta {
        ResponseMeta {
            status: Some(200),
            content_type: Some("image/png".to_string()),
            content_length: Some(len.to_string()),
        }
    }

    #[test]
    fn accepts_images() {
        assert_eq!(validate_response(&meta(Some("image/png"), Some(1024)), LIMIT), Ok(()));
        assert_eq!(validate_response(&meta(Some("Image/JPEG"), None), LIMIT), Ok(()));
        assert_eq!(
            validate_response(&meta(Some("image/svg+xml; charset=utf-8"), None), LIMIT),
            Ok(())
        );
    }

    #[test]
    fn rejects_html() {
        assert_eq!(
            validate_response(&meta(Some("text/html; charset=UTF-8"), Some(10)), LIMIT),
            Err(ValidationError::InvalidContentType("text/html; charset=utf-8".into()))
        );
    }

    #[test]
    fn rejects_missing_content_type() {
        assert_eq!(
            validate_response(&meta(None, Some(10)), LIMIT),
            Err(ValidationError::InvalidContentType(String::new()))
        );
    }

    #[test]
    fn rejects_declared_size_over_cap() {
        assert_eq!(
            validate_response(&meta(Some("image/png"), Some(11_000_000)), LIMIT),
            Err(ValidationError::ContentTooLarge {
                declared: "11000000".into(),
                limit: LIMIT
            })
        );
    }

    #[test]
    fn overflowing_length_is_too_large() {
        assert_eq!(
            validate_response(&meta_raw_len("99999999999999999999999"), LIMIT),
            Err(ValidationError::ContentTooLarge {
                declared: "99999999999999999999999".into(),
                limit: LIMIT
            })
        );
    }

    #[test]
    fn non_numeric_length_is_rejected() {
        for raw in ["-5", "lots", "11000000, 11000000", "", "+12", "1.5"] {
            assert_eq!(
                validate_response(&meta_raw_len(raw), LIMIT),
                Err(ValidationError::InvalidContentLength(raw.to_string())),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn padded_length_is_trimmed() {
        assert_eq!(validate_response(&meta_raw_len(" 1024 "), LIMIT), Ok(()));
    }

    #[test]
    fn size_exactly_at_cap_passes() {
        assert_eq!(validate_response(&meta(Some("image/png"), Some(LIMIT)), LIMIT), Ok(()));
    }

    #[test]
    fn content_type_checked_before_size() {
        let err = validate_response(&meta(Some("application/zip"), Some(u64::MAX)), LIMIT).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidContentType(_)));
    }
}
