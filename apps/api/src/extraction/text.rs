use crate::extraction::ExtractError;

/// Decodes a plain-text upload. Invalid UTF-8 is an error, never replaced.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8() {
        assert_eq!(extract("Prix: 5 €".as_bytes()).unwrap(), "Prix: 5 €");
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let err = extract(&[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ExtractError::Encoding(_)));
    }
}
