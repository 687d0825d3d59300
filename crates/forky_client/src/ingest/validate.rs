//! Superficial check of the repository field before anything is sent.

use crate::error::ValidationError;

/// Accepts anything mentioning `github.com/` or starting with an http(s) scheme.
/// Returns the trimmed input.
pub fn validate_repository(input: &str) -> Result<&str, ValidationError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyRepository);
    }
    let looks_like_repo = value.contains("github.com/")
        || value.starts_with("https://")
        || value.starts_with("http://");
    if !looks_like_repo {
        return Err(ValidationError::InvalidRepository);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank() {
        assert_eq!(validate_repository(""), Err(ValidationError::EmptyRepository));
        assert_eq!(validate_repository("  \t"), Err(ValidationError::EmptyRepository));
    }

    #[test]
    fn rejects_free_text() {
        assert_eq!(
            validate_repository("not a url"),
            Err(ValidationError::InvalidRepository)
        );
        assert_eq!(
            validate_repository("ftp://github.org/x"),
            Err(ValidationError::InvalidRepository)
        );
    }

    #[test]
    fn accepts_urls_and_github_references() {
        assert_eq!(
            validate_repository("  https://github.com/foo/bar "),
            Ok("https://github.com/foo/bar")
        );
        assert_eq!(validate_repository("github.com/foo/bar"), Ok("github.com/foo/bar"));
        assert_eq!(
            validate_repository("http://gitlab.example/foo"),
            Ok("http://gitlab.example/foo")
        );
    }
}
