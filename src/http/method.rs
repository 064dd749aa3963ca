//! HTTP method names and token checks

/// HTTP GET method
pub const GET: &str = "GET";

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP PUT method
pub const PUT: &str = "PUT";

/// HTTP HEAD method
pub const HEAD: &str = "HEAD";

/// Check if a string is a valid RFC 9110 method token
///
/// Custom methods are legal as long as every character is a `tchar`.
pub fn is_token(method: &str) -> bool {
    !method.is_empty()
        && method.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
                )
        })
}

/// Infer HTTP method based on whether the request has data
pub fn infer(has_data: bool) -> &'static str {
    if has_data {
        POST
    } else {
        GET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_token() {
        assert!(is_token("GET"));
        assert!(is_token("PROPFIND"));
        assert!(is_token("M-SEARCH"));
        assert!(!is_token(""));
        assert!(!is_token("GET POST"));
        assert!(!is_token("GE\"T"));
        assert!(!is_token("get/"));
        assert!(!is_token("GÉT"));
    }

    #[test]
    fn test_infer() {
        assert_eq!(infer(false), GET);
        assert_eq!(infer(true), POST);
    }
}
