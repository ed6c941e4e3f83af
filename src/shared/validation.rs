use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for the `type` filter forwarded to the Places nearby search.
    /// Pipe-separated lowercase place type identifiers.
    /// - Valid: "restaurant", "restaurant|cafe", "tourist_attraction"
    /// - Invalid: "|cafe", "cafe|", "Cafe", "cafe||bar", "cafe bar"
    pub static ref PLACE_TYPE_FILTER_REGEX: Regex =
        Regex::new(r"^[a-z_]+(?:\|[a-z_]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_type_filter_valid() {
        assert!(PLACE_TYPE_FILTER_REGEX.is_match("restaurant"));
        assert!(PLACE_TYPE_FILTER_REGEX.is_match("restaurant|cafe"));
        assert!(PLACE_TYPE_FILTER_REGEX.is_match("tourist_attraction"));
        assert!(PLACE_TYPE_FILTER_REGEX.is_match("restaurant|cafe|tourist_attraction|store"));
    }

    #[test]
    fn test_place_type_filter_invalid() {
        assert!(!PLACE_TYPE_FILTER_REGEX.is_match("|cafe")); // leading pipe
        assert!(!PLACE_TYPE_FILTER_REGEX.is_match("cafe|")); // trailing pipe
        assert!(!PLACE_TYPE_FILTER_REGEX.is_match("cafe||bar")); // double pipe
        assert!(!PLACE_TYPE_FILTER_REGEX.is_match("Cafe")); // uppercase
        assert!(!PLACE_TYPE_FILTER_REGEX.is_match("cafe bar")); // space
        assert!(!PLACE_TYPE_FILTER_REGEX.is_match("")); // empty
    }
}
