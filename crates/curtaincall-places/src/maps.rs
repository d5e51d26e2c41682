//! Map links for recommended venues.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";

/// Characters left unescaped in a form-encoded query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Form-encode a query value, spaces as `+`.
fn quote_plus(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE)
        .to_string()
        .replace("%20", "+")
}

/// Universal maps link that searches by name and address and pins the place ID.
#[must_use]
pub fn map_reference(name: &str, address: &str, place_id: &str) -> String {
    let query = if address.is_empty() {
        name.to_string()
    } else {
        format!("{name}, {address}")
    };
    format!(
        "{MAPS_SEARCH_URL}&query={}&query_place_id={}",
        quote_plus(&query),
        quote_plus(place_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_search_link_with_place_id() {
        let url = map_reference("Joe's Diner", "12 Main St, Springfield", "ChIJ123-abc_Z");
        assert_eq!(
            url,
            "https://www.google.com/maps/search/?api=1&query=Joe%27s+Diner%2C+12+Main+St%2C+Springfield&query_place_id=ChIJ123-abc_Z"
        );
    }

    #[test]
    fn literal_percent_is_not_mistaken_for_space() {
        let url = map_reference("100%20 Club", "", "id");
        assert!(url.contains("query=100%2520+Club"), "got {url}");
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = map_reference("Café Ünter", "Straße 1", "p1");
        let b = map_reference("Café Ünter", "Straße 1", "p1");
        assert_eq!(a, b);
        assert!(a.contains("Caf%C3%A9"), "got {a}");
    }

    #[test]
    fn missing_address_uses_name_only() {
        let url = map_reference("Corner Bistro", "", "p9");
        assert!(url.contains("query=Corner+Bistro&"), "got {url}");
    }
}
