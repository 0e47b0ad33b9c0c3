/// A parsed location query: either a place name or an explicit coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Named { name: String },
    Coordinate { latitude: f64, longitude: f64 },
}

/// Parse free-text user input into a [`LocationQuery`].
///
/// Input containing a comma is split once and both sides are trimmed and
/// parsed as floating-point coordinates. Anything else is treated as a place
/// name. Coordinates are not range-checked; out-of-range values are forwarded
/// to the API, which reports them as not found.
///
/// Total function: input with a comma but non-numeric components falls back
/// to a place-name query, so malformed text still surfaces as an API-level
/// "not found" rather than a resolution error. Callers are expected to guard
/// against blank input before resolving.
pub fn resolve(raw: &str) -> LocationQuery {
    let trimmed = raw.trim();

    if let Some((lhs, rhs)) = trimmed.split_once(',') {
        let lat = lhs.trim().parse::<f64>();
        let lon = rhs.trim().parse::<f64>();

        if let (Ok(latitude), Ok(longitude)) = (lat, lon) {
            return LocationQuery::Coordinate { latitude, longitude };
        }
    }

    LocationQuery::Named { name: trimmed.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_numbers_resolve_to_coordinates() {
        let q = resolve(" 1.2 , 3.4");
        assert_eq!(q, LocationQuery::Coordinate { latitude: 1.2, longitude: 3.4 });
    }

    #[test]
    fn negative_coordinates_are_parsed() {
        let q = resolve("-1.28,36.82");
        assert_eq!(q, LocationQuery::Coordinate { latitude: -1.28, longitude: 36.82 });
    }

    #[test]
    fn plain_text_resolves_to_named_query_trimmed() {
        let q = resolve("  Nairobi ");
        assert_eq!(q, LocationQuery::Named { name: "Nairobi".to_string() });
    }

    #[test]
    fn out_of_range_coordinates_pass_through_unchecked() {
        let q = resolve("999.0, -720.5");
        assert_eq!(q, LocationQuery::Coordinate { latitude: 999.0, longitude: -720.5 });
    }

    #[test]
    fn non_numeric_comma_input_falls_back_to_named() {
        let q = resolve("Washington, DC");
        assert_eq!(q, LocationQuery::Named { name: "Washington, DC".to_string() });
    }

    #[test]
    fn empty_input_resolves_to_empty_name() {
        // Callers guard against this; the empty name is rejected downstream.
        let q = resolve("   ");
        assert_eq!(q, LocationQuery::Named { name: String::new() });
    }
}
