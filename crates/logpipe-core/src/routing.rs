//! Route-template normalization for low-cardinality telemetry labels
//! (spec §4.9).

const STATIC_SEGMENTS: [&str; 8] =
    ["api", "log", "logs", "health", "stats", "metrics", "docs", "openapi.json"];

/// Collapse dynamic path segments to `{param}` so per-request telemetry
/// doesn't explode HTTP label cardinality.
///
/// A segment is replaced when it contains a digit, or when it is longer
/// than 10 characters and not one of the known static segments.
#[must_use]
pub fn normalize_route(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.is_empty() {
                segment.to_string()
            } else if is_dynamic(segment) {
                "{param}".to_string()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_dynamic(segment: &str) -> bool {
    let has_digit = segment.chars().any(|c| c.is_ascii_digit());
    let too_long_and_unknown = segment.len() > 10 && !STATIC_SEGMENTS.contains(&segment);
    has_digit || too_long_and_unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_device_ids_with_digits() {
        assert_eq!(normalize_route("/api/logs/device_001"), "/api/logs/{param}");
        assert_eq!(normalize_route("/api/logs/device_999"), "/api/logs/{param}");
    }

    #[test]
    fn collapses_long_alpha_segment() {
        // 11 chars, no digit, not in the static set.
        assert_eq!(normalize_route("/api/logs/ABCDEFGHIJK"), "/api/logs/{param}");
    }

    #[test]
    fn leaves_known_static_segments_alone() {
        assert_eq!(normalize_route("/api/stats"), "/api/stats");
        assert_eq!(normalize_route("/health"), "/health");
        assert_eq!(normalize_route("/metrics"), "/metrics");
    }

    #[test]
    fn route_cardinality_collapses_to_one_label() {
        let a = normalize_route("/api/logs/device_001");
        let b = normalize_route("/api/logs/device_999");
        let c = normalize_route("/api/logs/ABCDEFGHIJK");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn short_alpha_segment_is_not_collapsed() {
        assert_eq!(normalize_route("/api/logs/batch"), "/api/logs/batch");
    }
}
