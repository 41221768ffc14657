//! Low-cardinality route labels for spans and metrics.

use uuid::Uuid;

/// Replace identifier segments with `{id}` so `/api/order/delete/<uuid>` is
/// reported as one route.
pub(super) fn normalise(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_collapsed() {
        assert_eq!(
            normalise("/api/order/delete/0190c1a2-7b3e-7cc0-8a55-3f1b2c4d5e6f"),
            "/api/order/delete/{id}"
        );
    }

    #[test]
    fn plain_paths_are_kept() {
        assert_eq!(normalise("/api/cart/get-cart"), "/api/cart/get-cart");
        assert_eq!(normalise("/"), "/");
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        assert_eq!(normalise("/api/products/"), "/api/products");
    }
}
