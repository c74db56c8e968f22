//! Route templates for span names and metric labels.
//!
//! Product ids, order uuids and review uuids are replaced with placeholders
//! so each route yields one span name and one metric series.

/// Collapse a request path to the route it was served by.
pub(super) fn route_template(path: &str) -> String {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());

    let Some(root) = segments.next() else {
        return "/".to_owned();
    };

    match root {
        "docs" | "api-doc" => return format!("/{root}"),
        "products" | "cart" | "orders" | "admin" => {}
        _ => return "unmatched".to_owned(),
    }

    let mut template = format!("/{root}");
    let mut previous = root;

    for segment in segments {
        let placeholder = match previous {
            "products" | "items" => "{product}",
            "orders" => "{order}",
            "reviews" => "{review}",
            _ => segment,
        };

        template.push('/');
        template.push_str(placeholder);
        previous = segment;
    }

    template
}

pub(super) fn span_name(method: &str, route: &str) -> String {
    format!("{method} {route}")
}
