//! Static route table with per-route protection tags.
//!
//! DESIGN
//! ======
//! The table is configuration, not runtime data: each descriptor tags
//! a path segment with `requires_auth`, and children inherit a
//! parent's requirement. The guard looks up concrete pathnames here
//! instead of threading route metadata through the view tree.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// The unauthenticated landing route.
pub const PUBLIC_ENTRY_PATH: &str = "/auth";

/// Destination after successful authentication.
pub const PROTECTED_DEFAULT_PATH: &str = "/dashboard";

/// One entry in the static route table.
pub struct RouteDescriptor {
    /// Path segment relative to the parent (empty for index routes).
    pub path: &'static str,
    /// Whether this route itself demands authentication. Children
    /// inherit a parent's requirement regardless of their own tag.
    pub requires_auth: bool,
    /// Nested child routes.
    pub children: &'static [RouteDescriptor],
}

/// The application's route table, mirroring the router setup in
/// `app.rs`. `/` only redirects to the public entry.
pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor { path: "", requires_auth: false, children: &[] },
    RouteDescriptor { path: "auth", requires_auth: false, children: &[] },
    RouteDescriptor {
        path: "dashboard",
        requires_auth: true,
        children: &[
            RouteDescriptor { path: "", requires_auth: false, children: &[] },
            RouteDescriptor { path: "records", requires_auth: false, children: &[] },
            RouteDescriptor { path: "settings", requires_auth: false, children: &[] },
        ],
    },
];

/// Lookup result for one concrete pathname.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    /// Normalized pathname (leading slash, no trailing slash, no query
    /// or fragment).
    pub path: String,
    /// Effective protection requirement after parent inheritance.
    pub requires_auth: bool,
}

impl RouteTarget {
    /// True when the target is the unauthenticated landing route.
    #[must_use]
    pub fn is_public_entry(&self) -> bool {
        self.path == PUBLIC_ENTRY_PATH
    }
}

/// Resolve a browser pathname against the route table. Unknown paths
/// carry no requirement; the router's not-found fallback renders them.
#[must_use]
pub fn access_for(path: &str) -> RouteTarget {
    let bare = path.split(['?', '#']).next().unwrap_or(path);
    let segments: Vec<&str> = bare.split('/').filter(|s| !s.is_empty()).collect();
    let normalized = if segments.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}", segments.join("/"))
    };
    let requires_auth = match_route(ROUTES, &segments, false).unwrap_or(false);
    RouteTarget { path: normalized, requires_auth }
}

fn match_route(routes: &[RouteDescriptor], segments: &[&str], inherited: bool) -> Option<bool> {
    for route in routes {
        let effective = inherited || route.requires_auth;
        if route.path.is_empty() {
            if segments.is_empty() {
                return Some(effective);
            }
            continue;
        }
        if segments.first() == Some(&route.path) {
            let rest = &segments[1..];
            if route.children.is_empty() {
                if rest.is_empty() {
                    return Some(effective);
                }
                continue;
            }
            if let Some(found) = match_route(route.children, rest, effective) {
                return Some(found);
            }
        }
    }
    None
}
