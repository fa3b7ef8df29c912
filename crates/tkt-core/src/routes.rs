//! Client-side route table.
//!
//! A static, ordered list of path patterns maps navigation paths to pages.
//! Resolution is first-match: `/tickets/create` is listed before
//! `/tickets/:key` so the literal wins. `:name` segments capture the
//! corresponding path segment as a parameter. Anything that matches no
//! pattern resolves to the not-found page, and `/404` is a static alias
//! for it.

use std::collections::BTreeMap;

/// The pages the client can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    Search,
    ProjectList,
    ProjectShow,
    TicketCreate,
    TicketShow,
    UserProfile,
    Login,
    Register,
    Dashboard,
    NotFound,
}

/// One entry in the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
}

/// The route table, in match order.
pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        path: "/queries",
        name: "tickets/search",
        page: Page::Search,
    },
    RouteDef {
        path: "/projects",
        name: "projects/list",
        page: Page::ProjectList,
    },
    RouteDef {
        path: "/tickets/create",
        name: "tickets/create",
        page: Page::TicketCreate,
    },
    RouteDef {
        path: "/tickets/:key",
        name: "tickets/show",
        page: Page::TicketShow,
    },
    RouteDef {
        path: "/projects/:key",
        name: "projects/show",
        page: Page::ProjectShow,
    },
    RouteDef {
        path: "/login",
        name: "users/login",
        page: Page::Login,
    },
    RouteDef {
        path: "/register",
        name: "users/register",
        page: Page::Register,
    },
    RouteDef {
        path: "/users/:username",
        name: "users/profile",
        page: Page::UserProfile,
    },
    RouteDef {
        path: "/dashboard",
        name: "dashboard",
        page: Page::Dashboard,
    },
    RouteDef {
        path: "/",
        name: "index",
        page: Page::Index,
    },
    RouteDef {
        path: "/404",
        name: "not-found",
        page: Page::NotFound,
    },
];

/// A resolved route: the page plus any captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub page: Page,
    pub name: &'static str,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Convenience accessor for a captured parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn not_found() -> Self {
        Self {
            page: Page::NotFound,
            name: "not-found",
            params: BTreeMap::new(),
        }
    }
}

/// Resolves a path to a page, falling back to the not-found page.
///
/// A query string is ignored for matching; trailing slashes are
/// insignificant except on the root path.
pub fn resolve(path: &str) -> RouteMatch {
    let path = path.split('?').next().unwrap_or(path);
    let normalized = normalize(path);

    for route in ROUTES {
        if let Some(params) = match_pattern(route.path, &normalized) {
            return RouteMatch {
                page: route.page,
                name: route.name,
                params,
            };
        }
    }

    RouteMatch::not_found()
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Matches a pattern against a path, capturing `:name` segments.
fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let pattern_segs: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_segs.len() != path_segs.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (pat, seg) in pattern_segs.iter().zip(&path_segs) {
        if let Some(name) = pat.strip_prefix(':') {
            params.insert(name.to_string(), (*seg).to_string());
        } else if pat != seg {
            return None;
        }
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes() {
        assert_eq!(resolve("/").page, Page::Index);
        assert_eq!(resolve("/queries").page, Page::Search);
        assert_eq!(resolve("/projects").page, Page::ProjectList);
        assert_eq!(resolve("/login").page, Page::Login);
        assert_eq!(resolve("/register").page, Page::Register);
        assert_eq!(resolve("/dashboard").page, Page::Dashboard);
    }

    #[test]
    fn test_create_wins_over_key_param() {
        let m = resolve("/tickets/create");
        assert_eq!(m.page, Page::TicketCreate);
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_param_capture() {
        let m = resolve("/tickets/TEST-1");
        assert_eq!(m.page, Page::TicketShow);
        assert_eq!(m.param("key"), Some("TEST-1"));

        let m = resolve("/projects/TEST");
        assert_eq!(m.page, Page::ProjectShow);
        assert_eq!(m.param("key"), Some("TEST"));

        let m = resolve("/users/foouser");
        assert_eq!(m.page, Page::UserProfile);
        assert_eq!(m.param("username"), Some("foouser"));
    }

    #[test]
    fn test_wildcard_falls_back_to_not_found() {
        assert_eq!(resolve("/no/such/page").page, Page::NotFound);
        assert_eq!(resolve("/tickets").page, Page::NotFound);
        assert_eq!(resolve("/tickets/TEST-1/extra").page, Page::NotFound);
    }

    #[test]
    fn test_404_alias() {
        let m = resolve("/404");
        assert_eq!(m.page, Page::NotFound);
        assert_eq!(m.name, "not-found");
    }

    #[test]
    fn test_normalization() {
        assert_eq!(resolve("/projects/").page, Page::ProjectList);
        assert_eq!(resolve("projects").page, Page::ProjectList);
        assert_eq!(resolve("/queries?q=status%3DOpen").page, Page::Search);
        assert_eq!(resolve("").page, Page::Index);
    }
}
