//! Route metadata for the navigation layer
//!
//! Pure data: path patterns, the page each one shows, and whether the entry
//! is marked as requiring authentication. Enforcement is the navigation
//! layer's job, not this crate's.

/// Pages the application can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Dashboard,
    Register,
    Profile,
    Trainings,
    TrainingDetail,
    TrainingCreate,
    TrainingUpdate,
}

/// One entry in the static route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path pattern; `:name` segments match any single path segment
    pub path: &'static str,
    pub page: Page,
    /// Marked for the navigation layer's auth guard
    pub requires_auth: bool,
    /// Whether path parameters are passed to the page as props
    pub pass_params: bool,
}

const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: "/login",
        page: Page::Login,
        requires_auth: false,
        pass_params: false,
    },
    RouteEntry {
        path: "/",
        page: Page::Dashboard,
        requires_auth: true,
        pass_params: false,
    },
    RouteEntry {
        path: "/register",
        page: Page::Register,
        requires_auth: false,
        pass_params: false,
    },
    RouteEntry {
        path: "/profile",
        page: Page::Profile,
        requires_auth: false,
        pass_params: false,
    },
    RouteEntry {
        path: "/trainings",
        page: Page::Trainings,
        requires_auth: false,
        pass_params: false,
    },
    RouteEntry {
        path: "/trainings/create",
        page: Page::TrainingCreate,
        requires_auth: false,
        pass_params: false,
    },
    RouteEntry {
        path: "/trainings/:id",
        page: Page::TrainingDetail,
        requires_auth: false,
        pass_params: true,
    },
    RouteEntry {
        path: "/trainings/update/:id",
        page: Page::TrainingUpdate,
        requires_auth: false,
        pass_params: true,
    },
];

/// The full static route table, in declaration order
#[must_use]
pub fn route_table() -> &'static [RouteEntry] {
    ROUTES
}

/// Look up the entry matching a concrete path.
///
/// Exact matches win over `:param` patterns, so `/trainings/create` resolves
/// to the create page rather than the detail page.
#[must_use]
pub fn find(path: &str) -> Option<&'static RouteEntry> {
    if let Some(entry) = ROUTES.iter().find(|entry| entry.path == path) {
        return Some(entry);
    }
    ROUTES
        .iter()
        .filter(|entry| entry.path.contains(':'))
        .find(|entry| matches_pattern(entry.path, path))
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return false;
    }
    pattern_segments
        .iter()
        .zip(&path_segments)
        .all(|(pat, seg)| pat.starts_with(':') && !seg.is_empty() || pat == seg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_page_once() {
        let table = route_table();
        assert_eq!(table.len(), 8);
        for entry in table {
            assert_eq!(
                table.iter().filter(|e| e.page == entry.page).count(),
                1,
                "duplicate page {:?}",
                entry.page
            );
        }
    }

    #[test]
    fn only_dashboard_requires_auth() {
        let marked: Vec<_> = route_table()
            .iter()
            .filter(|entry| entry.requires_auth)
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].page, Page::Dashboard);
        assert_eq!(marked[0].path, "/");
    }

    #[test]
    fn exact_paths_resolve() {
        assert_eq!(find("/login").unwrap().page, Page::Login);
        assert_eq!(find("/").unwrap().page, Page::Dashboard);
        assert_eq!(find("/trainings").unwrap().page, Page::Trainings);
    }

    #[test]
    fn param_patterns_resolve() {
        assert_eq!(find("/trainings/42").unwrap().page, Page::TrainingDetail);
        assert_eq!(
            find("/trainings/update/42").unwrap().page,
            Page::TrainingUpdate
        );
    }

    #[test]
    fn literal_segments_win_over_params() {
        assert_eq!(find("/trainings/create").unwrap().page, Page::TrainingCreate);
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert!(find("/nope").is_none());
        assert!(find("/trainings/42/sets").is_none());
        assert!(find("/trainings/").is_none());
    }
}
