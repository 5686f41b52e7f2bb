//! Route table and navigation guard.
//!
//! Maps view paths to their descriptors and decides, per navigation, whether
//! the current session may enter a view or must be sent to the login view
//! first. The decision reads the session every time; nothing is cached.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path pattern; `:name` segments capture a parameter.
    pub path: &'static str,
    pub name: &'static str,
    /// View identifier, resolved lazily by whoever renders it.
    pub view: &'static str,
    pub title: &'static str,
    pub requires_auth: bool,
}

const fn route(
    path: &'static str,
    name: &'static str,
    view: &'static str,
    title: &'static str,
    requires_auth: bool,
) -> RouteDescriptor {
    RouteDescriptor {
        path,
        name,
        view,
        title,
        requires_auth,
    }
}

pub const ROUTES: &[RouteDescriptor] = &[
    route(
        "/",
        "home",
        "HomeView",
        "Home - Health Checkup Recommendation",
        true,
    ),
    route("/test", "test", "TestView", "Test Page", true),
    route(
        "/login",
        "login",
        "LoginView",
        "Sign in / Register - Health Checkup Recommendation",
        false,
    ),
    route(
        "/profile",
        "profile",
        "PersonalCenterView",
        "Personal Center - Health Checkup Recommendation",
        true,
    ),
    route(
        "/chat",
        "chat",
        "SmartInteractionView",
        "Smart Interaction - Health Checkup Recommendation",
        true,
    ),
    route(
        "/smart-interaction",
        "smartInteraction",
        "SmartInteractionView",
        "Smart Interaction - Health Checkup Recommendation",
        true,
    ),
    route(
        "/recommendations",
        "recommendations",
        "RecommendationResultView",
        "Recommendations - Health Checkup Recommendation",
        true,
    ),
    route(
        "/appointments",
        "appointments",
        "AppointmentManagementView",
        "Appointments - Health Checkup Recommendation",
        true,
    ),
    route(
        "/reports",
        "reports",
        "ReportManagementView",
        "Reports - Health Checkup Recommendation",
        true,
    ),
    route(
        "/report/:id/interpretation",
        "reportInterpretation",
        "ReportInterpretationView",
        "Report Interpretation - Health Checkup Recommendation",
        true,
    ),
    route(
        "/settings",
        "settings",
        "SystemSettingsView",
        "Settings - Health Checkup Recommendation",
        true,
    ),
    route(
        "/questionnaire",
        "questionnaire",
        "QuestionnaireView",
        "Portrait Questionnaire - Health Checkup Recommendation",
        true,
    ),
    route(
        "/portrait-result",
        "portraitResult",
        "PortraitResultView",
        "Portrait Result - Health Checkup Recommendation",
        true,
    ),
    route(
        "/user-profile",
        "userProfile",
        "UserProfileView",
        "User Portrait - Health Checkup Recommendation",
        true,
    ),
];

/// A route matched against a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: RouteDescriptor,
    pub params: BTreeMap<String, String>,
}

/// Outcome of a single navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allowed {
        route: RouteDescriptor,
        params: BTreeMap<String, String>,
        full_path: String,
    },
    /// Sent to the login view; `to` carries the requested path in its
    /// `redirect` query parameter.
    Redirected { to: String, from: String },
    Unmatched { full_path: String },
}

impl Navigation {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Allowed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<RouteDescriptor>,
}

impl Router {
    pub fn new() -> Self {
        Self::with_routes(ROUTES.to_vec())
    }

    pub fn with_routes(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Finds the first route whose pattern matches the path part of
    /// `full_path`. Query and fragment are ignored.
    pub fn resolve(&self, full_path: &str) -> Option<RouteMatch> {
        let path = split_path(full_path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        self.routes.iter().find_map(|route| {
            match_pattern(route.path, &segments).map(|params| RouteMatch {
                route: *route,
                params,
            })
        })
    }

    /// Runs the guard against the current state of `session`.
    pub async fn navigate(&self, full_path: &str, session: &Session) -> Navigation {
        let authenticated = session.is_authenticated().await;
        self.check(full_path, authenticated)
    }

    /// The guard itself: protected routes need a credential.
    pub fn check(&self, full_path: &str, authenticated: bool) -> Navigation {
        let Some(found) = self.resolve(full_path) else {
            return Navigation::Unmatched {
                full_path: full_path.to_string(),
            };
        };

        if found.route.requires_auth && !authenticated {
            tracing::debug!(path = full_path, "guard redirecting to login");
            return Navigation::Redirected {
                to: login_redirect(full_path),
                from: full_path.to_string(),
            };
        }

        Navigation::Allowed {
            route: found.route,
            params: found.params,
            full_path: full_path.to_string(),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// `/login?redirect=<full_path>`
pub fn login_redirect(full_path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_PARAM, full_path)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Where the login view should forward to once signed in: the `redirect`
/// query parameter of `login_path`, or home when absent.
pub fn post_login_destination(login_path: &str) -> String {
    let query = login_path
        .split_once('?')
        .map(|(_, q)| q.split('#').next().unwrap_or(q))
        .unwrap_or("");

    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == REDIRECT_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| is_local_path(v))
        .unwrap_or_else(|| HOME_PATH.to_string())
}

/// `/x` but not `//host` or `/\host`, which browsers read as another origin.
fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/') | Some('\\'))
}

fn split_path(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    &full_path[..end]
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let expected: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if expected.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (want, got) in expected.iter().zip(segments) {
        match want.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), (*got).to_string());
            }
            None if want == got => {}
            None => return None,
        }
    }
    Some(params)
}
