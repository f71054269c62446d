//! Authentication gate in front of protected screens.

use tracing::debug;

use crate::domain::Route;

/// Resolves the screen actually shown for a navigation request.
///
/// Protected routes requested without a session resolve to [`Route::Login`],
/// so the requested screen is never built.
#[must_use]
pub fn guard(requested: Route, authenticated: bool) -> Route {
    if requested.requires_auth() && !authenticated {
        debug!(route = %requested, "Redirecting unauthenticated navigation to login");
        Route::Login
    } else {
        requested
    }
}
