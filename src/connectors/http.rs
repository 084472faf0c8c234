use std::time::Duration;

/// The client shared by health checks and redeploy requests.
///
/// Redirects are not followed: a `3xx` from a project or from a deploy
/// endpoint is reported with its own status code. Each request sets its own
/// timeout.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("render-manager/", env!("CARGO_PKG_VERSION")))
        .build()
}
