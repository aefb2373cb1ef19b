//! External login redirect.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Characters escaped in a URI component: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the URL that takes the browsing context out of the application to
/// the login flow, with a return target pointing back into the dashboard.
///
/// The return target is `dashboard_prefix + path`, percent-encoded as a
/// single query component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRedirect {
    login_base: String,
    dashboard_prefix: String,
}

impl LoginRedirect {
    pub const DEFAULT_LOGIN_BASE: &'static str = "/auth/login";
    pub const DEFAULT_DASHBOARD_PREFIX: &'static str = "/vdc_dashboard/#";

    pub fn new(login_base: impl Into<String>, dashboard_prefix: impl Into<String>) -> Self {
        Self {
            login_base: login_base.into(),
            dashboard_prefix: dashboard_prefix.into(),
        }
    }

    pub fn login_base(&self) -> &str {
        &self.login_base
    }

    pub fn dashboard_prefix(&self) -> &str {
        &self.dashboard_prefix
    }

    /// Login URL returning to `path` after authentication.
    pub fn url_for(&self, path: &str) -> String {
        let next_url = format!("{}{}", self.dashboard_prefix, path);
        let separator = if self.login_base.contains('?') { '&' } else { '?' };
        format!(
            "{}{}next_url={}",
            self.login_base,
            separator,
            utf8_percent_encode(&next_url, COMPONENT)
        )
    }
}

impl Default for LoginRedirect {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOGIN_BASE, Self::DEFAULT_DASHBOARD_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_dashboard_return_path() {
        let login = LoginRedirect::default();
        assert_eq!(
            login.url_for("/solutions/cooking"),
            "/auth/login?next_url=%2Fvdc_dashboard%2F%23%2Fsolutions%2Fcooking"
        );
    }

    #[test]
    fn appends_to_existing_query() {
        let login = LoginRedirect::new("https://sso.example.com/login?provider=3bot", "/app/#");
        assert_eq!(
            login.url_for("/x"),
            "https://sso.example.com/login?provider=3bot&next_url=%2Fapp%2F%23%2Fx"
        );
    }

    #[test]
    fn reserved_characters_in_path_are_escaped() {
        let login = LoginRedirect::default();
        let url = login.url_for("/solutions/a b&c");
        assert!(url.ends_with("%2Fsolutions%2Fa%20b%26c"), "{url}");
    }

    #[test]
    fn component_safe_marks_are_left_as_is() {
        let login = LoginRedirect::default();
        assert_eq!(
            login.url_for("/solutions/it's(x)!*~"),
            "/auth/login?next_url=%2Fvdc_dashboard%2F%23%2Fsolutions%2Fit's(x)!*~"
        );
        assert!(login.url_for("/solutions/caf\u{e9}").ends_with("%2Fcaf%C3%A9"));
    }
}
