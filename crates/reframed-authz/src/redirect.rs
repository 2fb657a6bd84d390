use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Characters left intact by a URI component encoder.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Outcome of a route guard. The guard never navigates itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    Allow,
    Redirect(String),
}

impl RedirectDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RedirectDecision::Allow)
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            RedirectDecision::Allow => None,
            RedirectDecision::Redirect(location) => Some(location),
        }
    }
}

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `<login_path>?redirect=<encoded current path>`
pub fn login_redirect(login_path: &str, current_path: &str) -> String {
    format!(
        "{login_path}?redirect={}",
        encode_uri_component(current_path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(
            encode_uri_component("/reports/2024?tab=a&b=c d"),
            "%2Freports%2F2024%3Ftab%3Da%26b%3Dc%20d"
        );
    }

    #[test]
    fn keeps_unreserved_marks() {
        assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn encodes_utf8_bytes() {
        assert_eq!(encode_uri_component("/café"), "%2Fcaf%C3%A9");
    }

    #[test]
    fn builds_login_redirect() {
        assert_eq!(
            login_redirect("/login", "/admin/users"),
            "/login?redirect=%2Fadmin%2Fusers"
        );
    }

    #[test]
    fn decision_accessors() {
        assert!(RedirectDecision::Allow.is_allowed());
        assert_eq!(RedirectDecision::Allow.location(), None);
        let redirect = RedirectDecision::Redirect("/login?redirect=%2F".to_string());
        assert!(!redirect.is_allowed());
        assert_eq!(redirect.location(), Some("/login?redirect=%2F"));
    }
}
