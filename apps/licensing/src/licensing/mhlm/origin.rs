//! Where the embedded MathWorks login lives.

/// Origin of the login page for a deployment environment.
///
/// Integration environments get their own subdomain: `wsEnv = "mw-integ"` maps
/// to `https://login-mw-integ.mathworks.com`.
pub fn login_origin(ws_env: &str) -> String {
    if ws_env.contains("integ") {
        format!("https://login-{ws_env}.mathworks.com")
    } else {
        "https://login.mathworks.com".to_string()
    }
}

/// URL to load in the login iframe.
pub fn embedded_login_url(login_origin: &str) -> String {
    format!("{login_origin}/embedded-login/v2/login.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_origin() {
        assert_eq!(login_origin(""), "https://login.mathworks.com");
        assert_eq!(login_origin("production"), "https://login.mathworks.com");
    }

    #[test]
    fn test_integ_origin_has_subdomain_suffix() {
        assert_eq!(login_origin("mw-integ"), "https://login-mw-integ.mathworks.com");
        assert_eq!(login_origin("integ3"), "https://login-integ3.mathworks.com");
    }

    #[test]
    fn test_embedded_login_url() {
        assert_eq!(
            embedded_login_url(&login_origin("mw-integ")),
            "https://login-mw-integ.mathworks.com/embedded-login/v2/login.html"
        );
    }
}
