use super::*;

fn portal() -> PageConfig {
    PageConfig::new("Portal", "https://portal.example.com/")
        .with_success("Welcome back")
        .with_maintenance("scheduled maintenance")
}

fn markers() -> Markers {
    Markers::compile(&portal()).unwrap()
}

fn here() -> Url {
    Url::parse("https://sso.example.com/idp/profile/SAML2/Redirect").unwrap()
}

#[test]
fn test_success_marker() {
    let step = decide(&markers(), 200, &here(), "<h1>WELCOME BACK, guest</h1>").unwrap();
    assert_eq!(
        step,
        Step::Done(PageStatus::Up, "matched 'Welcome back'".to_string())
    );
}

#[test]
fn test_maintenance_beats_error_status() {
    let body = "<p>The portal is down for scheduled maintenance.</p>";
    let step = decide(&markers(), 503, &here(), body).unwrap();
    assert!(matches!(step, Step::Done(PageStatus::Maintenance, _)));
}

#[test]
fn test_maintenance_beats_success() {
    let body = "Welcome back! Scheduled maintenance tonight.";
    let step = decide(&markers(), 200, &here(), body).unwrap();
    assert!(matches!(step, Step::Done(PageStatus::Maintenance, _)));
}

#[test]
fn test_error_status_is_down() {
    let step = decide(&markers(), 502, &here(), "Bad gateway").unwrap();
    assert_eq!(step, Step::Done(PageStatus::Down, "HTTP 502".to_string()));
}

#[test]
fn test_error_status_with_success_text_is_down() {
    let step = decide(&markers(), 500, &here(), "Welcome back").unwrap();
    assert!(matches!(step, Step::Done(PageStatus::Down, _)));
}

#[test]
fn test_no_success_markers_means_up() {
    let markers = Markers::compile(&PageConfig::new("Bare", "https://bare.example.com/")).unwrap();
    let body = r#"<meta http-equiv="refresh" content="0; url=/elsewhere">"#;
    let step = decide(&markers, 204, &here(), body).unwrap();
    assert_eq!(step, Step::Done(PageStatus::Up, "HTTP 204".to_string()));
}

#[test]
fn test_follow_relative_refresh() {
    let body = r#"<meta http-equiv="refresh" content="0; url=../login?next=%2F">"#;
    let step = decide(&markers(), 200, &here(), body).unwrap();
    assert_eq!(
        step,
        Step::Follow(Url::parse("https://sso.example.com/idp/profile/login?next=%2F").unwrap())
    );
}

#[test]
fn test_refresh_before_form() {
    let body = r#"
        <meta http-equiv="refresh" content="0; url=https://portal.example.com/">
        <form><input type="hidden" name="a" value="1"></form>
    "#;
    let step = decide(&markers(), 200, &here(), body).unwrap();
    assert!(matches!(step, Step::Follow(_)));
}

#[test]
fn test_submit_hidden_form() {
    let body = r#"
        <form method="post" action="/Shibboleth.sso/SAML2/POST">
          <input type="hidden" name="RelayState" value="cookie:1a2b"/>
          <input type="hidden" name="SAMLResponse" value="PHNhbWw+"/>
          <input type="submit" value="Continue"/>
          <input type="submit" name="proceed"/>
        </form>
    "#;
    let step = decide(&markers(), 200, &here(), body).unwrap();
    let Step::Submit(form) = step else {
        panic!("expected a form submission, got {:?}", step);
    };
    assert_eq!(form.method, FormMethod::Post);
    assert_eq!(form.action.as_str(), "https://sso.example.com/Shibboleth.sso/SAML2/POST");
    assert_eq!(
        form.fields,
        vec![
            ("RelayState".to_string(), "cookie:1a2b".to_string()),
            ("SAMLResponse".to_string(), "PHNhbWw+".to_string()),
        ]
    );
    assert_eq!(
        form.encoded_fields(),
        "RelayState=cookie%3A1a2b&SAMLResponse=PHNhbWw%2B"
    );
}

#[test]
fn test_submit_without_action_targets_current_url() {
    let body = r#"<input type="hidden" name="token" value="x">"#;
    let Step::Submit(form) = decide(&markers(), 200, &here(), body).unwrap() else {
        panic!("expected a form submission");
    };
    assert_eq!(form.action, here());
    assert_eq!(form.method, FormMethod::Post);
}

#[test]
fn test_get_form_query_url() {
    let body = r#"<form method="GET" action="/continue?old=1"><input type="hidden" name="t" value="a b"></form>"#;
    let Step::Submit(form) = decide(&markers(), 200, &here(), body).unwrap() else {
        panic!("expected a form submission");
    };
    assert_eq!(form.method, FormMethod::Get);
    assert_eq!(form.query_url().as_str(), "https://sso.example.com/continue?t=a+b");
}

#[test]
fn test_get_form_without_fields_drops_query() {
    let body = r#"<form method="get" action="/go?stale=1"><input type="submit" name="go"></form>"#;
    let Step::Submit(form) = decide(&markers(), 200, &here(), body).unwrap() else {
        panic!("expected a form submission");
    };
    assert!(form.fields.is_empty());
    assert_eq!(form.query_url().as_str(), "https://sso.example.com/go");
}

#[test]
fn test_login_form_is_not_submitted() {
    let body = r#"
        <form action="/login" method="post">
          <input type="hidden" name="csrf" value="abc">
          <input type="text" name="username">
          <input type="password" name="password">
        </form>
    "#;
    let step = decide(&markers(), 200, &here(), body).unwrap();
    assert_eq!(
        step,
        Step::Done(PageStatus::Down, "no success marker found".to_string())
    );
}

#[test]
fn test_plain_page_without_marker_is_down() {
    let step = decide(&markers(), 200, &here(), "<html>Something else</html>").unwrap();
    assert!(matches!(step, Step::Done(PageStatus::Down, _)));
}

#[test]
fn test_invalid_marker_pattern() {
    let page = portal().with_success("(unclosed");
    let err = Markers::compile(&page).unwrap_err();
    assert!(matches!(err, ProbeError::InvalidPattern(_)));
}
