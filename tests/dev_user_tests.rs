//! `--dev-user` parsing.

use hxpage::dev::parse_dev_user;

#[test]
fn plain_name_is_regular_user() {
    let user = parse_dev_user("ada").unwrap();
    assert_eq!(user.name, "ada");
    assert_eq!(user.email, "ada@localhost");
    assert!(!user.admin);
}

#[test]
fn admin_role_grants_admin() {
    assert!(parse_dev_user("root:admin").unwrap().admin);
    assert!(parse_dev_user("root:ADMIN").unwrap().admin);
}

#[test]
fn user_role_is_regular_user() {
    let user = parse_dev_user("bo:user").unwrap();
    assert_eq!(user.name, "bo");
    assert!(!user.admin);
}

#[test]
fn unknown_role_is_rejected() {
    let err = parse_dev_user("ada:amdin").unwrap_err();
    assert!(err.to_string().contains("unknown dev user role 'amdin'"));
}

#[test]
fn empty_name_is_rejected() {
    assert!(parse_dev_user("").is_err());
    assert!(parse_dev_user(":admin").is_err());
}
