//! Local preview helpers.

use hxpage_core::AuthUser;

/// Parse a `--dev-user` value: `name`, `name:user` or `name:admin`.
pub fn parse_dev_user(spec: &str) -> anyhow::Result<AuthUser> {
    let (name, admin) = match spec.split_once(':') {
        Some((name, role)) if role.eq_ignore_ascii_case("admin") => (name, true),
        Some((name, role)) if role.eq_ignore_ascii_case("user") => (name, false),
        Some((_, role)) => anyhow::bail!("unknown dev user role '{role}' (expected 'admin' or 'user')"),
        None => (spec, false),
    };
    if name.is_empty() {
        anyhow::bail!("dev user name must not be empty");
    }
    Ok(AuthUser::new(0, name, format!("{name}@localhost")).with_admin(admin))
}
