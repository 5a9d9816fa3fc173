//! Navigation policy
//!
//! Following a link may only ever reach a local file. Anything with a
//! non-file URL scheme is refused.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allowed(PathBuf),
    Denied(String),
}

pub fn check_navigation(target: &str) -> Navigation {
    let target = target.trim();
    if target.is_empty() || target.starts_with('#') {
        return Navigation::Denied(format!("Not a file link: {}", target));
    }

    if let Some(rest) = target.strip_prefix("file://") {
        let path = rest.strip_prefix("localhost").unwrap_or(rest);
        if path.is_empty() {
            return Navigation::Denied(format!("Not a file link: {}", target));
        }
        return Navigation::Allowed(PathBuf::from(path));
    }

    match url_scheme(target) {
        Some(scheme) => Navigation::Denied(format!("Blocked {} link", scheme)),
        None => Navigation::Allowed(PathBuf::from(target)),
    }
}

/// URL scheme of `target`, if it has one. Single letters are drive names.
fn url_scheme(target: &str) -> Option<&str> {
    let (scheme, _) = target.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = scheme.len() > 1
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}
