//! Expansion of `` `$NAME` `` directives

use std::sync::LazyLock;

use regex::Regex;

use super::EnvResolver;
use crate::error::{DunnerError, Result};

static EMBEDDED_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`\$([^`]+)`").unwrap());

static WHOLE_VALUE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^`\$(.+)`$").unwrap());

/// Replace every embedded directive in `input` with its resolved value.
///
/// Text outside directives is kept as-is. The first directive that cannot be
/// resolved aborts the whole expansion.
pub fn interpolate(input: &str, resolver: &EnvResolver) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in EMBEDDED_DIRECTIVE.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let value = resolver
            .lookup(name)
            .ok_or_else(|| DunnerError::DirectiveNotFound(name.to_string()))?;

        out.push_str(&input[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&input[last..]);

    Ok(out)
}

/// Resolve a `NAME=VALUE` assignment.
///
/// Only a value that is exactly `` `$OTHER` `` is substituted; any other value
/// is returned untouched.
pub fn resolve_assignment(raw: &str, resolver: &EnvResolver) -> Result<String> {
    let (name, value) = split_assignment(raw)?;

    match WHOLE_VALUE_DIRECTIVE.captures(value) {
        Some(caps) => {
            let key = caps[1].replace('`', "");
            let resolved = resolver.require(&key)?;
            Ok(format!("{}={}", name, resolved))
        }
        None => Ok(raw.to_string()),
    }
}

/// Split an assignment on its single `=`
pub fn split_assignment(raw: &str) -> Result<(&str, &str)> {
    let mut parts = raw.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(value), None) => Ok((name, value)),
        _ => Err(DunnerError::InvalidAssignment(raw.to_string())),
    }
}
