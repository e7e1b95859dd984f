//! Version-gated command checks.
//!
//! Identifiers such as `"cmake >= 3.10"` describe a command that must
//! exist and report at least a given version. The command is run with
//! version arguments and the first dotted number in its output is taken as
//! the installed version.

use regex::Regex;
use std::cmp::Ordering;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use super::host::Host;
use super::status::CheckOutcome;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)+|\d+").unwrap());

/// First version-looking number in `text`.
pub fn extract_version(text: &str) -> Option<String> {
    VERSION_RE.find(text).map(|m| m.as_str().to_string())
}

/// Compare dotted versions numerically; missing components count as zero.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.trim().parse().unwrap_or(0))
            .collect()
    };
    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Check that `command` exists and reports a version of at least `minimum`.
pub fn check_command_version(
    host: &dyn Host,
    command: &str,
    args: &[String],
    minimum: &str,
) -> CheckOutcome {
    let Some(path) = host.find_command(command) else {
        return CheckOutcome::unavailable();
    };

    let output = match Command::new(&path)
        .args(args)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            return CheckOutcome::unknown(format!(
                "Cannot check: failed to run '{}': {}",
                path.display(),
                e
            ))
        }
    };

    let text = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let Some(found) = extract_version(&text) else {
        return CheckOutcome::unknown(format!(
            "Cannot check: could not determine the version of '{}'.",
            command
        ));
    };

    tracing::debug!("{} reports version {} (need >= {})", command, found, minimum);

    if compare_versions(&found, minimum) == Ordering::Less {
        CheckOutcome::unavailable_with(format!("only found older version {}", found))
    } else {
        CheckOutcome::available_with(found)
    }
}
