// ABOUTME: Placeholder substitution for command templates.
// ABOUTME: Applies bindings one after another so later keys see earlier replacements.

/// Substitute every binding into `template`, in order.
///
/// Each `(key, value)` pair replaces all literal occurrences of `key` in the
/// text produced by the previous pairs. A value that contains another key's
/// text is therefore itself substituted when that key comes later. Keys that
/// do not occur are no-ops and tokens without a binding pass through
/// unchanged. Empty keys are skipped.
pub fn resolve<K, V>(template: &str, bindings: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    bindings
        .iter()
        .filter(|(key, _)| !key.as_ref().is_empty())
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(key.as_ref(), value.as_ref())
        })
}

/// The two-element invocation handed to a process-spawning collaborator.
pub fn bash_invocation(command: impl Into<String>) -> [String; 2] {
    ["bash".to_string(), command.into()]
}
