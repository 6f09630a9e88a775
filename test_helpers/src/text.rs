//! Text helpers for behavioural step parameters and generated output.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Normalizes a scalar placeholder by trimming and unquoting one outer layer.
#[must_use]
pub fn normalize_scalar(value: &str) -> String {
    unquote(value).trim().to_owned()
}

/// Splits a comma-separated step parameter such as `"Ready, MessageCreate"`.
///
/// Empty items are dropped, so `""` yields an empty list.
#[must_use]
pub fn split_names(value: &str) -> Vec<String> {
    unquote(value)
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builds an `events.rs` body declaring one public unit struct per name.
#[must_use]
pub fn declare_structs<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| {
            format!(
                "#[derive(Debug, Default)]\npub struct {};\n",
                name.as_ref()
            )
        })
        .collect()
}
