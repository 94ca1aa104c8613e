//! Placeholder substitution for rule message templates.
//!
//! Templates are plain strings with `{chave}` placeholders. Rendering
//! never fails: a placeholder with no matching variable stays in the
//! output verbatim, braces included, which keeps a typo in a
//! user-configured template visible instead of silently vanishing.

/// Render `template`, substituting `{key}` placeholders from `vars`.
///
/// Single pass, left to right. Substituted values are inserted
/// literally and never re-scanned, so a value containing braces cannot
/// inject further substitutions.
///
/// # Examples
/// ```
/// use tj_alerts::template::render;
///
/// let out = render(
///     "Critério \"{nome}\" vence em {diasRestantes} dias",
///     &[("nome", "Coleta Seletiva".into()), ("diasRestantes", "5".into())],
/// );
/// assert_eq!(out, "Critério \"Coleta Seletiva\" vence em 5 dias");
/// ```
pub fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                // unclosed brace: the remainder is literal text
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
