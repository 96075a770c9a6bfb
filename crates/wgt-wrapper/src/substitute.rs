//! Literal placeholder substitution for wrapper templates

/// Replace every `{in.*}` placeholder listed in `values` in a single pass
///
/// Substituted values are copied verbatim and never scanned again, so a value
/// that itself contains a placeholder token is not expanded. Unknown
/// placeholders are left untouched.
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match values.iter().find(|(key, _)| candidate.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &candidate[key.len()..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
