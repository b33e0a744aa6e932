//! Key case normalization
//!
//! UI element ids are kebab-cased (`build-volume`) while settings keys are
//! camel-cased (`buildVolume`). Paths are normalized segment by segment
//! before they reach the [`PathStore`](crate::PathStore).

/// Split an identifier into words on separators and lower-to-upper boundaries
fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for c in input.chars() {
        if matches!(c, '-' | '_' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let boundary = c.is_uppercase()
            && current
                .chars()
                .last()
                .is_some_and(|prev| prev.is_lowercase() || prev.is_ascii_digit());
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert one identifier to camelCase (`build-volume` -> `buildVolume`)
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert one identifier to kebab-case (`buildVolume` -> `build-volume`)
pub fn kebab_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Camel-case every dot segment of a settings path
pub fn normalize_path(path: &str) -> String {
    path.split('.')
        .map(camel_case)
        .collect::<Vec<_>>()
        .join(".")
}
