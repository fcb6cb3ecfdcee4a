use chrono::NaiveDateTime;
use crate::model_types::Model3D;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const FALLBACK_NAME: &str = "model";

/// Reduce an object name to something safe inside a filename.
///
/// Keeps ASCII letters, digits, `_`, `-` and whitespace, then collapses each
/// whitespace run into a single `_`.
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-') || c.is_whitespace())
        .collect();

    let joined = kept.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        joined
    }
}

/// `<model id>_<safe name>_<YYYYmmdd_HHMMSS>`, shared by every file one export writes
pub fn artifact_stem(model: Model3D, name: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}",
        model.id(),
        sanitize_name(name),
        at.format(TIMESTAMP_FORMAT)
    )
}
