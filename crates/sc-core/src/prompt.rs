use crate::request::GenerationRequest;

const ARTICLES: [&str; 3] = ["a ", "an ", "the "];
const FALLBACK_SUBJECT: &str = "object";

/// Build the text prompt handed to the pipeline.
///
/// A description wins over the name when it says something the name doesn't.
/// The result always starts with an article so the model reads it as a single
/// object rather than a category.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let name = request.name.trim();
    let subject = match request.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() && description != name => description,
        _ => name,
    };
    let subject = if subject.is_empty() { FALLBACK_SUBJECT } else { subject };

    with_article(subject)
}

fn with_article(subject: &str) -> String {
    let lowered = subject.to_lowercase();
    if ARTICLES.iter().any(|article| lowered.starts_with(article)) {
        return subject.to_string();
    }

    let article = match subject.chars().next() {
        Some(c) if matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{article} {subject}")
}
