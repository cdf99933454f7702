// Cache key construction
//
// Keys fold in the provider and model so identical questions asked of
// different backends never collide, and normalize the text so casing and
// surrounding whitespace do not defeat a hit.

/// Normalize request text before it becomes part of a cache key.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Key for the fire-and-forget selection path.
pub fn selection_key(text: &str, provider_id: &str, model: &str) -> String {
    format!("{}-{}-{}", normalize(text), provider_id, model)
}

/// Key for the direct request/response path. Distinct prefix from the
/// selection path, but both live in the same cache instance.
pub fn question_key(prompt: &str, provider_id: &str, model: &str) -> String {
    format!("question_{}_{}_{}", normalize(prompt), provider_id, model)
}
