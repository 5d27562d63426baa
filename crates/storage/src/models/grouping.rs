/// Builds the equality key used to group result rows that refer to the same
/// competitor or academy despite inconsistent spelling on the source pages,
/// e.g. "John Smith" and " john   smith ".
///
/// The key is only used for grouping; displayed names keep the casing of the
/// first row encountered in each group.
pub fn normalized_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
