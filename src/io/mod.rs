pub mod local;
pub mod remote;

/// Embedded metadata entries tried, in order, when none are configured.
pub const DEFAULT_METADATA_ENTRIES: &[&str] =
    &["META-INF/mods.toml", "META-INF/neoforge.mods.toml"];

pub fn default_metadata_entries() -> Vec<String> {
    DEFAULT_METADATA_ENTRIES
        .iter()
        .map(|entry| entry.to_string())
        .collect()
}
