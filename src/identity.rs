//! Identity resolution: licence normalization, club aliases, and the player directory.

use crate::models::DirectoryEntry;
use std::collections::HashMap;

/// Normalizes licences and club names coming from result sheets and registrations.
pub trait IdentityResolver {
    /// Canonical form of a licence, used as the grouping key everywhere.
    fn normalize_licence(&self, raw: &str) -> String;

    /// Display name for a club as written on a sheet.
    fn club_display_name(&self, raw: &str) -> String;
}

/// Licence normalization shared by all resolvers: drop whitespace, uppercase.
pub fn normalize_licence(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn alias_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Club alias table; unknown clubs keep their trimmed spelling.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an alias spelling (case and spacing ignored) to a canonical club name.
    pub fn add_alias(&mut self, alias: &str, canonical: impl Into<String>) {
        self.aliases.insert(alias_key(alias), canonical.into());
    }

    pub fn with_alias(mut self, alias: &str, canonical: impl Into<String>) -> Self {
        self.add_alias(alias, canonical);
        self
    }
}

impl IdentityResolver for AliasTable {
    fn normalize_licence(&self, raw: &str) -> String {
        normalize_licence(raw)
    }

    fn club_display_name(&self, raw: &str) -> String {
        self.aliases
            .get(&alias_key(raw))
            .cloned()
            .unwrap_or_else(|| raw.trim().to_string())
    }
}

/// Lookup of registered players by normalized licence.
pub trait PlayerDirectory {
    fn find(&self, licence: &str) -> Option<DirectoryEntry>;
}

impl PlayerDirectory for HashMap<String, DirectoryEntry> {
    fn find(&self, licence: &str) -> Option<DirectoryEntry> {
        self.get(licence).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn licence_ignores_spaces_and_case() {
        assert_eq!(normalize_licence(" 12 345 ab\t"), "12345AB");
        assert_eq!(normalize_licence("12345AB"), normalize_licence("12345 ab"));
    }

    #[test]
    fn club_alias_lookup_is_case_and_space_insensitive() {
        let table = AliasTable::new().with_alias("BC  Tours", "Billard Club de Tours");
        assert_eq!(table.club_display_name("bc tours"), "Billard Club de Tours");
        assert_eq!(table.club_display_name("  Other Club "), "Other Club");
    }
}
