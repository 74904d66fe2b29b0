use std::sync::OnceLock;

use ahash::AHashMap;
use tracing::debug;

use super::code::{canonical_text, RegionCode};

/// Codes that one dataset spells differently from the polygon dataset.
/// Targets are the codes used by the polygon dataset (Eurostat GISCO spelling).
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("GR",  "EL"),  // Greece: ISO 3166 vs. Eurostat
    ("GB",  "UK"),  // United Kingdom: ISO 3166 vs. Eurostat
    ("KOS", "XK"),  // Kosovo: UNHCR vs. user-assigned ISO code
    ("XKX", "XK"),
    ("KV",  "XK"),
];

/// Maximum alias chain length followed while inserting an alias.
const MAX_CHAIN: usize = 8;

/// Canonicalizes region identifiers across datasets.
///
/// The alias table is kept flat: no alias target is itself an alias source,
/// so `normalize(normalize(x)) == normalize(x)` holds for every input.
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: AHashMap<String, String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        let mut normalizer = Self::empty();
        for &(from, to) in BUILTIN_ALIASES { normalizer.insert_alias(from, to) }
        normalizer
    }
}

impl Normalizer {
    /// A normalizer that only trims and uppercases.
    pub fn empty() -> Self {
        Self { aliases: AHashMap::new() }
    }

    /// Builtin aliases plus the given extra `(from, to)` pairs.
    pub fn with_aliases<'a>(extra: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut normalizer = Self::default();
        for (from, to) in extra { normalizer.insert_alias(from, to) }
        normalizer
    }

    /// Add an alias, keeping the table flat.
    pub fn insert_alias(&mut self, from: &str, to: &str) {
        let from = canonical_text(from);
        let mut target = canonical_text(to);
        for _ in 0..MAX_CHAIN {
            match self.aliases.get(&target) {
                Some(next) if *next != target => target = next.clone(),
                _ => break,
            }
        }

        if from.is_empty() || target.is_empty() || from == target {
            debug!("[normalizer] ignoring alias {from} -> {target}");
            return;
        }

        // Entries that pointed at `from` now point past it.
        for value in self.aliases.values_mut() {
            if *value == from { *value = target.clone() }
        }
        self.aliases.insert(from, target);
    }

    /// Number of aliases in the table.
    #[inline] pub fn alias_count(&self) -> usize { self.aliases.len() }

    /// Canonicalize a raw code: trim, uppercase, then resolve aliases.
    /// Unknown codes pass through unchanged.
    pub fn normalize(&self, raw: &str) -> RegionCode {
        let text = canonical_text(raw);
        match self.aliases.get(&text) {
            Some(target) => RegionCode::from_canonical(target),
            None => RegionCode::from_canonical(&text),
        }
    }
}

/// Normalize with the builtin alias table.
pub fn normalize(raw: &str) -> RegionCode {
    static BUILTIN: OnceLock<Normalizer> = OnceLock::new();
    BUILTIN.get_or_init(Normalizer::default).normalize(raw)
}
