use crate::domain::model::Manufacturer;

/// One line of the detection table. A rule matches when the upper-cased model
/// starts with any of `prefixes` and is longer than `min_len_exclusive`
/// characters.
#[derive(Debug, Clone, Copy)]
pub struct PrefixRule {
    pub prefixes: &'static [&'static str],
    pub min_len_exclusive: usize,
    pub manufacturer: Manufacturer,
}

impl PrefixRule {
    const fn new(prefixes: &'static [&'static str], manufacturer: Manufacturer) -> Self {
        Self {
            prefixes,
            min_len_exclusive: 0,
            manufacturer,
        }
    }

    pub fn matches(&self, normalized_model: &str) -> bool {
        self.prefixes.iter().any(|p| normalized_model.starts_with(p))
            && normalized_model.chars().count() > self.min_len_exclusive
    }
}

// Evaluated top to bottom; overlapping leading letters (G, S, Z, C, W, T) are
// settled by position alone.
pub const RULES: &[PrefixRule] = &[
    PrefixRule::new(
        &["J", "JB", "JG", "JS", "G", "Z", "P", "D", "C"],
        Manufacturer::Ge,
    ),
    PrefixRule::new(&["W", "Y", "R"], Manufacturer::Whirlpool),
    PrefixRule::new(&["F", "E", "P"], Manufacturer::Frigidaire),
    PrefixRule::new(&["L", "WM", "DLE"], Manufacturer::Lg),
    PrefixRule::new(&["S", "WA", "RF"], Manufacturer::Samsung),
    PrefixRule::new(&["M", "MDB", "MHW"], Manufacturer::Maytag),
    PrefixRule::new(
        &["SH", "WAT", "WT", "T", "G", "HB", "SN", "WM", "HS"],
        Manufacturer::BoschGroup,
    ),
    PrefixRule {
        prefixes: &["W", "G", "KM", "H", "T", "D", "F", "S"],
        min_len_exclusive: 2,
        manufacturer: Manufacturer::Miele,
    },
    PrefixRule::new(&["S", "Z", "C"], Manufacturer::WolfSubZeroCove),
];

/// Maps a model number to its manufacturer. Total: anything that matches no
/// rule, including the empty string, is `Unknown`.
pub fn detect_manufacturer(model: &str) -> Manufacturer {
    detect_with_rules(RULES, model)
}

pub fn detect_with_rules(rules: &[PrefixRule], model: &str) -> Manufacturer {
    let normalized = model.to_uppercase();
    rules
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.manufacturer)
        .unwrap_or(Manufacturer::Unknown)
}
