//! Human-readable summaries of a buff's stat modifiers

use buffwatch_types::formatting::format_stat;

use super::StatDeltas;

/// Copy used when a buff modifies no visible stat.
pub const NO_VISIBLE_EFFECTS: &str = "No visible effects";

pub type StatAccessor = fn(&StatDeltas) -> i32;

/// Stats in display order. Order is part of the output format.
pub const STAT_FIELDS: &[(&str, StatAccessor)] = &[
    ("Farming", |s: &StatDeltas| s.farming),
    ("Fishing", |s: &StatDeltas| s.fishing),
    ("Mining", |s: &StatDeltas| s.mining),
    ("Luck", |s: &StatDeltas| s.luck),
    ("Foraging", |s: &StatDeltas| s.foraging),
    ("Max Energy", |s: &StatDeltas| s.max_energy),
    ("Magnetism", |s: &StatDeltas| s.magnetism),
    ("Speed", |s: &StatDeltas| s.speed),
    ("Defense", |s: &StatDeltas| s.defense),
    ("Attack", |s: &StatDeltas| s.attack),
];

/// Describe nonzero stat deltas as `"Speed +2, Luck -1"`.
///
/// Returns an empty string when nothing is modified; display code shows
/// [`NO_VISIBLE_EFFECTS`] in that case.
pub fn describe(effects: &StatDeltas) -> String {
    STAT_FIELDS
        .iter()
        .filter_map(|(label, get)| {
            let value = get(effects);
            (value != 0).then(|| format_stat(label, value))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
