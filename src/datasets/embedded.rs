const REGIONS: &str = include_str!("../../datasets/regions.json");
const COMMUNITIES: &str = include_str!("../../datasets/communities.json");
const INTELLIGENCE: &str = include_str!("../../datasets/intelligence.json");
const DISPLACEMENT: &str = include_str!("../../datasets/displacement.json");
const DETERMINANTS: &str = include_str!("../../datasets/determinants.json");
const DISABILITY: &str = include_str!("../../datasets/disability.json");

/// All embedded tables as (table name, JSON).
pub const ALL_TABLES: &[(&str, &str)] = &[
    ("regions", REGIONS),
    ("communities", COMMUNITIES),
    ("intelligence", INTELLIGENCE),
    ("displacement", DISPLACEMENT),
    ("determinants", DETERMINANTS),
    ("disability", DISABILITY),
];

/// Look up an embedded table's JSON by name.
pub fn get_embedded(table: &str) -> Option<&'static str> {
    ALL_TABLES
        .iter()
        .find(|(name, _)| *name == table)
        .map(|(_, json)| *json)
}
