//! Core domain types for dexgen record databases and generated sites.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Current schema version for the site manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Largest stat value a bar can represent.
pub const STAT_MAX: u32 = 255;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The six stat keys every record carries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKey {
    /// All keys in display order.
    pub const ALL: [StatKey; 6] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::SpecialAttack,
        StatKey::SpecialDefense,
        StatKey::Speed,
    ];

    /// The key as spelled in record files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::SpecialAttack => "special attack",
            Self::SpecialDefense => "special defense",
            Self::Speed => "speed",
        }
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Base stats. Exactly the six keys of [`StatKey`] are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(rename = "special attack")]
    pub special_attack: u32,
    #[serde(rename = "special defense")]
    pub special_defense: u32,
    pub speed: u32,
}

impl Stats {
    /// Value for a single stat.
    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::SpecialAttack => self.special_attack,
            StatKey::SpecialDefense => self.special_defense,
            StatKey::Speed => self.speed,
        }
    }

    /// `(key, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, u32)> + '_ {
        StatKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }

    /// Sum of all six stats.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, value)| value).sum()
    }
}

// ---------------------------------------------------------------------------
// Evolution declarations
// ---------------------------------------------------------------------------

/// One `evolutions:` entry in a record file: the target and its trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionDecl {
    pub pokemon: EvolutionTarget,
    pub method: EvolutionMethod,
}

/// Reference to the record an evolution leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionTarget {
    pub name: String,
}

/// Structured trigger condition of an evolution.
///
/// Keys without a dedicated field are kept in `extra` so the condition can
/// still be dumped verbatim when no display rule matches it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionMethod {
    /// Level threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Item used on the creature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Friendship threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happiness: Option<HappinessThreshold>,
    /// Extra requirement attached to a level-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<MethodCondition>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// `happiness:` comparison, e.g. `{eq_exceeds: 220}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HappinessThreshold {
    /// Reached when friendship is at or above this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq_exceeds: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// `condition:` attached to a level-up evolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodCondition {
    /// Item that must be held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Time of day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Transformations
// ---------------------------------------------------------------------------

/// An alternate form with its own typing and stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub name: String,
    pub types: Vec<String>,
    pub stats: Stats,
    #[serde(default)]
    pub condition: TransformationCondition,
}

/// When a form is entered and left. Both sides are free-form mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationCondition {
    #[serde(default)]
    pub activation: BTreeMap<String, Value>,
    #[serde(default)]
    pub deactivation: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One creature entry, as stored in a single record file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique name; primary key across the dataset.
    pub name: String,
    /// 1-based global display position.
    pub index: u32,
    pub category: String,
    pub types: Vec<String>,
    pub stats: Stats,
    /// Evolutions where this record is the source, in declared order.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub evolutions: Vec<EvolutionDecl>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub transformations: Vec<Transformation>,
}

/// A parsed record together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub record: Record,
    /// Source file the record was parsed from.
    pub source: PathBuf,
    /// Output document stem (category prefix + file stem).
    pub file_key: String,
}

/// Treat an explicit `key:` with no value the same as an absent key.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Ordinal table
// ---------------------------------------------------------------------------

/// One row of the global ordinal table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalEntry {
    /// 1-based global position.
    pub index: u32,
    /// Display name (the record name).
    pub name: String,
    /// Output document stem.
    pub file_key: String,
}

impl OrdinalEntry {
    /// File name of the record's generated page.
    pub fn href(&self) -> String {
        format!("{}.html", self.file_key)
    }
}

// ---------------------------------------------------------------------------
// FamilyTree
// ---------------------------------------------------------------------------

/// A resolved evolution family laid out from its base member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyTree {
    /// Name of the record the family was resolved for.
    pub focus: String,
    /// The single member with no incoming evolution.
    pub base: FamilyNode,
}

/// A family member and the evolutions leading out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyNode {
    pub name: String,
    pub file_key: String,
    pub ordinal: u32,
    /// Outgoing branches, ascending by target ordinal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evolutions: Vec<FamilyBranch>,
}

/// An edge of the tree: the formatted trigger plus the subtree it leads to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyBranch {
    /// Display text of the evolution method.
    pub method: String,
    pub node: FamilyNode,
}

impl FamilyTree {
    /// Member names in serialization order (pre-order, siblings by ordinal).
    pub fn members(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.base.collect_names(&mut out);
        out
    }

    /// Number of tiers, counting the base as one.
    pub fn depth(&self) -> usize {
        self.base.depth()
    }
}

impl FamilyNode {
    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.name);
        for branch in &self.evolutions {
            branch.node.collect_names(out);
        }
    }

    /// Length of the longest path from this node, in nodes.
    pub fn depth(&self) -> usize {
        1 + self
            .evolutions
            .iter()
            .map(|branch| branch.node.depth())
            .max()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// SiteManifest
// ---------------------------------------------------------------------------

/// The `manifest.json` written at the root of a generated site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteManifest {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Site title.
    pub title: String,
    /// Tool version that generated the site.
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    /// Number of record pages (the index page is not counted).
    pub page_count: usize,
    /// Every written document with its checksum.
    pub pages: Vec<PageEntry>,
}

/// A single written document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub file: String,
    pub sha256: String,
    pub size_bytes: usize,
}
