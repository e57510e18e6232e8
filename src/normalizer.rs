//! Plant Factor Normalizer
//!
//! Turns retained plant reference rows into `(PrimaryType, coefficient)` pairs
//! and averages the coefficients per primary type.
//!
//! Two lookups drive it:
//! - Plant factor bucket → representative coefficient (closed table, no defaults)
//! - Comma-separated type tags → first tag in the closed `PrimaryType` set
//!
//! Qualifier tags such as "California Native" or "Arboretum All-Star" are not
//! stripped. They are ordinary tags that never match the closed set, so the
//! first-match scan steps over them.

use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::data::{BOTANICAL_NAME_COLUMN, PLANT_FACTOR_COLUMN, TYPE_COLUMN};
use crate::error::{PolarsContext, Result, SavingsError};

/// Plant factor bucket strings and their representative coefficients
pub const PLANT_FACTOR_BUCKETS: &[(&str, f64)] = &[
    ("< 0.10", 0.05),
    ("0.10-0.30", 0.20),
    ("0.40-0.60", 0.50),
    ("0.70-0.90", 0.80),
];

/// The primary type that stands in for an irrigated lawn
pub const LAWN_BASELINE: PrimaryType = PrimaryType::OrnamentalGrass;

/// Canonical plant category used for aggregation
///
/// Variant order is the canonical listing order and breaks demand ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimaryType {
    Tree,
    Shrub,
    #[serde(rename = "Ground Cover")]
    GroundCover,
    #[serde(rename = "Ornamental Grass")]
    OrnamentalGrass,
    Vine,
    Perennial,
    Succulent,
    #[serde(rename = "Palm and Cycad")]
    PalmAndCycad,
    Bamboo,
    Bulb,
}

impl PrimaryType {
    pub const ALL: [PrimaryType; 10] = [
        PrimaryType::Tree,
        PrimaryType::Shrub,
        PrimaryType::GroundCover,
        PrimaryType::OrnamentalGrass,
        PrimaryType::Vine,
        PrimaryType::Perennial,
        PrimaryType::Succulent,
        PrimaryType::PalmAndCycad,
        PrimaryType::Bamboo,
        PrimaryType::Bulb,
    ];

    /// Label exactly as it appears in the source `Type(s)` column
    pub fn label(self) -> &'static str {
        match self {
            PrimaryType::Tree => "Tree",
            PrimaryType::Shrub => "Shrub",
            PrimaryType::GroundCover => "Ground Cover",
            PrimaryType::OrnamentalGrass => "Ornamental Grass",
            PrimaryType::Vine => "Vine",
            PrimaryType::Perennial => "Perennial",
            PrimaryType::Succulent => "Succulent",
            PrimaryType::PalmAndCycad => "Palm and Cycad",
            PrimaryType::Bamboo => "Bamboo",
            PrimaryType::Bulb => "Bulb",
        }
    }

    /// Exact, case-sensitive match against the closed set
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == tag)
    }
}

impl fmt::Display for PrimaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PrimaryType {
    type Err = SavingsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s.trim()).ok_or_else(|| SavingsError::UnknownPlantType(s.to_string()))
    }
}

/// Coefficient for a plant factor bucket, `None` if the bucket is unmappable
pub fn plant_factor_coefficient(bucket: &str) -> Option<f64> {
    let bucket = bucket.trim();
    PLANT_FACTOR_BUCKETS
        .iter()
        .find(|(key, _)| *key == bucket)
        .map(|(_, coefficient)| *coefficient)
}

/// Split a `Type(s)` cell on commas and trim each part
pub fn split_tags(tags: &str) -> SmallVec<[&str; 8]> {
    tags.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// First tag (in listed order) that belongs to the closed type set
pub fn extract_primary_type(tags: &str) -> Option<PrimaryType> {
    split_tags(tags).into_iter().find_map(PrimaryType::from_tag)
}

/// True if any tag exactly equals one of `accepted`
pub fn has_any_tag(tags: &str, accepted: &[String]) -> bool {
    split_tags(tags)
        .iter()
        .any(|tag| accepted.iter().any(|a| a.as_str() == *tag))
}

/// One reference row after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlant {
    pub botanical_name: Option<String>,
    pub primary_type: PrimaryType,
    pub coefficient: f64,
}

/// Row accounting for one normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationSummary {
    pub input_rows: usize,
    pub retained: usize,
    /// Bucket missing or not in `PLANT_FACTOR_BUCKETS`
    pub unmappable_factor: usize,
    /// No tag in the closed `PrimaryType` set
    pub no_primary_type: usize,
}

/// Normalize every row of the (already filtered) plant reference table
///
/// Rows are dropped, never defaulted, when the bucket is unmappable or no
/// primary type can be extracted.
pub fn normalize_plants(df: &DataFrame) -> Result<(Vec<NormalizedPlant>, NormalizationSummary)> {
    let context = "plant reference";
    let types = df.column(TYPE_COLUMN).data_context(context)?.str().data_context(context)?;
    let factors = df
        .column(PLANT_FACTOR_COLUMN)
        .data_context(context)?
        .str()
        .data_context(context)?;
    let names = match df.column(BOTANICAL_NAME_COLUMN) {
        Ok(column) => Some(column.str().data_context(context)?),
        Err(_) => None,
    };

    let mut summary = NormalizationSummary {
        input_rows: df.height(),
        ..Default::default()
    };
    let mut plants = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let Some(coefficient) = factors.get(idx).and_then(plant_factor_coefficient) else {
            tracing::debug!(row = idx, bucket = ?factors.get(idx), "Unmappable plant factor");
            summary.unmappable_factor += 1;
            continue;
        };

        let Some(primary_type) = types.get(idx).and_then(extract_primary_type) else {
            tracing::debug!(row = idx, tags = ?types.get(idx), "No primary type");
            summary.no_primary_type += 1;
            continue;
        };

        let botanical_name = names
            .and_then(|n| n.get(idx))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        plants.push(NormalizedPlant {
            botanical_name,
            primary_type,
            coefficient,
        });
    }

    summary.retained = plants.len();

    if summary.unmappable_factor > 0 || summary.no_primary_type > 0 {
        tracing::warn!(
            unmappable_factor = summary.unmappable_factor,
            no_primary_type = summary.no_primary_type,
            "Dropped plant rows during normalization"
        );
    }

    Ok((plants, summary))
}

/// Mean coefficient for one primary type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeFactor {
    pub mean_coefficient: f64,
    pub plant_count: usize,
}

/// PrimaryType → mean plant factor coefficient
///
/// Types with no surviving rows have no entry.
#[derive(Debug, Clone)]
pub struct PlantFactorTable {
    entries: FxHashMap<PrimaryType, TypeFactor>,
}

impl PlantFactorTable {
    /// Group normalized rows by primary type and average their coefficients
    ///
    /// # Errors
    /// `DataLoad` if the lawn baseline type has no rows: every savings figure
    /// is relative to it.
    pub fn from_plants(plants: &[NormalizedPlant]) -> Result<Self> {
        let mut sums: FxHashMap<PrimaryType, (f64, usize)> = FxHashMap::default();
        for plant in plants {
            let entry = sums.entry(plant.primary_type).or_insert((0.0, 0));
            entry.0 += plant.coefficient;
            entry.1 += 1;
        }

        let entries: FxHashMap<PrimaryType, TypeFactor> = sums
            .into_iter()
            .map(|(primary_type, (sum, count))| {
                (
                    primary_type,
                    TypeFactor {
                        mean_coefficient: sum / count as f64,
                        plant_count: count,
                    },
                )
            })
            .collect();

        if !entries.contains_key(&LAWN_BASELINE) {
            return Err(SavingsError::data_load(
                "plant factor table",
                format!(
                    "lawn baseline type '{}' has no usable rows; savings cannot be computed",
                    LAWN_BASELINE
                ),
            ));
        }

        Ok(Self { entries })
    }

    pub fn get(&self, primary_type: PrimaryType) -> Option<&TypeFactor> {
        self.entries.get(&primary_type)
    }

    pub fn mean_coefficient(&self, primary_type: PrimaryType) -> Option<f64> {
        self.get(primary_type).map(|f| f.mean_coefficient)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimaryType, &TypeFactor)> {
        self.entries.iter().map(|(t, f)| (*t, f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bucket_lookup_exact_values() {
        assert_eq!(plant_factor_coefficient("< 0.10"), Some(0.05));
        assert_eq!(plant_factor_coefficient("0.10-0.30"), Some(0.20));
        assert_eq!(plant_factor_coefficient("0.40-0.60"), Some(0.50));
        assert_eq!(plant_factor_coefficient("0.70-0.90"), Some(0.80));
        assert_eq!(plant_factor_coefficient("  0.70-0.90 "), Some(0.80));
    }

    #[test]
    fn test_bucket_lookup_rejects_unknown() {
        assert_eq!(plant_factor_coefficient("0.30-0.40"), None);
        assert_eq!(plant_factor_coefficient("Unknown"), None);
        assert_eq!(plant_factor_coefficient(""), None);
        assert_eq!(plant_factor_coefficient("<0.10"), None);
    }

    #[test]
    fn test_extract_primary_type_first_match_wins() {
        assert_eq!(
            extract_primary_type("California Native, Shrub, Tree"),
            Some(PrimaryType::Shrub)
        );
        assert_eq!(
            extract_primary_type("Tree,Shrub"),
            Some(PrimaryType::Tree)
        );
        assert_eq!(
            extract_primary_type("Arboretum All-Star, Palm and Cycad"),
            Some(PrimaryType::PalmAndCycad)
        );
    }

    #[test]
    fn test_extract_primary_type_is_exact_and_case_sensitive() {
        assert_eq!(extract_primary_type("California Native, shrub"), None);
        assert_eq!(extract_primary_type("Shrubs"), None);
        assert_eq!(extract_primary_type("Ornamental Grass Mix"), None);
        assert_eq!(extract_primary_type(""), None);
    }

    #[test]
    fn test_primary_type_from_str() {
        assert_eq!("Ground Cover".parse::<PrimaryType>().unwrap(), PrimaryType::GroundCover);
        let err = "Cactus".parse::<PrimaryType>().unwrap_err();
        assert!(matches!(err, SavingsError::UnknownPlantType(name) if name == "Cactus"));
    }

    #[test]
    fn test_has_any_tag() {
        let accepted = vec!["California Native".to_string(), "Ornamental Grass".to_string()];
        assert!(has_any_tag("Shrub, California Native", &accepted));
        assert!(has_any_tag("Ornamental Grass", &accepted));
        assert!(!has_any_tag("Shrub, Arboretum All-Star", &accepted));
    }

    #[test]
    fn test_normalize_drops_unmappable_rows() {
        let df = df![
            "Type(s)" => &[
                "Ornamental Grass",
                "California Native, Shrub",
                "California Native, Shrub",
                "California Native",
            ],
            "Plant_Factor" => &["0.70-0.90", "0.10-0.30", "Unknown", "0.40-0.60"],
            "Botanical Name" => &["Festuca", "Ceanothus", "Salvia", "Arctostaphylos"],
        ]
        .unwrap();

        let (plants, summary) = normalize_plants(&df).unwrap();
        assert_eq!(plants.len(), 2);
        assert_eq!(summary.input_rows, 4);
        assert_eq!(summary.retained, 2);
        assert_eq!(summary.unmappable_factor, 1);
        assert_eq!(summary.no_primary_type, 1);
        assert_eq!(plants[1].botanical_name.as_deref(), Some("Ceanothus"));
    }

    #[test]
    fn test_table_means_per_type() {
        let plants = vec![
            NormalizedPlant { botanical_name: None, primary_type: PrimaryType::OrnamentalGrass, coefficient: 0.80 },
            NormalizedPlant { botanical_name: None, primary_type: PrimaryType::Shrub, coefficient: 0.20 },
            NormalizedPlant { botanical_name: None, primary_type: PrimaryType::Shrub, coefficient: 0.50 },
        ];

        let table = PlantFactorTable::from_plants(&plants).unwrap();
        assert_eq!(table.len(), 2);
        assert_relative_eq!(table.mean_coefficient(PrimaryType::Shrub).unwrap(), 0.35, epsilon = 1e-12);
        assert_eq!(table.get(PrimaryType::Shrub).unwrap().plant_count, 2);
        assert!(table.get(PrimaryType::Tree).is_none());
    }

    #[test]
    fn test_table_requires_lawn_baseline() {
        let plants = vec![NormalizedPlant {
            botanical_name: None,
            primary_type: PrimaryType::Shrub,
            coefficient: 0.20,
        }];

        let err = PlantFactorTable::from_plants(&plants).unwrap_err();
        assert!(matches!(err, SavingsError::DataLoad { .. }));
        assert!(err.to_string().contains("Ornamental Grass"));
    }
}
