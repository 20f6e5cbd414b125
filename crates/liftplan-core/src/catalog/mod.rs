//! Exercise catalog: the reference table of known exercises and the weekly
//! volume credit each one gives to every muscle group.
//!
//! The builtin catalog is defined in `exercises.toml` and embedded in the
//! binary at compile time. Alternative catalogs can be loaded from a TOML
//! file with the same layout; they are validated on load and never mutated
//! afterwards.

pub mod muscle;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use muscle::{MuscleGroup, UnknownMuscle};

/// Whether an exercise trains several joints or a single muscle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Compound,
    Isolation,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Compound => f.write_str("Compound"),
            Category::Isolation => f.write_str("Isolation"),
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Compound" => Ok(Category::Compound),
            "Isolation" => Ok(Category::Isolation),
            _ => Err(()),
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseDefinition {
    pub name: String,
    pub category: Category,
    /// Fraction of each working set credited to a muscle group, in (0, 1].
    pub activation: BTreeMap<MuscleGroup, f64>,
}

/// Errors from loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("catalog TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("catalog must contain at least one exercise")]
    Empty,

    #[error("duplicate exercise name: {0:?}")]
    DuplicateExercise(String),

    #[error("invalid category {value:?} on exercise {exercise:?} (expected Compound or Isolation)")]
    InvalidCategory { exercise: String, value: String },

    #[error("exercise {exercise:?} references {source}")]
    UnknownMuscle {
        exercise: String,
        source: UnknownMuscle,
    },

    #[error("exercise {exercise:?} has coefficient {value} for {muscle} (expected 0 < c <= 1)")]
    InvalidCoefficient {
        exercise: String,
        muscle: MuscleGroup,
        value: f64,
    },

    #[error("exercise {0:?} activates no muscle groups")]
    NoActivation(String),
}

/// Raw on-disk layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    exercises: Vec<RawExercise>,
}

#[derive(Debug, Deserialize)]
struct RawExercise {
    name: String,
    category: String,
    activation: BTreeMap<String, f64>,
}

/// The embedded builtin catalog.
static BUILTIN_CATALOG_TOML: &str = include_str!("exercises.toml");

/// Immutable exercise catalog, keyed by exercise name.
///
/// Entries keep their file order for display; lookups go through an index.
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: Vec<ExerciseDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load the builtin catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The file is compiled into
    /// the binary and covered by tests, so a built binary always has a valid
    /// catalog.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_CATALOG_TOML).expect("embedded exercises.toml is invalid")
    }

    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_raw(file.exercises)
    }

    /// Read, parse, and validate a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    fn from_raw(raw: Vec<RawExercise>) -> Result<Self, CatalogError> {
        if raw.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut exercises = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());

        for entry in raw {
            if index.contains_key(&entry.name) {
                return Err(CatalogError::DuplicateExercise(entry.name));
            }

            let category =
                entry
                    .category
                    .parse::<Category>()
                    .map_err(|()| CatalogError::InvalidCategory {
                        exercise: entry.name.clone(),
                        value: entry.category.clone(),
                    })?;

            if entry.activation.is_empty() {
                return Err(CatalogError::NoActivation(entry.name));
            }

            let mut activation = BTreeMap::new();
            for (muscle_name, coefficient) in &entry.activation {
                let muscle = muscle_name.parse::<MuscleGroup>().map_err(|source| {
                    CatalogError::UnknownMuscle {
                        exercise: entry.name.clone(),
                        source,
                    }
                })?;
                // Written as a negated range check so NaN is rejected too.
                if !(*coefficient > 0.0 && *coefficient <= 1.0) {
                    return Err(CatalogError::InvalidCoefficient {
                        exercise: entry.name.clone(),
                        muscle,
                        value: *coefficient,
                    });
                }
                activation.insert(muscle, *coefficient);
            }

            index.insert(entry.name.clone(), exercises.len());
            exercises.push(ExerciseDefinition {
                name: entry.name,
                category,
                activation,
            });
        }

        Ok(Self { exercises, index })
    }

    /// Look up an exercise by exact name.
    pub fn get(&self, name: &str) -> Option<&ExerciseDefinition> {
        self.index.get(name).map(|&i| &self.exercises[i])
    }

    /// Whether `name` is a catalog key.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Render the catalog as a JSON object keyed by exercise name, the shape
    /// embedded in generator instructions.
    pub fn to_instruction_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .exercises
            .iter()
            .map(|e| {
                let activation: serde_json::Map<String, serde_json::Value> = e
                    .activation
                    .iter()
                    .map(|(m, c)| (m.to_string(), serde_json::json!(c)))
                    .collect();
                (
                    e.name.clone(),
                    serde_json::json!({
                        "type": e.category.to_string(),
                        "activation": activation,
                    }),
                )
            })
            .collect();
        serde_json::Value::Object(map)
    }
}
