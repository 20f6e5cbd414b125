//! The closed set of muscle groups tracked by the planner.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// One of the twelve muscle groups that weekly volume is accounted against.
///
/// Variant order is the canonical reporting order; `Ord` follows it so a
/// `BTreeMap<MuscleGroup, _>` iterates Pecs first and Abs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MuscleGroup {
    Pecs,
    Delt,
    Traps,
    Lats,
    Biceps,
    Triceps,
    ErectorSpine,
    Quadriceps,
    Hamstrings,
    Glutes,
    Calves,
    Abs,
}

impl MuscleGroup {
    /// All muscle groups in canonical order.
    pub const ALL: [MuscleGroup; 12] = [
        MuscleGroup::Pecs,
        MuscleGroup::Delt,
        MuscleGroup::Traps,
        MuscleGroup::Lats,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::ErectorSpine,
        MuscleGroup::Quadriceps,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Calves,
        MuscleGroup::Abs,
    ];

    /// Display name, as used in catalogs and generator instructions.
    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::Pecs => "Pecs",
            MuscleGroup::Delt => "Delt",
            MuscleGroup::Traps => "Traps",
            MuscleGroup::Lats => "Lats",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::ErectorSpine => "Erector Spine",
            MuscleGroup::Quadriceps => "Quadriceps",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Abs => "Abs",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known muscle group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown muscle group {0:?}")]
pub struct UnknownMuscle(pub String);

impl FromStr for MuscleGroup {
    type Err = UnknownMuscle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMuscle(s.to_string()))
    }
}

impl Serialize for MuscleGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_display_names() {
        for muscle in MuscleGroup::ALL {
            assert_eq!(muscle.as_str().parse::<MuscleGroup>(), Ok(muscle));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "Forearms".parse::<MuscleGroup>().unwrap_err();
        assert_eq!(err, UnknownMuscle("Forearms".to_string()));
    }

    #[test]
    fn ordering_follows_canonical_list() {
        let mut shuffled = vec![MuscleGroup::Abs, MuscleGroup::Pecs, MuscleGroup::ErectorSpine];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![MuscleGroup::Pecs, MuscleGroup::ErectorSpine, MuscleGroup::Abs]
        );
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&MuscleGroup::ErectorSpine).unwrap();
        assert_eq!(json, "\"Erector Spine\"");
    }
}
