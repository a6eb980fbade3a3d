use crate::errors::{DataError, DataResult};
use schema::{SkillDefinition, SkillId, SpeciesEntry, SpeciesId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only skill catalog keyed by id, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: HashMap<SkillId, SkillDefinition>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SkillId, definition: SkillDefinition) {
        self.skills.insert(id, definition);
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }

    pub fn lookup(&self, id: SkillId) -> DataResult<&SkillDefinition> {
        self.skills.get(&id).ok_or(DataError::SkillNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Load the catalog from a RON file mapping numeric ids to definitions.
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DataError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;
        let raw: HashMap<u32, SkillDefinition> = ron::from_str(&content).map_err(|e| {
            DataError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;

        Ok(Self {
            skills: raw.into_iter().map(|(k, v)| (SkillId(k), v)).collect(),
        })
    }
}

impl FromIterator<(SkillId, SkillDefinition)> for SkillCatalog {
    fn from_iter<I: IntoIterator<Item = (SkillId, SkillDefinition)>>(iter: I) -> Self {
        Self {
            skills: iter.into_iter().collect(),
        }
    }
}

/// Read-only species statline table keyed by id.
///
/// A missing entry is not an error: combatant setup substitutes synthetic
/// defaults so a battle can always be staged.
#[derive(Debug, Clone, Default)]
pub struct StatlineTable {
    species: HashMap<SpeciesId, SpeciesEntry>,
}

impl StatlineTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SpeciesId, entry: SpeciesEntry) {
        self.species.insert(id, entry);
    }

    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesEntry> {
        self.species.get(&id)
    }

    pub fn lookup(&self, id: SpeciesId) -> DataResult<&SpeciesEntry> {
        self.species.get(&id).ok_or(DataError::SpeciesNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Load the table from a RON file mapping numeric ids to entries.
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DataError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;
        let raw: HashMap<u32, SpeciesEntry> = ron::from_str(&content).map_err(|e| {
            DataError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;

        Ok(Self {
            species: raw.into_iter().map(|(k, v)| (SpeciesId(k), v)).collect(),
        })
    }
}

impl FromIterator<(SpeciesId, SpeciesEntry)> for StatlineTable {
    fn from_iter<I: IntoIterator<Item = (SpeciesId, SpeciesEntry)>>(iter: I) -> Self {
        Self {
            species: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{SkillCategory, Statline};

    fn tackle() -> SkillDefinition {
        SkillDefinition {
            name: "Tackle".to_string(),
            category: SkillCategory::Physical,
            power: 40,
            accuracy: 100,
            pp: 35,
            status_effect: None,
            stage_effect: None,
        }
    }

    #[test]
    fn lookup_reports_missing_skills() {
        let catalog: SkillCatalog = [(SkillId(1), tackle())].into_iter().collect();
        assert_eq!(catalog.lookup(SkillId(1)).map(|s| s.name.as_str()), Ok("Tackle"));
        assert_eq!(
            catalog.lookup(SkillId(99)),
            Err(DataError::SkillNotFound(SkillId(99)))
        );
    }

    #[test]
    fn statline_table_lookup() {
        let entry = SpeciesEntry {
            name: "Sproutle".to_string(),
            statline: Statline {
                hp: 20,
                attack: 9,
                defense: 9,
                sp_attack: 11,
                sp_defense: 10,
                speed: 8,
            },
        };
        let table: StatlineTable = [(SpeciesId(1), entry)].into_iter().collect();
        assert_eq!(table.get(SpeciesId(1)).map(|e| e.name.as_str()), Some("Sproutle"));
        assert_eq!(table.get(SpeciesId(2)), None);
        assert_eq!(
            table.lookup(SpeciesId(2)),
            Err(DataError::SpeciesNotFound(SpeciesId(2)))
        );
    }

    #[test]
    fn loading_a_missing_file_fails_cleanly() {
        let err = SkillCatalog::load(Path::new("data/does-not-exist.ron")).unwrap_err();
        assert!(matches!(err, DataError::LoadFailed(_)));
    }

    #[test]
    fn catalog_parses_ron() {
        let raw = r#"{ 1: (
            name: "Ember",
            category: Special,
            power: 40,
            accuracy: 100,
            pp: 25,
            status_effect: Some((ailment: Burn, chance_percent: 10)),
            stage_effect: None,
        ) }"#;
        let parsed: HashMap<u32, SkillDefinition> = ron::from_str(raw).expect("valid RON");
        let catalog: SkillCatalog = parsed
            .into_iter()
            .map(|(k, v)| (SkillId(k), v))
            .collect();
        let ember = catalog.get(SkillId(1)).expect("Ember present");
        assert_eq!(ember.status_effect.map(|e| e.chance_percent), Some(10));
    }
}
