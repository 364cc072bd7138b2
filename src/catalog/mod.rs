//! Immutable art catalog and tunable constants
//!
//! Pure lookup data: the engine never mutates a catalog once built. The
//! catalog remembers insertion order so any scan over it (glimmer candidates)
//! is deterministic under a fixed seed.

pub mod art;
pub mod constants;
pub mod definitions;

pub use art::{Art, Attribute, ChargeSpec, ComboRole, ComboSpec, RepeatPenaltySpec, TimingSpec};
pub use constants::{
    Constants, DamageConstants, EnergyConstants, GlimmerConstants, ResonanceConstants,
    ScheduleConstants,
};
pub use definitions::builtin_arts;

use ahash::AHashMap;

use crate::core::types::ArtId;

/// Identifier-keyed lookup of art definitions
#[derive(Debug, Clone, Default)]
pub struct ArtCatalog {
    order: Vec<ArtId>,
    arts: AHashMap<ArtId, Art>,
}

impl ArtCatalog {
    pub fn new(arts: Vec<Art>) -> Self {
        let mut catalog = Self::default();
        for a in arts {
            catalog.insert(a);
        }
        catalog
    }

    /// The builtin roster shipped with the engine.
    pub fn builtin() -> Self {
        Self::new(definitions::builtin_arts())
    }

    /// Load a catalog from a JSON array of art definitions.
    pub fn from_json_str(text: &str) -> crate::core::Result<Self> {
        let arts: Vec<Art> = serde_json::from_str(text)?;
        Ok(Self::new(arts))
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::core::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn insert(&mut self, a: Art) {
        if !self.arts.contains_key(&a.id) {
            self.order.push(a.id.clone());
        }
        self.arts.insert(a.id.clone(), a);
    }

    pub fn get(&self, id: &ArtId) -> Option<&Art> {
        self.arts.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Arts in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Art> {
        self.order.iter().filter_map(|id| self.arts.get(id))
    }

    /// Arts whose inspiration sources include `used`, in catalog order.
    pub fn inspired_by<'a>(&'a self, used: &'a ArtId) -> impl Iterator<Item = &'a Art> {
        self.iter()
            .filter(move |a| a.inspiration_source.contains(used))
    }
}
