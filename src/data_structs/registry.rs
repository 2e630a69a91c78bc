use std::fmt::{
    self,
    Display,
};

use hashbrown::HashMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::config::AnnotationConfig;
use crate::data_structs::entities::{
    Cnv,
    Enhancer,
    FromInterval,
    Gene,
    Tad,
};
use crate::data_structs::interval::{
    GenomicInterval,
    GenomicRegion,
    Span,
};
use crate::data_structs::typedef::PosType;
use crate::error::{
    AnnotError,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Tad,
    Gene,
    Enhancer,
    Cnv,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Tad,
        EntityKind::Gene,
        EntityKind::Enhancer,
        EntityKind::Cnv,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Tad => "tad",
            EntityKind::Gene => "gene",
            EntityKind::Enhancer => "enhancer",
            EntityKind::Cnv => "cnv",
        }
    }

    /// Builds the entity of this kind from a parsed interval.
    pub fn build(
        &self,
        interval: GenomicInterval,
        config: &AnnotationConfig,
    ) -> Result<Entity> {
        Ok(match self {
            EntityKind::Tad => Entity::Tad(Tad::from_interval(interval, config)?),
            EntityKind::Gene => Entity::Gene(Gene::from_interval(interval, config)?),
            EntityKind::Enhancer => {
                Entity::Enhancer(Enhancer::from_interval(interval, config)?)
            },
            EntityKind::Cnv => Entity::Cnv(Cnv::from_interval(interval, config)?),
        })
    }
}

impl Display for EntityKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Any loaded entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Tad(Tad),
    Gene(Gene),
    Enhancer(Enhancer),
    Cnv(Cnv),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Tad(_) => EntityKind::Tad,
            Entity::Gene(_) => EntityKind::Gene,
            Entity::Enhancer(_) => EntityKind::Enhancer,
            Entity::Cnv(_) => EntityKind::Cnv,
        }
    }
}

impl Span for Entity {
    fn start(&self) -> PosType {
        self.interval().start()
    }

    fn end(&self) -> PosType {
        self.interval().end()
    }
}

impl GenomicRegion for Entity {
    fn interval(&self) -> &GenomicInterval {
        match self {
            Entity::Tad(v) => v.interval(),
            Entity::Gene(v) => v.interval(),
            Entity::Enhancer(v) => v.interval(),
            Entity::Cnv(v) => v.interval(),
        }
    }
}

macro_rules! entity_try_from {
    ($variant: ident) => {
        impl TryFrom<Entity> for $variant {
            type Error = AnnotError;

            fn try_from(value: Entity) -> Result<Self> {
                match value {
                    Entity::$variant(v) => Ok(v),
                    other => {
                        Err(AnnotError::UnknownEntityType(format!(
                            "expected {}, got {}",
                            stringify!($variant).to_lowercase(),
                            other.kind()
                        )))
                    },
                }
            }
        }
    };
}

entity_try_from!(Tad);
entity_try_from!(Gene);
entity_try_from!(Enhancer);
entity_try_from!(Cnv);

/// Name to entity-kind lookup used when the kind of a file is chosen at
/// run time. Names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    kinds: HashMap<String, EntityKind>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for kind in EntityKind::ALL {
            registry.register(kind.name(), kind);
        }
        registry
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Registers `name` (e.g. an alias such as "domain") for `kind`.
    /// Returns the kind previously registered under that name.
    pub fn register(
        &mut self,
        name: &str,
        kind: EntityKind,
    ) -> Option<EntityKind> {
        self.kinds.insert(name.to_lowercase(), kind)
    }

    pub fn resolve(
        &self,
        name: &str,
    ) -> Result<EntityKind> {
        self.kinds
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| AnnotError::UnknownEntityType(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}
