//! Territory adjacency graph and continent grouping.
//!
//! The graph is static input supplied by the board collaborator: which
//! territories exist, which pairs border each other, and how territories are
//! grouped into continents. Borders are stored in both directions so that
//! adjacency is symmetric regardless of how the source data lists them.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Identifier of a territory, e.g. `"t3"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryId(pub String);

impl TerritoryId {
    pub fn new(id: impl Into<String>) -> Self {
        TerritoryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TerritoryId {
    fn from(s: &str) -> Self {
        TerritoryId(s.to_string())
    }
}

/// Errors raised while assembling or loading a territory graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("territory '{0}' declared twice")]
    DuplicateTerritory(String),

    #[error("border references undeclared territory '{0}'")]
    UnknownTerritory(String),

    #[error("territory '{0}' cannot border itself")]
    SelfBorder(String),

    #[error("territory '{territory}' names undeclared continent '{continent}'")]
    UnknownContinent { territory: String, continent: String },

    #[error("graph has no territories")]
    Empty,

    #[error("malformed map definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A continent: a named group of territories with an ownership bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    pub name: String,
    pub bonus: u32,
    pub territories: BTreeSet<TerritoryId>,
}

/// Immutable adjacency and continent data for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryGraph {
    adjacency: BTreeMap<TerritoryId, BTreeSet<TerritoryId>>,
    names: BTreeMap<TerritoryId, String>,
    continents: Vec<Continent>,
}

impl TerritoryGraph {
    /// Starts building a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Builds a continent-less graph from `(territory, neighbors)` rows.
    ///
    /// Every territory named as a neighbor must also appear as a row.
    pub fn from_adjacency(rows: &[(&str, &[&str])]) -> Result<Self, GraphError> {
        let mut builder = GraphBuilder::default();
        for (id, _) in rows {
            builder = builder.territory(*id, *id, None);
        }
        for (id, neighbors) in rows {
            for n in neighbors.iter() {
                builder = builder.border(*id, *n);
            }
        }
        builder.build()
    }

    /// The built-in three-continent map.
    pub fn standard() -> Self {
        // The table below is fixed and well-formed.
        match Self::from_json(STANDARD_MAP_JSON) {
            Ok(graph) => graph,
            Err(e) => unreachable!("built-in map is invalid: {e}"),
        }
    }

    /// Loads a graph from a JSON map definition.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let def: MapDefinition = serde_json::from_str(json)?;
        def.into_graph()
    }

    /// Reads a JSON map definition from disk.
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| GraphError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&json)
    }

    /// All territory ids in sorted order.
    pub fn territories(&self) -> impl Iterator<Item = &TerritoryId> {
        self.adjacency.keys()
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, id: &TerritoryId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Display name for a territory (falls back to its id).
    pub fn name<'a>(&'a self, id: &'a TerritoryId) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id.as_str())
    }

    /// Territories directly bordering `id`. Empty for unknown ids.
    pub fn neighbors(&self, id: &TerritoryId) -> impl Iterator<Item = &TerritoryId> {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// Returns true if `a` and `b` share a border.
    pub fn is_adjacent(&self, a: &TerritoryId, b: &TerritoryId) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    /// Returns true if a chain of borders connects `from` to `to` using only
    /// territories accepted by `passable`. Both endpoints must be passable.
    pub fn connected_through<F>(&self, from: &TerritoryId, to: &TerritoryId, passable: F) -> bool
    where
        F: Fn(&TerritoryId) -> bool,
    {
        if !passable(from) || !passable(to) {
            return false;
        }
        let mut visited: BTreeSet<&TerritoryId> = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(cur) = queue.pop_front() {
            if cur == to {
                return true;
            }
            for next in self.neighbors(cur) {
                if passable(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// All territories reachable from `from` through passable territories,
    /// excluding `from` itself.
    pub fn reachable_from<F>(&self, from: &TerritoryId, passable: F) -> Vec<TerritoryId>
    where
        F: Fn(&TerritoryId) -> bool,
    {
        let mut visited: BTreeSet<&TerritoryId> = BTreeSet::new();
        let mut queue = VecDeque::new();
        if !passable(from) {
            return Vec::new();
        }
        visited.insert(from);
        queue.push_back(from);
        while let Some(cur) = queue.pop_front() {
            for next in self.neighbors(cur) {
                if passable(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited.remove(from);
        visited.into_iter().cloned().collect()
    }
}

/// Incremental graph construction.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    order: Vec<(TerritoryId, String, Option<String>)>,
    borders: Vec<(TerritoryId, TerritoryId)>,
    continents: Vec<(String, u32)>,
}

impl GraphBuilder {
    /// Declares a continent and its bonus.
    pub fn continent(mut self, name: &str, bonus: u32) -> Self {
        self.continents.push((name.to_string(), bonus));
        self
    }

    /// Declares a territory with a display name and optional continent.
    pub fn territory(mut self, id: &str, name: &str, continent: Option<&str>) -> Self {
        self.order
            .push((TerritoryId::new(id), name.to_string(), continent.map(str::to_string)));
        self
    }

    /// Declares a border. Direction does not matter.
    pub fn border(mut self, a: &str, b: &str) -> Self {
        self.borders.push((TerritoryId::new(a), TerritoryId::new(b)));
        self
    }

    pub fn build(self) -> Result<TerritoryGraph, GraphError> {
        if self.order.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut adjacency: BTreeMap<TerritoryId, BTreeSet<TerritoryId>> = BTreeMap::new();
        let mut names = BTreeMap::new();
        let mut continents: Vec<Continent> = self
            .continents
            .into_iter()
            .map(|(name, bonus)| Continent { name, bonus, territories: BTreeSet::new() })
            .collect();

        for (id, name, continent) in self.order {
            if adjacency.insert(id.clone(), BTreeSet::new()).is_some() {
                return Err(GraphError::DuplicateTerritory(id.0));
            }
            if let Some(cname) = continent {
                let entry = continents.iter_mut().find(|c| c.name == cname).ok_or_else(|| {
                    GraphError::UnknownContinent { territory: id.0.clone(), continent: cname.clone() }
                })?;
                entry.territories.insert(id.clone());
            }
            names.insert(id, name);
        }

        for (a, b) in self.borders {
            if a == b {
                return Err(GraphError::SelfBorder(a.0));
            }
            if !adjacency.contains_key(&b) {
                return Err(GraphError::UnknownTerritory(b.0));
            }
            let row = adjacency.get_mut(&a).ok_or_else(|| GraphError::UnknownTerritory(a.0.clone()))?;
            row.insert(b.clone());
            if let Some(back) = adjacency.get_mut(&b) {
                back.insert(a);
            }
        }

        Ok(TerritoryGraph { adjacency, names, continents })
    }
}

#[derive(Deserialize)]
struct MapDefinition {
    territories: Vec<TerritoryDefinition>,
    #[serde(default)]
    continents: BTreeMap<String, ContinentDefinition>,
}

#[derive(Deserialize)]
struct TerritoryDefinition {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    continent: Option<String>,
    #[serde(default)]
    neighbors: Vec<String>,
}

#[derive(Deserialize)]
struct ContinentDefinition {
    #[serde(default)]
    bonus: u32,
}

impl MapDefinition {
    fn into_graph(self) -> Result<TerritoryGraph, GraphError> {
        let mut builder = GraphBuilder::default();
        for (name, c) in &self.continents {
            builder = builder.continent(name, c.bonus);
        }
        for t in &self.territories {
            let name = t.name.as_deref().unwrap_or(&t.id);
            builder = builder.territory(&t.id, name, t.continent.as_deref());
        }
        for t in &self.territories {
            for n in &t.neighbors {
                builder = builder.border(&t.id, n);
            }
        }
        builder.build()
    }
}

const STANDARD_MAP_JSON: &str = r#"{
  "continents": {
    "Atlantis": { "bonus": 2 },
    "Midgard": { "bonus": 3 },
    "Pacificus": { "bonus": 2 }
  },
  "territories": [
    { "id": "t1", "name": "North Atlantis", "continent": "Atlantis", "neighbors": ["t2", "t3"] },
    { "id": "t2", "name": "South Atlantis", "continent": "Atlantis", "neighbors": ["t1", "t3"] },
    { "id": "t3", "name": "West Midgard", "continent": "Midgard", "neighbors": ["t1", "t2", "t4"] },
    { "id": "t4", "name": "East Midgard", "continent": "Midgard", "neighbors": ["t3", "t5", "t6"] },
    { "id": "t3b", "name": "South Midgard", "continent": "Midgard", "neighbors": ["t3", "t4", "t2", "t6"] },
    { "id": "t5", "name": "North Pacificus", "continent": "Pacificus", "neighbors": ["t4", "t6"] },
    { "id": "t6", "name": "South Pacificus", "continent": "Pacificus", "neighbors": ["t4", "t5", "t3b"] }
  ]
}"#;
