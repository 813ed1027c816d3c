//! Static topology of the level map.
//!
//! [`LevelGraph::build`] runs once per session. It turns node records into
//! [`LevelNode`]s, derives one [`LevelPath`] per unordered pair implied by
//! any `unlocks` list, and guarantees at least one node starts open so the
//! controller always has a place to put the player.

use std::collections::{BTreeMap, HashMap};

use crate::color::{ColorSpec, Rgba};
use crate::config::NodeConfig;
use crate::error::ConfigIssue;
use crate::id::{NodeId, PathKey};
use crate::node::LevelNode;
use crate::path::LevelPath;

/// Nodes keyed by id (iterated in configuration order) and paths keyed by
/// canonical pair.
#[derive(Debug, Clone)]
pub struct LevelGraph {
    nodes: HashMap<NodeId, LevelNode>,
    order: Vec<NodeId>,
    paths: BTreeMap<PathKey, LevelPath>,
    start: Option<NodeId>,
}

impl LevelGraph {
    /// Build the graph from node records. Problems are logged, collected
    /// and returned alongside the graph; they never abort the build.
    pub fn build(configs: &[NodeConfig]) -> (Self, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut nodes = HashMap::with_capacity(configs.len());
        let mut order = Vec::with_capacity(configs.len());

        for (index, cfg) in configs.iter().enumerate() {
            if cfg.id.is_empty() {
                issues.push(ConfigIssue::EmptyId { index });
                continue;
            }
            if nodes.contains_key(&cfg.id) {
                issues.push(ConfigIssue::DuplicateNode { id: cfg.id.clone() });
                continue;
            }

            let base_color = cfg.color.resolve().unwrap_or_else(|| {
                issues.push(ConfigIssue::UnknownColor {
                    node: cfg.id.clone(),
                    color: match &cfg.color {
                        ColorSpec::Named(name) => name.clone(),
                        other => format!("{other:?}"),
                    },
                });
                Rgba::GRAY
            });

            nodes.insert(cfg.id.clone(), LevelNode::from_config(cfg, base_color));
            order.push(cfg.id.clone());
        }

        let mut paths = BTreeMap::new();
        for id in &order {
            let node = &nodes[id];
            for target in node.unlocks() {
                if target == id {
                    issues.push(ConfigIssue::SelfUnlock { node: id.clone() });
                    continue;
                }
                if !nodes.contains_key(target) {
                    issues.push(ConfigIssue::DanglingUnlock {
                        from: id.clone(),
                        to: target.clone(),
                    });
                    continue;
                }

                let key = PathKey::new(id.clone(), target.clone());
                if !paths.contains_key(&key) {
                    let (low, high) = key.endpoints();
                    let positions = (nodes[low].position(), nodes[high].position());
                    paths.insert(key.clone(), LevelPath::new(key, positions));
                }
            }
        }

        let mut start = order
            .iter()
            .find(|id| nodes[*id].state().is_open())
            .cloned();

        if start.is_none()
            && let Some(first) = order.first()
            && let Some(node) = nodes.get_mut(first)
        {
            node.unlock();
            issues.push(ConfigIssue::ForcedStart { node: first.clone() });
            start = Some(first.clone());
        }

        for issue in &issues {
            tracing::warn!(%issue, "level graph configuration issue");
        }
        tracing::debug!(
            nodes = order.len(),
            paths = paths.len(),
            start = start.as_ref().map(NodeId::as_str),
            "level graph built"
        );

        (
            Self {
                nodes,
                order,
                paths,
                start,
            },
            issues,
        )
    }

    /// Where the player starts: the first node configured open, or the
    /// force-unlocked first record. `None` only for an empty graph.
    pub fn start(&self) -> Option<&NodeId> {
        self.start.as_ref()
    }

    pub fn node(&self, id: &NodeId) -> Option<&LevelNode> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Option<&mut LevelNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in configuration order.
    pub fn nodes(&self) -> impl Iterator<Item = &LevelNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Paths in canonical key order.
    pub fn paths(&self) -> impl Iterator<Item = &LevelPath> {
        self.paths.values()
    }

    pub fn path(&self, key: &PathKey) -> Option<&LevelPath> {
        self.paths.get(key)
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Whether a path joins `a` and `b`, in either direction.
    pub fn is_adjacent(&self, a: &NodeId, b: &NodeId) -> bool {
        self.paths.contains_key(&PathKey::new(a.clone(), b.clone()))
    }

    /// Ids joined to `id` by a path.
    pub fn neighbors<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.paths.keys().filter_map(move |key| key.other(id))
    }
}
