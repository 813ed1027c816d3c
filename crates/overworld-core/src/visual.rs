//! Projection of progression state into render directives.
//!
//! [`sync`] is a pure function of the graph and the current-node pointer.
//! The controller calls it after every mutation and caches the result;
//! renderers diff against the previous directives and apply them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::color::Rgba;
use crate::error::ConfigIssue;
use crate::graph::LevelGraph;
use crate::id::{NodeId, PathKey};
use crate::node::NodeState;
use crate::path::{Endpoint, PathTier};

/// Tunable look of nodes and paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualStyle {
    pub base_scale: f32,
    pub locked_scale: f32,
    pub current_scale: f32,
    /// Value-channel multiplier for completed nodes.
    pub completed_value: f32,
    pub locked_color: Rgba,
    pub current_color: Rgba,
    pub highlighted_path: PathLook,
    pub open_path: PathLook,
    pub established_path: PathLook,
    pub frontier_path: PathLook,
}

/// Color and thickness of one path tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathLook {
    pub color: Rgba,
    pub thickness: f32,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            base_scale: 0.8,
            locked_scale: 0.7,
            current_scale: 1.25,
            completed_value: 0.7,
            locked_color: Rgba::GRAY,
            current_color: Rgba::WHITE,
            highlighted_path: PathLook {
                color: Rgba::WHITE,
                thickness: 8.0,
            },
            open_path: PathLook {
                color: Rgba::LIGHT_GRAY,
                thickness: 5.0,
            },
            established_path: PathLook {
                color: Rgba::GRAY,
                thickness: 5.0,
            },
            frontier_path: PathLook {
                color: Rgba::BLACK,
                thickness: 3.0,
            },
        }
    }
}

impl VisualStyle {
    /// Highlighted thickness used when the configured one is unusable.
    pub const FALLBACK_HIGHLIGHT: f32 = 8.0;
    /// Share of the highlighted thickness given to a tier that was too thick.
    pub const THIN_RATIO: f32 = 0.625;

    /// Keep the highlighted tier strictly the thickest. A non-positive
    /// highlighted thickness falls back to [`Self::FALLBACK_HIGHLIGHT`];
    /// any other tier at or above it is cut to [`Self::THIN_RATIO`] of it.
    pub fn sanitize(&mut self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let thickness = self.highlighted_path.thickness;
        if thickness <= 0.0 || !thickness.is_finite() {
            self.highlighted_path.thickness = Self::FALLBACK_HIGHLIGHT;
            issues.push(ConfigIssue::HighlightedThickness {
                thickness,
                used: Self::FALLBACK_HIGHLIGHT,
            });
        }

        let highlighted = self.highlighted_path.thickness;
        let thin = highlighted * Self::THIN_RATIO;
        for (tier, look) in [
            ("open", &mut self.open_path),
            ("established", &mut self.established_path),
            ("frontier", &mut self.frontier_path),
        ] {
            if look.thickness >= highlighted || look.thickness.is_nan() {
                issues.push(ConfigIssue::PathThickness {
                    tier,
                    thickness: look.thickness,
                    highlighted,
                    used: thin,
                });
                look.thickness = thin;
            }
        }
        issues
    }

    fn path_look(&self, tier: PathTier) -> PathLook {
        match tier {
            PathTier::Highlighted => self.highlighted_path,
            PathTier::Open => self.open_path,
            PathTier::Established => self.established_path,
            PathTier::Frontier | PathTier::Hidden => self.frontier_path,
        }
    }
}

/// How one node should look right now.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDirective {
    pub id: NodeId,
    pub state: NodeState,
    pub is_current: bool,
    pub color: Rgba,
    /// Uniform scale the renderer should settle on.
    pub scale: f32,
    pub visible: bool,
    /// Whether the renderer should hit-test this node.
    pub interactive: bool,
    pub status_text: String,
}

/// How one path should look right now.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDirective {
    pub key: PathKey,
    pub tier: PathTier,
    pub color: Rgba,
    pub thickness: f32,
    pub visible: bool,
}

/// Everything a renderer needs for one frame of map state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderDirectives {
    pub nodes: Vec<NodeDirective>,
    pub paths: Vec<PathDirective>,
    node_index: HashMap<NodeId, usize>,
}

impl RenderDirectives {
    pub fn node(&self, id: &NodeId) -> Option<&NodeDirective> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn path(&self, key: &PathKey) -> Option<&PathDirective> {
        self.paths.iter().find(|p| &p.key == key)
    }

    /// The node directive flagged current, if any.
    pub fn current(&self) -> Option<&NodeDirective> {
        self.nodes.iter().find(|n| n.is_current)
    }
}

/// Derive directives for every node and path.
pub fn sync(graph: &LevelGraph, current: Option<&NodeId>, style: &VisualStyle) -> RenderDirectives {
    let is_current = |id: &NodeId| current == Some(id);

    let nodes: Vec<NodeDirective> = graph
        .nodes()
        .map(|node| {
            let state = node.state();
            let (mut color, mut scale, interactive) = match state {
                NodeState::Locked => (style.locked_color, style.base_scale * style.locked_scale, false),
                NodeState::Unlocked => (node.base_color(), style.base_scale, true),
                NodeState::Completed => (
                    node.base_color().scale_value(style.completed_value),
                    style.base_scale,
                    true,
                ),
            };

            let current = is_current(node.id());
            if current {
                color = style.current_color;
                scale *= style.current_scale;
            }

            NodeDirective {
                id: node.id().clone(),
                state,
                is_current: current,
                color,
                scale,
                visible: true,
                interactive,
                status_text: node.status_text().to_string(),
            }
        })
        .collect();

    let paths = graph
        .paths()
        .filter_map(|path| {
            let (a, b) = path.endpoints();
            let endpoint = |id: &NodeId| {
                graph
                    .node(id)
                    .map(|n| Endpoint::new(n.state(), is_current(id)))
            };
            let tier = PathTier::classify(endpoint(a)?, endpoint(b)?);
            let look = style.path_look(tier);
            Some(PathDirective {
                key: path.key().clone(),
                tier,
                color: look.color,
                thickness: look.thickness,
                visible: tier.is_visible(),
            })
        })
        .collect();

    let node_index = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    RenderDirectives {
        nodes,
        paths,
        node_index,
    }
}
