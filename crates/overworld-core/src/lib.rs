//! Overworld Core -- the progression state machine of a level-select map.
//!
//! A map is a graph of level nodes joined by paths. The player stands on
//! exactly one node at a time; arriving on a node opens the levels it lists
//! in its `unlocks`, and leaving a node marks it completed. This crate owns
//! that state machine and the pure projection of it into render
//! directives. It never draws anything and performs no I/O.
//!
//! # Flow
//!
//! 1. [`graph::LevelGraph::build`] turns node records into nodes and
//!    canonical paths, reporting [`error::ConfigIssue`]s instead of failing.
//! 2. [`controller::ProgressionController`] places the player on the start
//!    node and handles click intents.
//! 3. After every state change the controller calls [`visual::sync`] and
//!    caches the resulting [`visual::RenderDirectives`].
//! 4. Renderers drain [`event::ProgressionEvent`]s and
//!    [`animation::AnimationRequest`]s, and call
//!    [`controller::ProgressionController::frame`] once per frame for
//!    bobbing, spinning and due "settle" animations.
//!
//! ```rust,ignore
//! let (graph, issues) = LevelGraph::build(&configs);
//! let mut map = ProgressionController::with_defaults(graph)?;
//! match map.handle_click(&NodeId::from("1-2")) {
//!     Ok(ClickOutcome::Moved(report)) => { /* report.unlocked popped */ }
//!     Ok(ClickOutcome::Entered(_)) => { /* start the level */ }
//!     Err(rejection) => { /* a shake request was queued */ }
//! }
//! ```
//!
//! # State rules
//!
//! - Node state only moves forward: `Locked -> Unlocked -> Completed`.
//! - "Current" is a pointer, not a state; exactly one node is current once
//!   the controller exists.
//! - The unlock cascade is limited to the destination's direct `unlocks`.

pub mod animation;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod graph;
pub mod id;
pub mod node;
pub mod path;
pub mod visual;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use controller::{ClickOutcome, MoveReport, MovementPolicy, ProgressionController};
pub use error::{ClickRejection, ConfigIssue, ProgressionError};
pub use graph::LevelGraph;
pub use id::{NodeId, PathKey};
pub use node::NodeState;
