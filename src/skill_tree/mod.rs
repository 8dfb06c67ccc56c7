//! Skill-point allocation engine.
//!
//! [`SkillTree`] is an immutable value: increments, decrements and new skills
//! each produce a fresh tree or a [`Rejection`] explaining why nothing changed.
//! Persisting the result is left to the caller through [`save_snapshot`].

mod config;
mod defaults;
mod error;
mod rules;
mod snapshot;
mod state;
mod types;

pub use config::{DEFAULT_BUDGET, DEFAULT_CATEGORIES, DEFAULT_STORAGE_KEY, SkillTreeConfig};
pub use defaults::{default_edges, default_nodes};
pub use error::{Rejection, SnapshotError};
pub use rules::DEFAULT_CATEGORY;
pub use snapshot::{
	LocalStorageStore, MemoryStore, SnapshotStore, commit_action, decode_snapshot, encode_snapshot,
	load_snapshot, restore_tree, save_snapshot,
};
pub use state::SkillTree;
pub use types::{
	Action, CategoryFilter, NewSkill, NodeStatus, Position, SkillEdge, SkillId, SkillNode,
	SkillNodeRecord,
};
