//! Snapshot persistence.
//!
//! A snapshot is the JSON array of node records kept under one key. Saving is
//! fire-and-forget: failures are logged and dropped, and the in-memory tree
//! stays authoritative. A missing or unreadable snapshot falls back to the
//! built-in tree.

use std::cell::RefCell;

use log::{debug, info, warn};

use super::config::SkillTreeConfig;
use super::defaults::default_edges;
use super::error::{Rejection, SnapshotError};
use super::state::SkillTree;
use super::types::{Action, SkillNode};

/// Single-key string store backing the snapshot.
pub trait SnapshotStore {
	/// The stored value, `None` when nothing was saved yet.
	fn read(&self) -> Result<Option<String>, SnapshotError>;

	/// Replaces the stored value.
	fn write(&self, value: &str) -> Result<(), SnapshotError>;
}

/// Browser `localStorage` under a fixed key.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
	key: String,
}

impl LocalStorageStore {
	/// A store reading and writing `key`.
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	fn storage(&self) -> Result<web_sys::Storage, SnapshotError> {
		let window = web_sys::window()
			.ok_or_else(|| SnapshotError::StorageUnavailable("no window".into()))?;
		window
			.local_storage()
			.map_err(|e| SnapshotError::StorageUnavailable(format!("{e:?}")))?
			.ok_or_else(|| SnapshotError::StorageUnavailable("localStorage disabled".into()))
	}
}

impl SnapshotStore for LocalStorageStore {
	fn read(&self) -> Result<Option<String>, SnapshotError> {
		self.storage()?
			.get_item(&self.key)
			.map_err(|e| SnapshotError::StorageUnavailable(format!("{e:?}")))
	}

	fn write(&self, value: &str) -> Result<(), SnapshotError> {
		self.storage()?
			.set_item(&self.key, value)
			.map_err(|e| SnapshotError::WriteFailed(format!("{e:?}")))
	}
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
	value: RefCell<Option<String>>,
}

impl MemoryStore {
	/// An empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// A store pre-filled with `value`.
	pub fn with_value(value: impl Into<String>) -> Self {
		Self {
			value: RefCell::new(Some(value.into())),
		}
	}

	/// Current raw contents.
	pub fn contents(&self) -> Option<String> {
		self.value.borrow().clone()
	}
}

impl SnapshotStore for MemoryStore {
	fn read(&self) -> Result<Option<String>, SnapshotError> {
		Ok(self.contents())
	}

	fn write(&self, value: &str) -> Result<(), SnapshotError> {
		*self.value.borrow_mut() = Some(value.to_string());
		Ok(())
	}
}

/// Serializes the node list to its snapshot form.
pub fn encode_snapshot(nodes: &[SkillNode]) -> Result<String, SnapshotError> {
	Ok(serde_json::to_string(nodes)?)
}

/// Parses and validates a snapshot.
pub fn decode_snapshot(raw: &str) -> Result<Vec<SkillNode>, SnapshotError> {
	Ok(serde_json::from_str(raw)?)
}

/// Reads the stored node list. Absent, unreadable and malformed all give `None`.
pub fn load_snapshot(store: &dyn SnapshotStore) -> Option<Vec<SkillNode>> {
	let raw = match store.read() {
		Ok(Some(raw)) => raw,
		Ok(None) => {
			debug!("no saved skill tree");
			return None;
		}
		Err(e) => {
			warn!("could not read saved skill tree: {e}");
			return None;
		}
	};
	match decode_snapshot(&raw) {
		Ok(nodes) => Some(nodes),
		Err(e) => {
			warn!("ignoring saved skill tree: {e}");
			None
		}
	}
}

/// Writes the node list, logging and swallowing any failure.
pub fn save_snapshot(store: &dyn SnapshotStore, nodes: &[SkillNode]) {
	let result = encode_snapshot(nodes).and_then(|raw| store.write(&raw));
	match result {
		Ok(()) => debug!("saved {} skills", nodes.len()),
		Err(e) => warn!("skill tree not saved: {e}"),
	}
}

/// Applies `action` and saves the resulting tree. A rejected action writes nothing.
pub fn commit_action(
	store: &dyn SnapshotStore,
	tree: &SkillTree,
	action: &Action,
) -> Result<SkillTree, Rejection> {
	let next = tree.apply(action)?;
	save_snapshot(store, next.nodes());
	Ok(next)
}

/// Builds the starting tree from the store, or the built-in tree when there is
/// no usable snapshot. The budget is recomputed from the restored points.
pub fn restore_tree(store: &dyn SnapshotStore, config: &SkillTreeConfig) -> Result<SkillTree, SnapshotError> {
	if let Some(nodes) = load_snapshot(store) {
		match SkillTree::new(nodes, default_edges(), config.initial_budget) {
			Ok(tree) => {
				info!(
					"restored {} skills, {} of {} points spent",
					tree.nodes().len(),
					tree.allocated(),
					tree.initial_budget()
				);
				return Ok(tree);
			}
			Err(e) => warn!("ignoring saved skill tree: {e}"),
		}
	}
	SkillTree::with_defaults(config.initial_budget)
}
