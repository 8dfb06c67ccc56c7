//! Allocation rules.
//!
//! Every check here is a pure read of the current nodes and budget. The
//! prerequisite test is direct only: a node looks at its own prerequisites'
//! point counts and nothing further up the tree.

use super::error::Rejection;
use super::types::{NewSkill, SkillId, SkillNode};

/// Category given to skills added without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Direct prerequisites of `node` that currently hold zero points.
///
/// An id that names no node counts as unmet.
pub fn missing_prerequisites(nodes: &[SkillNode], node: &SkillNode) -> Vec<SkillId> {
	node.prerequisites()
		.iter()
		.filter(|id| {
			!nodes
				.iter()
				.any(|other| other.id() == *id && other.points() > 0)
		})
		.cloned()
		.collect()
}

/// Checks whether `node` may receive one more point.
///
/// Capacity is checked before budget, and budget before prerequisites.
pub fn check_increment(nodes: &[SkillNode], node: &SkillNode, budget: u32) -> Result<(), Rejection> {
	if node.points() >= node.max_points() {
		return Err(Rejection::AtCapacity(node.id().clone()));
	}
	if budget == 0 {
		return Err(Rejection::InsufficientBudget);
	}
	let missing = missing_prerequisites(nodes, node);
	if !missing.is_empty() {
		return Err(Rejection::LockedPrerequisite {
			skill: node.id().clone(),
			missing,
		});
	}
	Ok(())
}

/// Checks whether `node` may give back one point. Dependents are not consulted.
pub fn check_decrement(node: &SkillNode) -> Result<(), Rejection> {
	if node.points() == 0 {
		return Err(Rejection::NothingToRemove(node.id().clone()));
	}
	Ok(())
}

/// A validated add-skill descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedSkill {
	/// Trimmed, non-empty label.
	pub label: String,
	/// Trimmed category, [`DEFAULT_CATEGORY`] when blank.
	pub category: String,
	/// Capacity, at least 1.
	pub max_points: u32,
}

/// Applies the add-skill defaults, rejecting a blank label.
pub fn normalize_new_skill(draft: &NewSkill) -> Result<NormalizedSkill, Rejection> {
	let label = draft.label.trim();
	if label.is_empty() {
		return Err(Rejection::EmptyLabel);
	}
	let category = match draft.category.trim() {
		"" => DEFAULT_CATEGORY,
		category => category,
	};
	let max_points = draft
		.max_points
		.filter(|&max| max > 0)
		.map(|max| u32::try_from(max).unwrap_or(u32::MAX))
		.unwrap_or(1);
	Ok(NormalizedSkill {
		label: label.to_string(),
		category: category.to_string(),
		max_points,
	})
}
