use thiserror::Error;

use super::types::SkillId;

/// Why an allocation or add-skill action was refused.
///
/// A rejected action leaves the tree untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
	/// No node carries the requested id.
	#[error("no skill with id {0}")]
	UnknownSkill(SkillId),

	/// The global pool has no points left.
	#[error("no skill points left")]
	InsufficientBudget,

	/// At least one direct prerequisite has zero points.
	#[error("{skill} needs a point in {} first", join(.missing))]
	LockedPrerequisite {
		/// The node being incremented.
		skill: SkillId,
		/// Prerequisites still at zero.
		missing: Vec<SkillId>,
	},

	/// The node already holds `max_points`.
	#[error("{0} is already maxed out")]
	AtCapacity(SkillId),

	/// Decrement on a node with zero points.
	#[error("{0} has no points to remove")]
	NothingToRemove(SkillId),

	/// Add-skill without a name.
	#[error("a new skill needs a name")]
	EmptyLabel,
}

/// Failures at the persistence boundary and while validating a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
	/// The backing store could not be reached.
	#[error("storage unavailable: {0}")]
	StorageUnavailable(String),

	/// The backing store refused the write.
	#[error("storage write failed: {0}")]
	WriteFailed(String),

	/// The stored value is not a valid node list.
	#[error("malformed snapshot: {0}")]
	Malformed(#[from] serde_json::Error),

	/// A node record violates its own constraints.
	#[error("invalid skill {id}: {reason}")]
	InvalidNode {
		/// Offending node.
		id: SkillId,
		/// Broken constraint.
		reason: String,
	},

	/// Two nodes share an id.
	#[error("duplicate skill id {0}")]
	DuplicateId(SkillId),

	/// More points are allocated than the budget allows.
	#[error("snapshot allocates {allocated} points but the budget is {budget}")]
	OverBudget {
		/// Sum of allocated points.
		allocated: u32,
		/// Initial budget.
		budget: u32,
	},
}

fn join(ids: &[SkillId]) -> String {
	ids.iter()
		.map(SkillId::as_str)
		.collect::<Vec<_>>()
		.join(", ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn locked_message_lists_missing_prerequisites() {
		let rejection = Rejection::LockedPrerequisite {
			skill: SkillId::new("5"),
			missing: vec![SkillId::new("3"), SkillId::new("4")],
		};
		assert_eq!(rejection.to_string(), "5 needs a point in 3, 4 first");
	}
}
