//! The built-in tree used when no snapshot is available.

use super::error::SnapshotError;
use super::types::{Position, SkillEdge, SkillId, SkillNode};

/// Icon given to user-added skills.
pub const NEW_SKILL_ICON: &str = "⭐";
/// Color given to user-added skills.
pub const NEW_SKILL_COLOR: &str = "#888";

struct Seed {
	id: &'static str,
	label: &'static str,
	category: &'static str,
	max_points: u32,
	prerequisites: &'static [&'static str],
	icon: &'static str,
	color: &'static str,
	sub_skills: &'static [&'static str],
	position: (f64, f64),
}

const SEEDS: &[Seed] = &[
	Seed {
		id: "1",
		label: "Problem Solving",
		category: "Cognitive",
		max_points: 3,
		prerequisites: &[],
		icon: "🧠",
		color: "#8e44ad",
		sub_skills: &["Analytical Thinking", "Creative Solutions"],
		position: (250.0, 50.0),
	},
	Seed {
		id: "2",
		label: "Time Management",
		category: "Productivity",
		max_points: 2,
		prerequisites: &["1"],
		icon: "⏱️",
		color: "#f39c12",
		sub_skills: &[],
		position: (50.0, 200.0),
	},
	Seed {
		id: "3",
		label: "Critical Thinking",
		category: "Cognitive",
		max_points: 3,
		prerequisites: &["1"],
		icon: "🧠",
		color: "#9b59b6",
		sub_skills: &[],
		position: (250.0, 200.0),
	},
	Seed {
		id: "4",
		label: "Communication",
		category: "Social",
		max_points: 2,
		prerequisites: &["1"],
		icon: "👥",
		color: "#3498db",
		sub_skills: &[],
		position: (450.0, 200.0),
	},
	Seed {
		id: "5",
		label: "Leadership",
		category: "Social",
		max_points: 4,
		prerequisites: &["3", "4"],
		icon: "👥",
		color: "#2ecc71",
		sub_skills: &[],
		position: (250.0, 350.0),
	},
];

const EDGES: &[(&str, &str)] = &[("1", "3"), ("1", "2"), ("1", "4"), ("3", "5"), ("4", "5")];

/// The five starter skills, all at zero points.
pub fn default_nodes() -> Result<Vec<SkillNode>, SnapshotError> {
	SEEDS
		.iter()
		.map(|seed| -> Result<SkillNode, SnapshotError> {
			Ok(SkillNode::new(
				SkillId::new(seed.id),
				seed.label,
				seed.category,
				seed.max_points,
			)?
			.with_prerequisites(seed.prerequisites.iter().copied().map(SkillId::new))
			.with_style(seed.icon, seed.color)
			.with_sub_skills(seed.sub_skills.iter().copied())
			.with_position(Position::new(seed.position.0, seed.position.1)))
		})
		.collect()
}

/// Prerequisite edges between the starter skills.
pub fn default_edges() -> Vec<SkillEdge> {
	EDGES
		.iter()
		.map(|&(source, target)| SkillEdge::new(source, target))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edges_mirror_prerequisites() {
		let nodes = default_nodes().unwrap();
		for edge in default_edges() {
			let target = nodes.iter().find(|n| *n.id() == edge.target).unwrap();
			assert!(target.prerequisites().contains(&edge.source));
		}
		let prereq_count: usize = nodes.iter().map(|n| n.prerequisites().len()).sum();
		assert_eq!(prereq_count, default_edges().len());
	}
}
