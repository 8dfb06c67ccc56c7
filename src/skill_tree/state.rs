use std::collections::HashSet;

use log::debug;

use super::defaults::{NEW_SKILL_COLOR, NEW_SKILL_ICON, default_edges, default_nodes};
use super::error::{Rejection, SnapshotError};
use super::rules;
use super::types::{Action, CategoryFilter, NewSkill, NodeStatus, Position, SkillEdge, SkillId, SkillNode};

/// Immutable snapshot of the whole tree plus the budget it was allocated from.
///
/// Every operation returns a new tree and leaves `self` untouched. The
/// remaining budget is never stored; it is always `initial_budget - allocated`.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillTree {
	nodes: Vec<SkillNode>,
	edges: Vec<SkillEdge>,
	initial_budget: u32,
}

impl SkillTree {
	/// Builds a tree, rejecting duplicate ids and over-allocated node lists.
	///
	/// Edges whose endpoints are not both present are dropped.
	pub fn new(
		nodes: Vec<SkillNode>,
		mut edges: Vec<SkillEdge>,
		initial_budget: u32,
	) -> Result<Self, SnapshotError> {
		let mut seen = HashSet::new();
		for node in &nodes {
			if !seen.insert(node.id()) {
				return Err(SnapshotError::DuplicateId(node.id().clone()));
			}
		}
		let allocated: u64 = nodes.iter().map(|n| u64::from(n.points())).sum();
		if allocated > u64::from(initial_budget) {
			return Err(SnapshotError::OverBudget {
				allocated: u32::try_from(allocated).unwrap_or(u32::MAX),
				budget: initial_budget,
			});
		}
		edges.retain(|edge| seen.contains(&edge.source) && seen.contains(&edge.target));
		Ok(Self {
			nodes,
			edges,
			initial_budget,
		})
	}

	/// The built-in starter tree with nothing allocated.
	pub fn with_defaults(initial_budget: u32) -> Result<Self, SnapshotError> {
		Self::new(default_nodes()?, default_edges(), initial_budget)
	}

	/// All nodes in insertion order.
	pub fn nodes(&self) -> &[SkillNode] {
		&self.nodes
	}

	/// Prerequisite edges between present nodes.
	pub fn edges(&self) -> &[SkillEdge] {
		&self.edges
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &SkillId) -> Option<&SkillNode> {
		self.nodes.iter().find(|n| n.id() == id)
	}

	/// Budget the tree started from.
	pub fn initial_budget(&self) -> u32 {
		self.initial_budget
	}

	/// Points currently spent across all nodes.
	pub fn allocated(&self) -> u32 {
		self.nodes.iter().map(SkillNode::points).sum()
	}

	/// Points still available.
	pub fn budget(&self) -> u32 {
		self.initial_budget.saturating_sub(self.allocated())
	}

	/// Dispatches a user action to the matching transition.
	pub fn apply(&self, action: &Action) -> Result<Self, Rejection> {
		match action {
			Action::Increment(id) => self.increment(id),
			Action::Decrement(id) => self.decrement(id),
			Action::AddSkill(draft) => self.add_node(draft),
		}
	}

	/// Allocates one point to `id`.
	pub fn increment(&self, id: &SkillId) -> Result<Self, Rejection> {
		let (index, node) = self.find(id)?;
		rules::check_increment(&self.nodes, node, self.budget())?;
		debug!("allocating point to {id} ({} -> {})", node.points(), node.points() + 1);
		Ok(self.replace(index, node.with_points(node.points() + 1)))
	}

	/// Refunds one point from `id`. Dependents keep their points.
	pub fn decrement(&self, id: &SkillId) -> Result<Self, Rejection> {
		let (index, node) = self.find(id)?;
		rules::check_decrement(node)?;
		debug!("refunding point from {id} ({} -> {})", node.points(), node.points() - 1);
		Ok(self.replace(index, node.with_points(node.points() - 1)))
	}

	/// Appends a fresh, unallocated skill built from `draft`.
	pub fn add_node(&self, draft: &NewSkill) -> Result<Self, Rejection> {
		let skill = rules::normalize_new_skill(draft)?;
		let id = self.fresh_id();
		let position = scatter(self.nodes.len());
		let node = SkillNode::from_normalized(id.clone(), skill)
			.with_style(NEW_SKILL_ICON, NEW_SKILL_COLOR)
			.with_position(position);
		debug!("adding skill {id} at ({:.0}, {:.0})", position.x, position.y);

		let mut next = self.clone();
		next.nodes.push(node);
		Ok(next)
	}

	/// Nodes passing `filter`, in insertion order.
	pub fn filter_by_category(&self, filter: &CategoryFilter) -> Vec<&SkillNode> {
		self.nodes.iter().filter(|n| filter.matches(n)).collect()
	}

	/// Edges whose endpoints both pass `filter`.
	pub fn visible_edges(&self, filter: &CategoryFilter) -> Vec<&SkillEdge> {
		let visible: HashSet<&SkillId> = self
			.filter_by_category(filter)
			.into_iter()
			.map(SkillNode::id)
			.collect();
		self.edges
			.iter()
			.filter(|e| visible.contains(&e.source) && visible.contains(&e.target))
			.collect()
	}

	/// Distinct categories in first-seen order.
	pub fn categories(&self) -> Vec<&str> {
		let mut seen = Vec::new();
		for node in &self.nodes {
			if !seen.contains(&node.category()) {
				seen.push(node.category());
			}
		}
		seen
	}

	/// Direct prerequisites of `id` that still hold zero points.
	pub fn missing_prerequisites(&self, id: &SkillId) -> Vec<SkillId> {
		self.node(id)
			.map(|node| rules::missing_prerequisites(&self.nodes, node))
			.unwrap_or_default()
	}

	/// Nodes that list `id` as a direct prerequisite.
	pub fn dependents(&self, id: &SkillId) -> Vec<&SkillNode> {
		self.nodes
			.iter()
			.filter(|n| n.prerequisites().contains(id))
			.collect()
	}

	/// Display state of `id`, `None` for an unknown id.
	pub fn status(&self, id: &SkillId) -> Option<NodeStatus> {
		let node = self.node(id)?;
		Some(if node.is_complete() {
			NodeStatus::Completed
		} else if node.points() > 0 {
			NodeStatus::InProgress
		} else if rules::missing_prerequisites(&self.nodes, node).is_empty() {
			NodeStatus::Available
		} else {
			NodeStatus::Locked
		})
	}

	fn find(&self, id: &SkillId) -> Result<(usize, &SkillNode), Rejection> {
		self.nodes
			.iter()
			.enumerate()
			.find(|(_, n)| n.id() == id)
			.ok_or_else(|| Rejection::UnknownSkill(id.clone()))
	}

	fn replace(&self, index: usize, node: SkillNode) -> Self {
		let mut next = self.clone();
		next.nodes[index] = node;
		next
	}

	/// Smallest numeric id above every numeric id in use.
	fn fresh_id(&self) -> SkillId {
		let mut candidate = self
			.nodes
			.iter()
			.filter_map(|n| n.id().as_str().parse::<u64>().ok())
			.max()
			.map_or(1, |max| max.saturating_add(1));
		loop {
			let id = SkillId::new(candidate.to_string());
			if self.node(&id).is_none() {
				return id;
			}
			candidate = candidate.wrapping_add(1);
		}
	}
}

/// Deterministic pseudo-random placement inside `[50, 450) x [50, 350)`.
fn scatter(seed: usize) -> Position {
	Position::new(
		50.0 + 400.0 * rand_simple(seed),
		50.0 + 300.0 * rand_simple(seed.wrapping_mul(7).wrapping_add(3)),
	)
}

/// Simple linear congruential step mapped to `[0, 1)`.
fn rand_simple(seed: usize) -> f64 {
	let x = (seed.wrapping_add(1).wrapping_mul(9301).wrapping_add(49297)) % 233_280;
	(x as f64) / 233_280.0
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tree() -> SkillTree {
		SkillTree::with_defaults(10).unwrap()
	}

	fn id(raw: &str) -> SkillId {
		SkillId::new(raw)
	}

	#[test]
	fn root_fills_to_capacity_then_rejects() {
		let mut t = tree();
		for _ in 0..3 {
			t = t.increment(&id("1")).unwrap();
		}
		assert_eq!(t.node(&id("1")).unwrap().points(), 3);
		assert_eq!(t.budget(), 7);
		assert_eq!(t.increment(&id("1")), Err(Rejection::AtCapacity(id("1"))));
		assert_eq!(t.budget(), 7);
	}

	#[test]
	fn locked_child_rejected_without_change() {
		let t = tree();
		let err = t.increment(&id("2")).unwrap_err();
		assert!(matches!(err, Rejection::LockedPrerequisite { .. }));
		assert_eq!(t.budget(), 10);
		assert_eq!(t.node(&id("2")).unwrap().points(), 0);
	}

	#[test]
	fn child_unlocks_after_one_parent_point() {
		let t = tree().increment(&id("1")).unwrap();
		let t = t.increment(&id("2")).unwrap();
		assert_eq!(t.node(&id("2")).unwrap().points(), 1);
		assert_eq!(t.budget(), 8);
	}

	#[test]
	fn leadership_needs_both_parents() {
		let t = tree()
			.increment(&id("1"))
			.and_then(|t| t.increment(&id("3")))
			.unwrap();
		assert_eq!(
			t.increment(&id("5")),
			Err(Rejection::LockedPrerequisite {
				skill: id("5"),
				missing: vec![id("4")],
			})
		);
		let t = t.increment(&id("4")).unwrap();
		assert!(t.increment(&id("5")).is_ok());
	}

	#[test]
	fn decrement_does_not_cascade() {
		let t = tree()
			.increment(&id("1"))
			.and_then(|t| t.increment(&id("2")))
			.and_then(|t| t.decrement(&id("1")))
			.unwrap();
		assert_eq!(t.node(&id("1")).unwrap().points(), 0);
		assert_eq!(t.node(&id("2")).unwrap().points(), 1);
		assert_eq!(t.budget(), 9);
		// partial unlock stays, but a further point is now blocked
		assert!(matches!(
			t.increment(&id("2")),
			Err(Rejection::LockedPrerequisite { .. })
		));
	}

	#[test]
	fn decrement_at_zero_rejected() {
		assert_eq!(
			tree().decrement(&id("1")),
			Err(Rejection::NothingToRemove(id("1")))
		);
	}

	#[test]
	fn unknown_id_rejected() {
		assert_eq!(
			tree().increment(&id("99")),
			Err(Rejection::UnknownSkill(id("99")))
		);
	}

	#[test]
	fn budget_exhaustion_blocks_increment() {
		let mut t = SkillTree::with_defaults(2).unwrap();
		t = t.increment(&id("1")).unwrap();
		t = t.increment(&id("1")).unwrap();
		assert_eq!(t.budget(), 0);
		assert_eq!(t.increment(&id("1")), Err(Rejection::InsufficientBudget));
	}

	#[test]
	fn transitions_leave_input_untouched() {
		let before = tree();
		let _ = before.increment(&id("1")).unwrap();
		assert_eq!(before, tree());
	}

	#[test]
	fn add_node_rejects_empty_label() {
		let t = tree();
		assert_eq!(t.add_node(&NewSkill::named("")), Err(Rejection::EmptyLabel));
		assert_eq!(t.nodes().len(), 5);
	}

	#[test]
	fn add_node_normalizes_capacity_and_category() {
		let t = tree()
			.add_node(&NewSkill {
				label: "X".to_string(),
				category: String::new(),
				max_points: Some(0),
			})
			.unwrap();
		let added = t.nodes().last().unwrap();
		assert_eq!(added.label(), "X");
		assert_eq!(added.max_points(), 1);
		assert_eq!(added.points(), 0);
		assert_eq!(added.category(), "General");
		assert_eq!(added.icon(), NEW_SKILL_ICON);
		assert!(added.prerequisites().is_empty());
		assert_eq!(t.budget(), 10);
	}

	#[test]
	fn added_ids_are_unique_and_placed_in_bounds() {
		let mut t = tree();
		for i in 0..20 {
			t = t.add_node(&NewSkill::named(format!("Skill {i}"))).unwrap();
		}
		let ids: HashSet<_> = t.nodes().iter().map(SkillNode::id).collect();
		assert_eq!(ids.len(), t.nodes().len());
		for node in t.nodes().iter().skip(5) {
			let Position { x, y } = node.position();
			assert!((50.0..450.0).contains(&x), "x={x}");
			assert!((50.0..350.0).contains(&y), "y={y}");
		}
	}

	#[test]
	fn added_node_is_immediately_available() {
		let t = tree().add_node(&NewSkill::named("Focus")).unwrap();
		let new_id = t.nodes().last().unwrap().id().clone();
		assert_eq!(t.status(&new_id), Some(NodeStatus::Available));
		assert!(t.increment(&new_id).is_ok());
	}

	#[test]
	fn added_node_carries_normalized_draft() {
		let draft = NewSkill {
			label: "  Focus ".to_string(),
			category: " ".to_string(),
			max_points: Some(i64::MAX),
		};
		let t = tree().add_node(&draft).unwrap();
		let node = t.nodes().last().unwrap();
		assert_eq!(node.label(), "Focus");
		assert_eq!(node.category(), "General");
		assert_eq!(node.max_points(), u32::MAX);
		assert_eq!(node.points(), 0);
		assert_eq!((node.icon(), node.color()), (NEW_SKILL_ICON, NEW_SKILL_COLOR));

		let blank = NewSkill::named("   ");
		assert_eq!(tree().add_node(&blank), Err(Rejection::EmptyLabel));
	}

	#[test]
	fn filter_all_and_cognitive() {
		let t = tree();
		assert_eq!(t.filter_by_category(&CategoryFilter::All).len(), 5);
		let labels: Vec<_> = t
			.filter_by_category(&CategoryFilter::from("Cognitive"))
			.into_iter()
			.map(SkillNode::label)
			.collect();
		assert_eq!(labels, ["Problem Solving", "Critical Thinking"]);
		assert!(t.filter_by_category(&CategoryFilter::from("cognitive")).is_empty());
	}

	#[test]
	fn visible_edges_follow_filter() {
		let t = tree();
		assert_eq!(t.visible_edges(&CategoryFilter::All).len(), 5);
		let cognitive = t.visible_edges(&CategoryFilter::from("Cognitive"));
		assert_eq!(cognitive, [&SkillEdge::new("1", "3")]);
		let social = t.visible_edges(&CategoryFilter::from("Social"));
		assert_eq!(social, [&SkillEdge::new("4", "5")]);
		assert!(t.visible_edges(&CategoryFilter::from("Productivity")).is_empty());
	}

	#[test]
	fn status_tracks_allocation() {
		let t = tree();
		assert_eq!(t.status(&id("1")), Some(NodeStatus::Available));
		assert_eq!(t.status(&id("2")), Some(NodeStatus::Locked));
		let t = t.increment(&id("1")).unwrap();
		assert_eq!(t.status(&id("1")), Some(NodeStatus::InProgress));
		assert_eq!(t.status(&id("2")), Some(NodeStatus::Available));
		let t = t.increment(&id("1")).and_then(|t| t.increment(&id("1"))).unwrap();
		assert_eq!(t.status(&id("1")), Some(NodeStatus::Completed));
		assert_eq!(t.status(&id("nope")), None);
	}

	#[test]
	fn dependents_and_categories() {
		let t = tree();
		let deps: Vec<_> = t.dependents(&id("1")).into_iter().map(SkillNode::label).collect();
		assert_eq!(deps, ["Time Management", "Critical Thinking", "Communication"]);
		assert_eq!(t.categories(), ["Cognitive", "Productivity", "Social"]);
	}

	#[test]
	fn new_rejects_duplicates_and_overbudget() {
		let mut nodes = default_nodes().unwrap();
		nodes.push(nodes[0].clone());
		assert!(matches!(
			SkillTree::new(nodes, Vec::new(), 10),
			Err(SnapshotError::DuplicateId(_))
		));

		let nodes: Vec<_> = default_nodes()
			.unwrap()
			.into_iter()
			.map(|n| n.with_points(n.max_points()))
			.collect();
		assert!(matches!(
			SkillTree::new(nodes, Vec::new(), 10),
			Err(SnapshotError::OverBudget { allocated: 14, budget: 10 })
		));
	}

	#[test]
	fn new_drops_dangling_edges() {
		let nodes = default_nodes().unwrap().into_iter().take(2).collect();
		let t = SkillTree::new(nodes, default_edges(), 10).unwrap();
		assert_eq!(t.edges(), [SkillEdge::new("1", "2")]);
	}

	#[test]
	fn apply_dispatches() {
		let t = tree().apply(&Action::Increment(id("1"))).unwrap();
		assert_eq!(t.allocated(), 1);
		let t = t.apply(&Action::Decrement(id("1"))).unwrap();
		assert_eq!(t.allocated(), 0);
		let t = t.apply(&Action::AddSkill(NewSkill::named("Y"))).unwrap();
		assert_eq!(t.nodes().len(), 6);
	}
}
