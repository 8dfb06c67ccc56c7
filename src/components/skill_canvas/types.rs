use crate::skill_tree::{CategoryFilter, NodeStatus, SkillId, SkillTree};

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasNode {
	pub id: SkillId,
	pub label: String,
	pub icon: String,
	pub color: String,
	pub x: f64,
	pub y: f64,
	pub points: u32,
	pub max_points: u32,
	pub status: NodeStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasLink {
	pub source: SkillId,
	pub target: SkillId,
}

/// Render-ready view of the visible part of a tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasData {
	pub nodes: Vec<CanvasNode>,
	pub links: Vec<CanvasLink>,
}

impl CanvasData {
	pub fn from_tree(tree: &SkillTree, filter: &CategoryFilter) -> Self {
		let nodes = tree
			.filter_by_category(filter)
			.into_iter()
			.map(|node| CanvasNode {
				id: node.id().clone(),
				label: node.label().to_string(),
				icon: node.icon().to_string(),
				color: node.color().to_string(),
				x: node.position().x,
				y: node.position().y,
				points: node.points(),
				max_points: node.max_points(),
				status: tree.status(node.id()).unwrap_or(NodeStatus::Locked),
			})
			.collect();
		let links = tree
			.visible_edges(filter)
			.into_iter()
			.map(|edge| CanvasLink {
				source: edge.source.clone(),
				target: edge.target.clone(),
			})
			.collect();
		Self { nodes, links }
	}
}
