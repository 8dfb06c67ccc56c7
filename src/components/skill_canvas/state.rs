use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::CanvasData;
use crate::skill_tree::{NodeStatus, SkillId};

pub const NODE_RADIUS: f64 = 18.0;
pub const HIT_RADIUS: f64 = 22.0;
pub const GRID_GAP: f64 = 20.0;
pub const MINIMAP_WIDTH: f64 = 160.0;
pub const MINIMAP_HEIGHT: f64 = 110.0;
/// Pointer travel below which a press-release counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: SkillId,
	pub label: String,
	pub color: String,
	pub status: NodeStatus,
	pub progress: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Bounding box of all nodes in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

pub struct SkillCanvasState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	ids: HashMap<SkillId, DefaultNodeIdx>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl SkillCanvasState {
	pub fn new(data: &CanvasData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			edges: Vec::new(),
			ids: HashMap::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.load(data, &HashMap::new());
		if let Some(b) = state.bounds() {
			state.transform.x = width / 2.0 - (b.min_x + b.max_x) / 2.0;
			state.transform.y = height / 2.0 - (b.min_y + b.max_y) / 2.0;
		}
		state
	}

	/// Replaces the displayed nodes, keeping the view and any dragged positions.
	pub fn sync(&mut self, data: &CanvasData) {
		let mut placed = HashMap::new();
		self.graph.visit_nodes(|node| {
			placed.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		let hovered = self.hover.node.and_then(|idx| self.node_id(idx));
		let highlight_t = self.hover.highlight_t;

		self.graph = simulation();
		self.edges.clear();
		self.ids.clear();
		self.hover = HoverState::default();
		self.drag = DragState::default();
		self.load(data, &placed);

		if let Some(idx) = hovered.and_then(|id| self.ids.get(&id).copied()) {
			self.set_hover(Some(idx));
			self.hover.highlight_t = highlight_t;
		}
	}

	fn load(&mut self, data: &CanvasData, placed: &HashMap<SkillId, (f32, f32)>) {
		for node in &data.nodes {
			let (x, y) = placed
				.get(&node.id)
				.copied()
				.unwrap_or((node.x as f32, node.y as f32));
			// Anchored: stored positions are the layout
			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: true,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: if node.icon.is_empty() {
						node.label.clone()
					} else {
						format!("{} {}", node.icon, node.label)
					},
					color: node.color.clone(),
					status: node.status,
					progress: f64::from(node.points) / f64::from(node.max_points.max(1)),
				},
			});
			self.ids.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (self.ids.get(&link.source), self.ids.get(&link.target)) {
				self.graph.add_edge(src, tgt, EdgeData::default());
				self.edges.push((src, tgt));
			}
		}
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<SkillId> {
		self.ids
			.iter()
			.find(|&(_, &i)| i == idx)
			.map(|(id, _)| id.clone())
	}

	pub fn bounds(&self) -> Option<Bounds> {
		let mut bounds: Option<Bounds> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => Bounds {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			});
		});
		bounds
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Returns true when the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover.node == node {
			return false;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
		true
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
