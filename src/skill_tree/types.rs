use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SnapshotError;
use super::rules::NormalizedSkill;

/// Stable identifier of a skill node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
	/// Wraps a raw identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// The raw identifier.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SkillId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SkillId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// Canvas placement of a node, in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Position {
	/// A position at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A single skill in the tree.
///
/// Fields are private so that `0 <= points <= max_points` and `max_points >= 1`
/// hold for every value; nodes are built through [`SkillNode::new`] or decoded
/// from a [`SkillNodeRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SkillNodeRecord", into = "SkillNodeRecord")]
pub struct SkillNode {
	id: SkillId,
	label: String,
	category: String,
	points: u32,
	max_points: u32,
	prerequisites: Vec<SkillId>,
	icon: String,
	color: String,
	sub_skills: Vec<String>,
	position: Position,
}

impl SkillNode {
	/// A node with zero points and no prerequisites.
	pub fn new(
		id: SkillId,
		label: impl Into<String>,
		category: impl Into<String>,
		max_points: u32,
	) -> Result<Self, SnapshotError> {
		let record = SkillNodeRecord {
			id,
			label: label.into(),
			category: category.into(),
			points: 0,
			max_points,
			prerequisites: Vec::new(),
			icon: String::new(),
			color: String::new(),
			sub_skills: Vec::new(),
			position: Position::default(),
		};
		Self::try_from(record)
	}

	/// An unallocated node from a draft that already passed add-skill
	/// normalisation, so it cannot fail.
	pub(crate) fn from_normalized(id: SkillId, skill: NormalizedSkill) -> Self {
		Self {
			id,
			label: skill.label,
			category: skill.category,
			points: 0,
			max_points: skill.max_points.max(1),
			prerequisites: Vec::new(),
			icon: String::new(),
			color: String::new(),
			sub_skills: Vec::new(),
			position: Position::default(),
		}
	}

	/// Sets the direct prerequisites.
	pub fn with_prerequisites(mut self, prerequisites: impl IntoIterator<Item = SkillId>) -> Self {
		self.prerequisites = prerequisites.into_iter().collect();
		self
	}

	/// Sets icon and color.
	pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
		self.icon = icon.into();
		self.color = color.into();
		self
	}

	/// Sets the descriptive sub-skills.
	pub fn with_sub_skills<S: Into<String>>(mut self, sub_skills: impl IntoIterator<Item = S>) -> Self {
		self.sub_skills = sub_skills.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the initial canvas placement.
	pub fn with_position(mut self, position: Position) -> Self {
		self.position = position;
		self
	}

	/// Node id.
	pub fn id(&self) -> &SkillId {
		&self.id
	}

	/// Display name.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Filter category.
	pub fn category(&self) -> &str {
		&self.category
	}

	/// Allocated points.
	pub fn points(&self) -> u32 {
		self.points
	}

	/// Capacity, at least 1.
	pub fn max_points(&self) -> u32 {
		self.max_points
	}

	/// Direct prerequisites, in declaration order.
	pub fn prerequisites(&self) -> &[SkillId] {
		&self.prerequisites
	}

	/// Icon glyph.
	pub fn icon(&self) -> &str {
		&self.icon
	}

	/// CSS color of the disc.
	pub fn color(&self) -> &str {
		&self.color
	}

	/// Descriptive sub-skills.
	pub fn sub_skills(&self) -> &[String] {
		&self.sub_skills
	}

	/// Initial canvas placement.
	pub fn position(&self) -> Position {
		self.position
	}

	/// Every point is allocated.
	pub fn is_complete(&self) -> bool {
		self.points == self.max_points
	}

	/// Allocated fraction in `[0, 1]`.
	pub fn progress(&self) -> f64 {
		f64::from(self.points) / f64::from(self.max_points)
	}

	pub(crate) fn with_points(&self, points: u32) -> Self {
		debug_assert!(points <= self.max_points);
		Self {
			points,
			..self.clone()
		}
	}
}

/// Wire shape of a [`SkillNode`] inside a persisted snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNodeRecord {
	/// Node id.
	pub id: SkillId,
	/// Display name.
	pub label: String,
	/// Filter category.
	pub category: String,
	/// Allocated points.
	pub points: u32,
	/// Capacity.
	pub max_points: u32,
	/// Direct prerequisites.
	#[serde(default)]
	pub prerequisites: Vec<SkillId>,
	/// Icon glyph.
	#[serde(default)]
	pub icon: String,
	/// CSS color.
	#[serde(default)]
	pub color: String,
	/// Descriptive sub-skills.
	#[serde(default)]
	pub sub_skills: Vec<String>,
	/// Canvas placement.
	#[serde(default)]
	pub position: Position,
}

impl TryFrom<SkillNodeRecord> for SkillNode {
	type Error = SnapshotError;

	fn try_from(record: SkillNodeRecord) -> Result<Self, Self::Error> {
		let invalid = |reason: &str| SnapshotError::InvalidNode {
			id: record.id.clone(),
			reason: reason.to_string(),
		};
		if record.id.as_str().is_empty() {
			return Err(invalid("empty id"));
		}
		if record.max_points == 0 {
			return Err(invalid("maxPoints must be at least 1"));
		}
		if record.points > record.max_points {
			return Err(invalid("points exceed maxPoints"));
		}
		Ok(Self {
			id: record.id,
			label: record.label,
			category: record.category,
			points: record.points,
			max_points: record.max_points,
			prerequisites: record.prerequisites,
			icon: record.icon,
			color: record.color,
			sub_skills: record.sub_skills,
			position: record.position,
		})
	}
}

impl From<SkillNode> for SkillNodeRecord {
	fn from(node: SkillNode) -> Self {
		Self {
			id: node.id,
			label: node.label,
			category: node.category,
			points: node.points,
			max_points: node.max_points,
			prerequisites: node.prerequisites,
			icon: node.icon,
			color: node.color,
			sub_skills: node.sub_skills,
			position: node.position,
		}
	}
}

/// Directed prerequisite edge, `source` unlocks `target`. Rendering only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEdge {
	/// The prerequisite.
	pub source: SkillId,
	/// The dependent.
	pub target: SkillId,
}

impl SkillEdge {
	/// An edge from `source` to `target`.
	pub fn new(source: impl Into<SkillId>, target: impl Into<SkillId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// Descriptor submitted by the add-skill form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewSkill {
	/// Required display name.
	pub label: String,
	/// Category, `"General"` when blank.
	pub category: String,
	/// Capacity; unset or non-positive means 1.
	pub max_points: Option<i64>,
}

impl NewSkill {
	/// A descriptor with the given label and defaults elsewhere.
	pub fn named(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			..Self::default()
		}
	}
}

/// Resolved display state of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeStatus {
	/// No points and at least one prerequisite still empty.
	#[default]
	Locked,
	/// No points, every prerequisite satisfied.
	Available,
	/// Some but not all points allocated.
	InProgress,
	/// `points == max_points`.
	Completed,
}

/// Node subset selected by the category filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
	/// Every node.
	#[default]
	All,
	/// Nodes whose category matches exactly.
	Only(String),
}

impl CategoryFilter {
	/// Label of the catch-all filter.
	pub const ALL: &'static str = "All";

	/// Whether `node` passes the filter.
	pub fn matches(&self, node: &SkillNode) -> bool {
		match self {
			Self::All => true,
			Self::Only(category) => node.category() == category,
		}
	}

	/// Button label for this filter.
	pub fn label(&self) -> &str {
		match self {
			Self::All => Self::ALL,
			Self::Only(category) => category,
		}
	}
}

impl From<&str> for CategoryFilter {
	fn from(category: &str) -> Self {
		if category == Self::ALL {
			Self::All
		} else {
			Self::Only(category.to_string())
		}
	}
}

/// User gesture that changes the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
	/// Allocate one point.
	Increment(SkillId),
	/// Refund one point.
	Decrement(SkillId),
	/// Append a new skill.
	AddSkill(NewSkill),
}
