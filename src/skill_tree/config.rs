/// Budget, storage key and filter buttons for one skill tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillTreeConfig {
	/// Points available before any allocation.
	pub initial_budget: u32,
	/// `localStorage` key holding the snapshot.
	pub storage_key: String,
	/// Filter buttons, in display order. `"All"` shows everything.
	pub categories: Vec<String>,
}

/// Starting skill-point pool.
pub const DEFAULT_BUDGET: u32 = 10;
/// Snapshot key in `localStorage`.
pub const DEFAULT_STORAGE_KEY: &str = "skillTreeProgress";
/// Filter buttons shown by default.
pub const DEFAULT_CATEGORIES: &[&str] = &["All", "Cognitive", "Social", "Productivity"];

impl Default for SkillTreeConfig {
	fn default() -> Self {
		Self {
			initial_budget: DEFAULT_BUDGET,
			storage_key: DEFAULT_STORAGE_KEY.to_string(),
			categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
		}
	}
}
