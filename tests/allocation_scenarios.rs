//! End-to-end allocation scenarios against the built-in tree.

use skill_tree_canvas::skill_tree::{
	Action, CategoryFilter, MemoryStore, NewSkill, Rejection, SkillId, SkillTree, SkillTreeConfig,
	load_snapshot, restore_tree, save_snapshot,
};

fn id(raw: &str) -> SkillId {
	SkillId::new(raw)
}

fn default_tree() -> SkillTree {
	SkillTree::with_defaults(10).expect("default tree")
}

#[test]
fn root_caps_at_three_with_budget_seven() {
	let mut tree = default_tree();
	for _ in 0..3 {
		tree = tree.apply(&Action::Increment(id("1"))).expect("increment");
	}
	let rejected = tree.apply(&Action::Increment(id("1")));

	assert_eq!(rejected, Err(Rejection::AtCapacity(id("1"))));
	assert_eq!(tree.node(&id("1")).expect("node").points(), 3);
	assert_eq!(tree.budget(), 7);
}

#[test]
fn child_before_root_is_locked() {
	let tree = default_tree();
	let rejected = tree.apply(&Action::Increment(id("2")));

	assert!(matches!(rejected, Err(Rejection::LockedPrerequisite { .. })));
	assert_eq!(tree.budget(), 10);
	assert_eq!(tree.node(&id("2")).expect("node").points(), 0);
}

#[test]
fn spending_the_whole_budget() {
	let mut tree = default_tree();
	let plan = ["1", "1", "1", "3", "3", "3", "4", "4", "5", "5"];
	for skill in plan {
		tree = tree.increment(&id(skill)).expect("increment");
	}
	assert_eq!(tree.budget(), 0);
	assert_eq!(tree.allocated(), 10);
	assert_eq!(tree.increment(&id("2")), Err(Rejection::InsufficientBudget));

	let tree = tree.decrement(&id("5")).expect("decrement");
	assert_eq!(tree.budget(), 1);
	assert!(tree.increment(&id("2")).is_ok());
}

#[test]
fn refunding_a_prerequisite_keeps_dependents() {
	let tree = default_tree()
		.increment(&id("1"))
		.and_then(|t| t.increment(&id("3")))
		.and_then(|t| t.increment(&id("4")))
		.and_then(|t| t.increment(&id("5")))
		.and_then(|t| t.decrement(&id("3")))
		.and_then(|t| t.decrement(&id("1")))
		.expect("sequence");

	assert_eq!(tree.node(&id("4")).expect("node").points(), 1);
	assert_eq!(tree.node(&id("5")).expect("node").points(), 1);
	assert_eq!(tree.budget(), 8);
}

#[test]
fn added_skill_joins_filter_and_snapshot() {
	let tree = default_tree()
		.apply(&Action::AddSkill(NewSkill {
			label: "Negotiation".to_string(),
			category: "Social".to_string(),
			max_points: Some(2),
		}))
		.expect("add");
	let social: Vec<_> = tree
		.filter_by_category(&CategoryFilter::from("Social"))
		.into_iter()
		.map(|n| n.label().to_string())
		.collect();
	assert_eq!(social, ["Communication", "Leadership", "Negotiation"]);

	let store = MemoryStore::new();
	save_snapshot(&store, tree.nodes());
	let restored = restore_tree(&store, &SkillTreeConfig::default()).expect("restore");
	assert_eq!(restored.nodes(), tree.nodes());
}

#[test]
fn empty_label_changes_nothing() {
	let tree = default_tree();
	assert_eq!(
		tree.apply(&Action::AddSkill(NewSkill::default())),
		Err(Rejection::EmptyLabel)
	);
	assert_eq!(tree.nodes().len(), 5);
}

#[test]
fn snapshot_is_a_camel_case_node_array() {
	let store = MemoryStore::new();
	let tree = default_tree().increment(&id("1")).expect("increment");
	save_snapshot(&store, tree.nodes());

	let raw = store.contents().expect("saved");
	let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
	let first = &json.as_array().expect("array")[0];
	assert_eq!(first["id"], "1");
	assert_eq!(first["points"], 1);
	assert_eq!(first["maxPoints"], 3);
	assert_eq!(first["subSkills"][1], "Creative Solutions");
	assert_eq!(json[4]["prerequisites"], serde_json::json!(["3", "4"]));

	assert_eq!(load_snapshot(&store).expect("load"), tree.nodes());
}
