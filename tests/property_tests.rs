//! Invariants that must hold after any sequence of user actions.

use proptest::prelude::*;
use skill_tree_canvas::skill_tree::{
	Action, MemoryStore, NewSkill, SkillId, SkillTree, commit_action, decode_snapshot,
	encode_snapshot, load_snapshot, save_snapshot,
};

const BUDGET: u32 = 10;

fn action() -> impl Strategy<Value = Action> {
	prop_oneof![
		4 => (1u8..=8).prop_map(|n| Action::Increment(SkillId::new(n.to_string()))),
		2 => (1u8..=8).prop_map(|n| Action::Decrement(SkillId::new(n.to_string()))),
		1 => ("[a-z ]{0,6}", -2i64..5).prop_map(|(label, max)| Action::AddSkill(NewSkill {
			label,
			category: String::new(),
			max_points: Some(max),
		})),
	]
}

/// Applies every action, keeping the last accepted tree.
fn run(actions: &[Action]) -> Vec<(SkillTree, Result<SkillTree, ()>)> {
	let mut tree = SkillTree::with_defaults(BUDGET).expect("defaults");
	let mut steps = Vec::new();
	for action in actions {
		let result = tree.apply(action).map_err(|_| ());
		steps.push((tree.clone(), result.clone()));
		if let Ok(next) = result {
			tree = next;
		}
	}
	steps
}

proptest! {
	/// Points stay within capacity and the budget balances.
	#[test]
	fn points_and_budget_stay_consistent(actions in proptest::collection::vec(action(), 0..60)) {
		for (_, result) in run(&actions) {
			if let Ok(tree) = result {
				for node in tree.nodes() {
					prop_assert!(node.points() <= node.max_points());
					prop_assert!(node.max_points() >= 1);
				}
				prop_assert_eq!(tree.budget() + tree.allocated(), BUDGET);
			}
		}
	}

	/// An accepted increment touches exactly one node by exactly one point.
	#[test]
	fn increment_changes_only_its_target(actions in proptest::collection::vec(action(), 0..60)) {
		for ((before, result), action) in run(&actions).into_iter().zip(&actions) {
			let (Action::Increment(id), Ok(after)) = (action, result) else {
				continue;
			};
			for (old, new) in before.nodes().iter().zip(after.nodes()) {
				if old.id() == id {
					prop_assert_eq!(new.points(), old.points() + 1);
					for prereq in old.prerequisites() {
						let p = before.node(prereq).expect("prerequisite exists");
						prop_assert!(p.points() > 0);
					}
				} else {
					prop_assert_eq!(new, old);
				}
			}
			prop_assert_eq!(after.budget() + 1, before.budget());
		}
	}

	/// Decrement never cascades.
	#[test]
	fn decrement_changes_only_its_target(actions in proptest::collection::vec(action(), 0..60)) {
		for ((before, result), action) in run(&actions).into_iter().zip(&actions) {
			let (Action::Decrement(id), Ok(after)) = (action, result) else {
				continue;
			};
			for (old, new) in before.nodes().iter().zip(after.nodes()) {
				if old.id() == id {
					prop_assert_eq!(new.points() + 1, old.points());
				} else {
					prop_assert_eq!(new, old);
				}
			}
		}
	}

	/// Only accepted actions reach the store, and the store always holds the live tree.
	#[test]
	fn rejected_actions_are_never_saved(actions in proptest::collection::vec(action(), 0..60)) {
		let store = MemoryStore::new();
		let mut tree = SkillTree::with_defaults(BUDGET).expect("defaults");
		for action in &actions {
			let saved = store.contents();
			match commit_action(&store, &tree, action) {
				Ok(next) => {
					prop_assert_eq!(store.contents(), Some(encode_snapshot(next.nodes()).expect("encode")));
					tree = next;
				}
				Err(_) => {
					prop_assert_eq!(store.contents(), saved);
				}
			}
		}
	}

	/// Whatever the tree looks like, saving and loading reproduces it.
	#[test]
	fn snapshot_round_trips(actions in proptest::collection::vec(action(), 0..40)) {
		let tree = run(&actions)
			.into_iter()
			.filter_map(|(_, r)| r.ok())
			.last()
			.unwrap_or_else(|| SkillTree::with_defaults(BUDGET).expect("defaults"));

		let store = MemoryStore::new();
		save_snapshot(&store, tree.nodes());
		prop_assert_eq!(load_snapshot(&store).expect("load"), tree.nodes());

		let raw = encode_snapshot(tree.nodes()).expect("encode");
		prop_assert_eq!(decode_snapshot(&raw).expect("decode"), tree.nodes());
	}
}
