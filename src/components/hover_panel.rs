use leptos::prelude::*;

use crate::skill_tree::{SkillId, SkillNode, SkillTree};

fn list_or_none(items: Vec<String>) -> String {
	if items.is_empty() {
		"None".to_string()
	} else {
		items.join(", ")
	}
}

/// Detail card for the hovered or pinned skill, with +/- controls.
#[component]
pub fn HoverPanel(
	#[prop(into)] tree: Signal<SkillTree>,
	#[prop(into)] selected: Signal<Option<SkillId>>,
	#[prop(into)] pinned: Signal<bool>,
	#[prop(into)] on_increment: Callback<SkillId>,
	#[prop(into)] on_decrement: Callback<SkillId>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	let node = Memo::new(move |_| -> Option<SkillNode> {
		let id = selected.get()?;
		tree.with(|t| t.node(&id).cloned())
	});

	move || {
		node.get().map(|node| {
			let id = node.id().clone();
			let (inc_id, dec_id) = (id.clone(), id.clone());
			let prerequisites = tree.with(|t| {
				node.prerequisites()
					.iter()
					.map(|p| t.node(p).map_or_else(|| p.to_string(), |n| n.label().to_string()))
					.collect::<Vec<_>>()
			});
			let unlocks = tree.with(|t| {
				t.dependents(&id)
					.into_iter()
					.map(|n| n.label().to_string())
					.collect::<Vec<_>>()
			});

			view! {
				<div
					class="hover-panel"
					style="position: absolute; top: 60px; right: 10px; background: #222; padding: 15px; border-radius: 10px; width: 260px; color: #fff; box-shadow: 0 0 15px rgba(0,0,0,0.7); z-index: 1000;"
				>
					<div style="display: flex; align-items: center; gap: 8px;">
						{node.icon().to_string()}
						<strong>{node.label().to_string()}</strong>
						<Show when=move || pinned.get()>
							<button style="margin-left: auto;" on:click=move |_| on_close.run(())>
								"×"
							</button>
						</Show>
					</div>
					<p>"Category: " {node.category().to_string()}</p>
					<p>"Points: " {node.points()} " / " {node.max_points()}</p>
					<p>"Sub-skills: " {list_or_none(node.sub_skills().to_vec())}</p>
					<p>"Prerequisites: " {list_or_none(prerequisites)}</p>
					<p>"Unlocks: " {list_or_none(unlocks)}</p>
					<div style="margin-top: 8px; display: flex; gap: 5px;">
						<button on:click=move |_| on_increment.run(inc_id.clone())>"+"</button>
						<button on:click=move |_| on_decrement.run(dec_id.clone())>"-"</button>
					</div>
				</div>
			}
		})
	}
}
