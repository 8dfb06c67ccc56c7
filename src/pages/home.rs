use leptos::prelude::*;
use log::info;

use crate::components::controls::{AddSkillForm, CategoryFilterBar, PointsCounter, StatusLine};
use crate::components::hover_panel::HoverPanel;
use crate::components::skill_canvas::{CanvasData, SkillCanvas};
use crate::skill_tree::{
	Action, CategoryFilter, LocalStorageStore, NewSkill, SkillId, SkillTree, SkillTreeConfig, commit_action,
	restore_tree,
};

/// Skill tree page: restores the saved tree, then hands it to the editor.
#[component]
pub fn Home(#[prop(default = SkillTreeConfig::default())] config: SkillTreeConfig) -> impl IntoView {
	let store = LocalStorageStore::new(config.storage_key.clone());
	let editor = restore_tree(&store, &config).map(|tree| {
		view! { <SkillTreeEditor tree=tree store=store config=config /> }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>{editor}</ErrorBoundary>
	}
}

/// Owns the live tree. Every accepted action replaces the tree and is saved;
/// a rejected one leaves it alone and shows the reason.
#[component]
fn SkillTreeEditor(tree: SkillTree, store: LocalStorageStore, config: SkillTreeConfig) -> impl IntoView {
	let tree = RwSignal::new(tree);
	let store = StoredValue::new(store);
	let filter = RwSignal::new(CategoryFilter::All);
	let hovered = RwSignal::new(None::<SkillId>);
	let pinned = RwSignal::new(None::<SkillId>);
	let rejection = RwSignal::new(None::<String>);

	// Reports whether the action was accepted
	let dispatch = move |action: Action| -> bool {
		let result = tree.with_untracked(|t| store.with_value(|s| commit_action(s, t, &action)));
		match result {
			Ok(next) => {
				tree.set(next);
				rejection.set(None);
				true
			}
			Err(reason) => {
				info!("{action:?} rejected: {reason}");
				rejection.set(Some(reason.to_string()));
				false
			}
		}
	};

	let canvas_data = Memo::new(move |_| tree.with(|t| filter.with(|f| CanvasData::from_tree(t, f))));
	let budget = Signal::derive(move || tree.with(SkillTree::budget));
	// Pinned wins over hovered; hidden nodes have no panel
	let selected = Signal::derive(move || -> Option<SkillId> {
		let id = pinned.get().or_else(|| hovered.get())?;
		let visible = tree.with(|t| t.node(&id).is_some_and(|n| filter.with(|f| f.matches(n))));
		visible.then_some(id)
	});

	view! {
		<div class="fullscreen-graph" style="width: 100vw; height: 100vh; background: #111; position: relative;">
			<PointsCounter points=budget />
			<StatusLine message=rejection />
			<CategoryFilterBar
				categories=config.categories
				active=filter
				on_select=move |f: CategoryFilter| filter.set(f)
			/>
			<AddSkillForm on_submit={move |draft: NewSkill| dispatch(Action::AddSkill(draft))} />
			<SkillCanvas
				data=canvas_data
				fullscreen=true
				on_hover={move |id: Option<SkillId>| hovered.set(id)}
				on_select=move |id: SkillId| {
					pinned.update(|p| *p = if p.as_ref() == Some(&id) { None } else { Some(id) });
				}
			/>
			<HoverPanel
				tree=tree
				selected=selected
				pinned=Signal::derive(move || pinned.with(Option::is_some))
				on_increment=move |id: SkillId| {
					dispatch(Action::Increment(id));
				}
				on_decrement=move |id: SkillId| {
					dispatch(Action::Decrement(id));
				}
				on_close={move |_: ()| pinned.set(None)}
			/>
		</div>
	}
}
