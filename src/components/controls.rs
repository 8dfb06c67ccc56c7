use leptos::prelude::*;

use crate::skill_tree::{CategoryFilter, NewSkill};

const PANEL_STYLE: &str = "position: absolute; z-index: 1000; color: #fff;";

/// Remaining skill points, top right.
#[component]
pub fn PointsCounter(#[prop(into)] points: Signal<u32>) -> impl IntoView {
	view! {
		<div class="points-counter" style=format!("{PANEL_STYLE} top: 10px; right: 10px;")>
			"Available Skill Points: "
			{move || points.get()}
		</div>
	}
}

/// One button per category, the active one outlined.
#[component]
pub fn CategoryFilterBar(
	categories: Vec<String>,
	#[prop(into)] active: Signal<CategoryFilter>,
	#[prop(into)] on_select: Callback<CategoryFilter>,
) -> impl IntoView {
	let buttons = categories
		.into_iter()
		.map(|category| {
			let filter = CategoryFilter::from(category.as_str());
			let is_active = {
				let filter = filter.clone();
				move || active.get() == filter
			};
			view! {
				<button
					style=move || {
						format!(
							"padding: 5px 10px; border-radius: 5px; border: {}; background: #222; color: #fff; cursor: pointer;",
							if is_active() { "2px solid #fff" } else { "none" },
						)
					}
					on:click=move |_| on_select.run(filter.clone())
				>
					{category}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="category-filter" style=format!("{PANEL_STYLE} top: 10px; left: 10px; display: flex; gap: 5px;")>
			{buttons}
		</div>
	}
}

/// Raw contents of the add-skill form.
#[derive(Clone, Debug, PartialEq)]
struct SkillDraft {
	label: String,
	max_points: String,
	category: String,
}

impl Default for SkillDraft {
	fn default() -> Self {
		Self {
			label: String::new(),
			max_points: "1".to_string(),
			category: String::new(),
		}
	}
}

impl SkillDraft {
	fn to_new_skill(&self) -> NewSkill {
		NewSkill {
			label: self.label.clone(),
			category: self.category.clone(),
			max_points: self.max_points.trim().parse().ok(),
		}
	}

	/// Hands the draft to `accept` and clears the form only if it was taken.
	fn submit(&mut self, accept: impl FnOnce(NewSkill) -> bool) {
		if accept(self.to_new_skill()) {
			*self = Self::default();
		}
	}
}

/// Name / max points / category form. `on_submit` reports whether the skill
/// was added; a refused draft stays in the form.
#[component]
pub fn AddSkillForm(#[prop(into)] on_submit: Callback<NewSkill, bool>) -> impl IntoView {
	let draft = RwSignal::new(SkillDraft::default());

	let submit = move |_: leptos::ev::MouseEvent| {
		draft.update(|d| d.submit(|skill| on_submit.run(skill)));
	};

	view! {
		<div
			class="add-skill"
			style=format!("{PANEL_STYLE} bottom: 10px; left: 10px; background: #222; padding: 10px; border-radius: 8px;")
		>
			<h4>"Add New Skill"</h4>
			<input
				placeholder="Skill Name"
				prop:value=move || draft.with(|d| d.label.clone())
				on:input=move |ev| draft.update(|d| d.label = event_target_value(&ev))
			/>
			<input
				placeholder="Max Points"
				type="number"
				prop:value=move || draft.with(|d| d.max_points.clone())
				on:input=move |ev| draft.update(|d| d.max_points = event_target_value(&ev))
			/>
			<input
				placeholder="Category"
				prop:value=move || draft.with(|d| d.category.clone())
				on:input=move |ev| draft.update(|d| d.category = event_target_value(&ev))
			/>
			<button on:click=submit style="margin-top: 5px;">
				"Add Skill"
			</button>
		</div>
	}
}

/// Why the last action was refused, if it was.
#[component]
pub fn StatusLine(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
	view! {
		<Show when=move || message.get().is_some()>
			<div
				class="status-line"
				style=format!("{PANEL_STYLE} top: 40px; right: 10px; color: #f88;")
			>
				{move || message.get().unwrap_or_default()}
			</div>
		</Show>
	}
}
