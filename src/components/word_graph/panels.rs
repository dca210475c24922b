//! HTML overlays around the canvas: word dialog, detail card, word list
//! with search, and camera buttons. All of them read and drive the editor
//! through a [`WordGraphHandle`].

use leptos::prelude::*;
use web_sys::{Event, KeyboardEvent, MouseEvent, SubmitEvent};

use super::component::WordGraphHandle;
use super::events::CanvasEvent;
use super::interaction::DraftField;
use super::types::{PARTS_OF_SPEECH, WordData, pos_chip_style};

fn chip(pos: &str) -> impl IntoView + use<> {
	let style = pos_chip_style(pos);
	view! {
		<span
			class="pos-chip"
			style=format!(
				"background: {}; color: {}; border: 1px solid {};",
				style.background,
				style.text,
				style.border,
			)
		>
			{pos.to_string()}
		</span>
	}
}

/// Creation / edit dialog, shown while a draft is open.
#[component]
pub fn WordDialog(handle: WordGraphHandle) -> impl IntoView {
	let dialog = move || {
		handle.with(|s| {
			s.interaction
				.draft()
				.cloned()
				.map(|draft| (draft, s.interaction.editing().is_some()))
		})
	};

	let field = move |field: DraftField| {
		move |ev: Event| {
			let value = event_target_value(&ev);
			handle.update(|s| s.edit_draft(field, &value));
		}
	};

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		handle.update(|s| s.confirm_dialog());
	};
	let on_cancel = move |_: MouseEvent| {
		handle.update(|s| s.cancel_dialog());
	};

	move || {
		dialog().map(|(draft, editing)| {
			let pos = draft.part_of_speech.clone();
			view! {
				<div class="dialog-backdrop" on:click=on_cancel>
					<form
						class="word-dialog"
						on:submit=on_submit
						on:click=|ev: MouseEvent| ev.stop_propagation()
					>
						<h2>{if editing { "단어 노드 수정" } else { "새 단어 노드 추가" }}</h2>
						<input
							placeholder="단어"
							autofocus=true
							prop:value=draft.word
							on:input=field(DraftField::Word)
						/>
						<input
							placeholder="뜻"
							prop:value=draft.meaning
							on:input=field(DraftField::Meaning)
						/>
						<select on:change=field(DraftField::PartOfSpeech)>
							{PARTS_OF_SPEECH
								.iter()
								.map(|p| {
									view! {
										<option value=*p selected={pos == *p}>
											{*p}
										</option>
									}
								})
								.collect_view()}
						</select>
						<input
							placeholder="예문 (선택)"
							prop:value=draft.example
							on:input=field(DraftField::Example)
						/>
						<button type="submit" class="primary">
							{if editing { "수정" } else { "추가" }}
						</button>
						<button type="button" class="secondary" on:click=on_cancel>
							"취소"
						</button>
					</form>
				</div>
			}
		})
	}
}

/// Card for the selected node with edit and delete affordances.
#[component]
pub fn DetailPanel(handle: WordGraphHandle) -> impl IntoView {
	let selected = move || handle.with(|s| s.selected_node().cloned());

	move || {
		selected().map(|node| {
			let WordData {
				word,
				meaning,
				part_of_speech,
				example,
			} = node.data.clone();
			let (edit_id, delete_id) = (node.id.clone(), node.id.clone());
			let data = node.data;
			view! {
				<aside class="detail-panel">
					<h3>{word}</h3>
					<div class="detail-meaning">{chip(&part_of_speech)} <span>{meaning}</span></div>
					{example
						.map(|ex| {
							view! {
								<div class="detail-example">
									<span class="label">"예문"</span>
									<p>{ex}</p>
								</div>
							}
						})}
					<div class="detail-actions">
						<button
							title="이 단어 수정"
							on:click=move |_| {
								let event = CanvasEvent::NodeEdit {
									node_id: edit_id.clone(),
									data: data.clone(),
								};
								handle.update(|s| s.dispatch(event));
							}
						>
							"수정"
						</button>
						<button
							class="danger"
							title="이 단어 삭제"
							on:click=move |_| {
								let event = CanvasEvent::NodeDelete {
									node_id: delete_id.clone(),
								};
								handle.update(|s| s.dispatch(event));
							}
						>
							"삭제"
						</button>
					</div>
				</aside>
			}
		})
	}
}

struct Row {
	id: String,
	word: String,
	meaning: String,
	part_of_speech: String,
	checked: bool,
}

/// Word list with search box, per-row checkboxes and batch delete.
#[component]
pub fn Sidebar(handle: WordGraphHandle) -> impl IntoView {
	let query = move || handle.with(|s| s.search.query().to_string());
	let on_input = move |ev: Event| {
		let value = event_target_value(&ev);
		handle.update(|s| s.set_search_query(&value));
	};
	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			ev.prevent_default();
			handle.update(|s| s.pick_first_result());
		}
	};

	let suggestions = move || {
		let (open, results) = handle.with(|s| {
			let results = s
				.search
				.results()
				.iter()
				.map(|r| {
					(
						r.node.id.clone(),
						r.highlighted.to_markup(),
						r.node.data.meaning.clone(),
					)
				})
				.collect::<Vec<_>>();
			(s.search.is_open(), results)
		});
		open.then(|| {
			view! {
				<ul class="search-results">
					{results
						.into_iter()
						.map(|(id, markup, meaning)| {
							view! {
								<li on:mousedown=move |_| {
									handle.update(|s| s.pick_node(&id));
								}>
									<span class="search-word" inner_html=markup></span>
									<span class="search-meaning">{meaning}</span>
								</li>
							}
						})
						.collect_view()}
				</ul>
			}
		})
	};

	let rows = move || {
		handle.with(|s| {
			s.store
				.nodes()
				.iter()
				.map(|n| Row {
					id: n.id.clone(),
					word: n.data.word.clone(),
					meaning: n.data.meaning.clone(),
					part_of_speech: n.data.part_of_speech.clone(),
					checked: s.interaction.is_checked(&n.id),
				})
				.collect::<Vec<_>>()
		})
	};
	let count = move || handle.with(|s| s.store.nodes().len());
	let checked = move || handle.with(|s| s.checked().len());

	view! {
		<aside class="sidebar">
			<h2>"단어 리스트"</h2>
			<div class="search">
				<input
					type="search"
					placeholder="단어 검색..."
					prop:value=query
					on:input=on_input
					on:keydown=on_keydown
				/>
				{suggestions}
			</div>
			<p class="node-count">{move || format!("{}개 단어", count())}</p>
			<ul class="node-list">
				{move || {
					rows()
						.into_iter()
						.map(|row| {
							let (pick_id, check_id) = (row.id.clone(), row.id);
							view! {
								<li on:click=move |_| {
									handle.update(|s| s.pick_node(&pick_id));
								}>
									<input
										type="checkbox"
										prop:checked=row.checked
										on:click=|ev: MouseEvent| ev.stop_propagation()
										on:change=move |_| {
											handle.update(|s| s.toggle_checked(&check_id));
										}
									/>
									<span class="node-word">{row.word}</span>
									{chip(&row.part_of_speech)}
									<span class="node-meaning">{row.meaning}</span>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
			<button
				class="danger"
				disabled=move || checked() == 0
				title=move || format!("선택된 {}개 단어 삭제", checked())
				on:click=move |_| {
					handle.update(|s| s.delete_checked());
				}
			>
				{move || format!("선택 삭제 ({})", checked())}
			</button>
		</aside>
	}
}

/// Zoom and fit buttons in the canvas corner.
#[component]
pub fn CanvasControls(handle: WordGraphHandle) -> impl IntoView {
	view! {
		<div class="canvas-controls">
			<button title="확대" on:click=move |_| {
				handle.update(|s| s.zoom_in());
			}>"+"</button>
			<button title="축소" on:click=move |_| {
				handle.update(|s| s.zoom_out());
			}>"−"</button>
			<button title="전체 보기" on:click=move |_| {
				handle.update(|s| s.fit_view());
			}>"⤢"</button>
		</div>
	}
}
