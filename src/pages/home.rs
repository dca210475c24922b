use leptos::prelude::*;
use log::warn;
use web_sys::SubmitEvent;

use crate::components::word_graph::{
	CanvasControls, DetailPanel, EditorConfig, GraphData, Sidebar, WordDialog, WordGraphCanvas,
	WordGraphHandle, WordGraphState,
};
use crate::services::{AuthSession, LocalSession, LocalStorageRepository, NetworkSync, UserIdentity};

fn non_empty(s: String) -> Option<String> {
	let s = s.trim().to_string();
	(!s.is_empty()).then_some(s)
}

/// Starts a local session from a display name and optional email.
#[component]
fn SignInPrompt(on_sign_in: Callback<UserIdentity>) -> impl IntoView {
	let name = RwSignal::new(String::new());
	let email = RwSignal::new(String::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let identity = UserIdentity {
			id: uuid::Uuid::new_v4().to_string(),
			email: non_empty(email.get_untracked()),
			username: None,
			name: non_empty(name.get_untracked()),
		};
		on_sign_in.run(identity);
	};

	view! {
		<div class="sign-in">
			<form on:submit=on_submit>
				<h1>"Word Graph"</h1>
				<p class="subtitle">"단어를 연결해 나만의 어휘 네트워크를 만들어 보세요."</p>
				<input placeholder="이름" bind:value=name />
				<input type="email" placeholder="이메일 (선택)" bind:value=email />
				<button type="submit" class="primary">"시작하기"</button>
			</form>
		</div>
	}
}

/// Header plus the editor for one user's default network.
#[component]
fn Workspace(user: UserIdentity, on_sign_out: Callback<()>) -> impl IntoView {
	let network_id = format!("{}-default", user.id);
	let mut state = WordGraphState::new(GraphData::sample(), 800.0, 600.0, EditorConfig::default());
	state.attach_sync(NetworkSync::new(
		Box::new(LocalStorageRepository::new(&network_id)),
		network_id,
		Some(user.id.clone()),
	));
	let handle = WordGraphHandle::new(state);

	view! {
		<div class="workspace">
			<header class="app-header">
				<h1>"Word Graph"</h1>
				<div class="user">
					<span class="avatar">{user.initial()}</span>
					<span class="user-name">{user.display_name()}</span>
					<button on:click=move |_| on_sign_out.run(())>"로그아웃"</button>
				</div>
			</header>
			<div class="editor">
				<Sidebar handle=handle />
				<main class="canvas-area">
					<WordGraphCanvas handle=handle />
					<CanvasControls handle=handle />
					<DetailPanel handle=handle />
					<WordDialog handle=handle />
				</main>
			</div>
		</div>
	}
}

/// Default Home Page: sign-in gate in front of the editor.
#[component]
pub fn Home() -> impl IntoView {
	let session = StoredValue::new_local(LocalSession::restore());
	let user = RwSignal::new(session.with_value(|s| s.current_user()));

	let on_sign_in = Callback::new(move |identity: UserIdentity| {
		session.update_value(|s| {
			if let Err(e) = s.sign_in(identity.clone()) {
				warn!("session not stored: {e}");
			}
		});
		user.set(Some(identity));
	});
	let on_sign_out = Callback::new(move |()| {
		session.update_value(|s| {
			if let Err(e) = s.sign_out() {
				warn!("sign out incomplete: {e}");
			}
		});
		user.set(None);
	});

	move || match user.get() {
		Some(user) => view! { <Workspace user=user on_sign_out=on_sign_out /> }.into_any(),
		None => view! { <SignInPrompt on_sign_in=on_sign_in /> }.into_any(),
	}
}
