use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"페이지를 찾을 수 없습니다"</h1>
			<a href="/">"처음으로"</a>
		</div>
	}
}
