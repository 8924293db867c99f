use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen_futures::spawn_local;

/// Lifecycle of an on-demand panel resource: one transition out of `Loading`,
/// into either `Ready` or `Failed`.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
	Loading,
	Ready(T),
	Failed(String),
}

/// Placeholder body for the panel; real node data binding is a later step.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelContent {
	pub heading: String,
	pub body: String,
}

// Stands in for resolving the panel's deferred chunk; wasm CSR has no
// per-component code splitting, so the panel defers its content instead.
async fn load_panel() -> Result<PanelContent, String> {
	TimeoutFuture::new(400).await;
	Ok(PanelContent {
		heading: "Node Details".into(),
		body: "Details about the selected node will appear here.".into(),
	})
}

/// Supplementary panel for the activated node. Resolves its content on
/// demand, showing a fallback while loading; a load failure stays scoped to
/// the panel and never takes the scene down with it.
#[component]
pub fn NodeDetailsPanel(
	#[prop(default = None)] selected: Option<Signal<Option<String>>>,
) -> impl IntoView {
	let state = RwSignal::new(LoadState::Loading);
	spawn_local(async move {
		let next = match load_panel().await {
			Ok(content) => LoadState::Ready(content),
			Err(err) => {
				warn!("node details panel failed to load: {err}");
				LoadState::Failed(err)
			}
		};
		// the panel may have been unmounted while the load was in flight
		let _ = state.try_set(next);
	});

	view! {
		<div class="node-details">
			{move || match state.get() {
				LoadState::Loading => view! { <p>"Loading Node Details..."</p> }.into_any(),
				LoadState::Failed(err) => view! {
					<p class="error">{format!("Node details unavailable: {err}")}</p>
				}
				.into_any(),
				LoadState::Ready(content) => {
					let body = content.body.clone();
					view! {
						<div>
							<h3>{content.heading}</h3>
							<p>
								{move || match selected.and_then(|sig| sig.get()) {
									Some(id) => format!("Details about node `{id}` will appear here."),
									None => body.clone(),
								}}
							</p>
						</div>
					}
					.into_any()
				}
			}}
		</div>
	}
}
