use leptos::prelude::*;

use crate::components::flowchart::{
	FlowchartSvg, Link, Node, ScaleBounds, Scene, SceneError, ZoomControl,
};

/// Three nodes in a straight line; no detail gating, zoom controls only.
fn straight_line() -> Result<Scene, SceneError> {
	Scene::new(
		vec![
			Node::circle("start", 100.0, 200.0, "Start"),
			Node::circle("middle", 300.0, 200.0, "Middle"),
			Node::circle("end", 500.0, 200.0, "End"),
		],
		vec![Link::new("start", "middle"), Link::new("middle", "end")],
	)
}

/// Minimal variant: the smallest possible scene on a tighter zoom range.
#[component]
pub fn Minimal() -> impl IntoView {
	let scene = straight_line();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>
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
		}>

			<div class="page">
				<h1>"Minimal Flowchart"</h1>
				{scene
					.map(|scene| {
						view! {
							<FlowchartSvg
								scene=Signal::derive(move || scene.clone())
								width=600.0
								height=400.0
								bounds=ScaleBounds { min: 1.0, max: 2.0 }
								controls=vec![
									ZoomControl { label: "Overview", scale: 1.0 },
									ZoomControl { label: "Detail", scale: 2.0 },
								]
							/>
						}
					})}
			</div>
		</ErrorBoundary>
	}
}
