use leptos::prelude::*;
use log::error;

use crate::components::flowchart::{
	ClickZoom, FlowchartSvg, NodeDetailsPanel, ScaleBounds, Scene, TierPolicy, ZoomControl,
};

const PIPELINE_JSON: &str = include_str!("../../assets/pipeline.json");

/// Data-driven variant: the scene comes from an external description, nodes
/// carry detail-level tags, and clicking a node below the mid-level
/// threshold zooms in to it.
#[component]
pub fn Pipeline() -> impl IntoView {
	let selected = RwSignal::new(None::<String>);
	let scene = Scene::from_json(PIPELINE_JSON);
	if let Err(err) = &scene {
		error!("pipeline scene rejected: {err}");
	}

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
				<h1>"Release Pipeline"</h1>
				{scene
					.map(|scene| {
						view! {
							<FlowchartSvg
								scene=Signal::derive(move || scene.clone())
								width=1000.0
								height=600.0
								bounds=ScaleBounds { min: 0.5, max: 3.0 }
								policy=Some(TierPolicy::Graduated { threshold: 1.5 })
								click_zoom=Some(ClickZoom { threshold: 1.5, target: 1.5 })
								controls=vec![
									ZoomControl { label: "Overview", scale: 1.0 },
									ZoomControl { label: "Mid-Level", scale: 1.5 },
									ZoomControl { label: "Detail", scale: 2.0 },
								]
								on_activate=Some(Callback::new(move |id: String| {
									selected.set(Some(id));
								}))
							/>
						}
					})}
				<NodeDetailsPanel selected=Some(selected.into()) />
			</div>
		</ErrorBoundary>
	}
}
