use leptos::prelude::*;

use crate::components::flowchart::{
	FlowchartSvg, Link, Node, NodeDetailsPanel, ScaleBounds, Scene, SceneError, TierPolicy,
	ZoomControl,
};

/// Hand-authored process chart: two process blocks whose nested inner nodes
/// only appear once the viewport is zoomed past the mid-level threshold.
fn process_chart() -> Result<Scene, SceneError> {
	Scene::new(
		vec![
			Node::circle("start", 100.0, 200.0, "Start"),
			Node::rect("processA", 500.0, 150.0, "Process A"),
			Node::rect("processB", 500.0, 250.0, "Process B"),
			Node::circle("innerA1", 475.0, 130.0, "Inner A1")
				.with_size(20.0, 20.0)
				.with_color("#ffa500")
				.with_parent("processA"),
			Node::circle("innerA2", 525.0, 130.0, "Inner A2")
				.with_size(20.0, 20.0)
				.with_color("#ffa500")
				.with_parent("processA"),
			Node::circle("innerB1", 475.0, 270.0, "Inner B1")
				.with_size(20.0, 20.0)
				.with_color("#ffa500")
				.with_parent("processB"),
			Node::circle("innerB2", 525.0, 270.0, "Inner B2")
				.with_size(20.0, 20.0)
				.with_color("#ffa500")
				.with_parent("processB"),
			Node::circle("end", 900.0, 200.0, "End"),
		],
		vec![
			Link::new("start", "processA"),
			Link::new("start", "processB"),
			Link::new("processA", "innerA1"),
			Link::new("processA", "innerA2"),
			Link::new("processB", "innerB1"),
			Link::new("processB", "innerB2"),
			Link::new("innerA1", "end"),
			Link::new("innerA2", "end"),
			Link::new("innerB1", "end"),
			Link::new("innerB2", "end"),
		],
	)
}

/// Default Home Page: the static-graph variant with a binary detail cutoff.
#[component]
pub fn Home() -> impl IntoView {
	let scene = process_chart();

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
		}>

			<div class="page">
				<h1>"Flowchart"</h1>
				{scene
					.map(|scene| {
						view! {
							<FlowchartSvg
								scene=Signal::derive(move || scene.clone())
								width=1000.0
								height=400.0
								bounds=ScaleBounds { min: 0.5, max: 3.0 }
								policy=Some(TierPolicy::BinaryCutoff { threshold: 1.5 })
								controls=vec![
									ZoomControl { label: "Overview", scale: 1.0 },
									ZoomControl { label: "Mid-Level", scale: 1.5 },
									ZoomControl { label: "Detail", scale: 2.0 },
								]
							/>
						}
					})}
				<NodeDetailsPanel />
			</div>
		</ErrorBoundary>
	}
}
