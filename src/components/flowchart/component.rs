use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, SvgsvgElement, TouchEvent, WheelEvent};

use super::render;
use super::state::{ClickZoom, ScaleBounds, TICK_SECS, ViewportState, ZOOM_TRANSITION_SECS};
use super::tier::TierPolicy;
use super::types::{NodeShape, Scene};

/// A zoom preset button rendered above the drawing surface. The scale each
/// button jumps to is page configuration, not component contract.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomControl {
	pub label: &'static str,
	pub scale: f64,
}

#[component]
pub fn FlowchartSvg(
	#[prop(into)] scene: Signal<Scene>,
	#[prop(default = 1000.0)] width: f64,
	#[prop(default = 400.0)] height: f64,
	#[prop(default = ScaleBounds::default())] bounds: ScaleBounds,
	#[prop(default = None)] policy: Option<TierPolicy>,
	#[prop(default = None)] click_zoom: Option<ClickZoom>,
	#[prop(default = Vec::new())] controls: Vec<ZoomControl>,
	#[prop(default = None)] on_activate: Option<Callback<String>>,
) -> impl IntoView {
	let svg_ref = NodeRef::<leptos::svg::Svg>::new();
	let viewport = RwSignal::new(ViewportState::new(bounds));
	let raf: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_running = Rc::new(Cell::new(false));

	// Animation frame loop; only runs while a zoom transition is in flight.
	let (raf_loop, raf_running_loop) = (raf.clone(), raf_running.clone());
	*raf.borrow_mut() = Some(Closure::new(move || {
		let animating = viewport
			.try_update(|v| {
				v.tick(TICK_SECS);
				v.is_animating()
			})
			.unwrap_or(false);
		if animating {
			if let Some(ref cb) = *raf_loop.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		} else {
			raf_running_loop.set(false);
		}
	}));

	let (raf_start, raf_running_start) = (raf.clone(), raf_running.clone());
	let start_animation = move |target: f64| {
		viewport.update(|v| v.animate_to(target, ZOOM_TRANSITION_SECS));
		if raf_running_start.get() {
			return;
		}
		if let Some(ref cb) = *raf_start.borrow() {
			let window = web_sys::window().unwrap();
			if window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.is_ok()
			{
				raf_running_start.set(true);
			}
		}
	};

	let pointer_pos = move |client_x: i32, client_y: i32| -> Option<(f64, f64)> {
		let svg: SvgsvgElement = svg_ref.get()?.unchecked_into();
		let rect = svg.get_bounding_client_rect();
		Some((
			client_x as f64 - rect.left(),
			client_y as f64 - rect.top(),
		))
	};
	let touch_point =
		move |touch: web_sys::Touch| pointer_pos(touch.client_x(), touch.client_y());

	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_pos(ev.client_x(), ev.client_y()) {
			viewport.update(|v| v.begin_pan(x, y));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if !viewport.with_untracked(|v| v.pan.active) {
			return;
		}
		if let Some((x, y)) = pointer_pos(ev.client_x(), ev.client_y()) {
			viewport.update(|v| v.pan_to(x, y));
		}
	};

	let on_mouseup = move |_: MouseEvent| {
		viewport.update(|v| v.end_pan());
	};

	let on_mouseleave = move |_: MouseEvent| {
		viewport.update(|v| {
			v.end_pan();
			v.end_pinch();
		});
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer_pos(ev.client_x(), ev.client_y()) {
			viewport.update(|v| v.wheel_zoom(x, y, ev.delta_y()));
		}
	};

	let on_touchstart = move |ev: TouchEvent| {
		let touches = ev.touches();
		if touches.length() == 1 {
			if let Some(p) = touches.item(0).and_then(touch_point) {
				viewport.update(|v| v.begin_pan(p.0, p.1));
			}
		} else if let (Some(a), Some(b)) = (
			touches.item(0).and_then(touch_point),
			touches.item(1).and_then(touch_point),
		) {
			viewport.update(|v| v.begin_pinch(a, b));
		}
	};

	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let touches = ev.touches();
		if touches.length() == 1 {
			if let Some(p) = touches.item(0).and_then(touch_point) {
				viewport.update(|v| v.pan_to(p.0, p.1));
			}
		} else if let (Some(a), Some(b)) = (
			touches.item(0).and_then(touch_point),
			touches.item(1).and_then(touch_point),
		) {
			viewport.update(|v| v.pinch_to(a, b));
		}
	};

	let on_touchend = move |ev: TouchEvent| {
		if ev.touches().length() < 2 {
			viewport.update(|v| v.end_pinch());
		}
		if ev.touches().length() == 0 {
			viewport.update(|v| v.end_pan());
		}
	};

	// One compose pass per committed transform change: links and nodes always
	// see the same scale snapshot.
	let frame = Memo::new(move |_| {
		let scale = viewport.with(|v| v.transform.k);
		scene.with(|s| render::compose(s, policy.as_ref(), scale))
	});

	let transform_attr = move || {
		viewport.with(|v| {
			format!(
				"translate({} {}) scale({})",
				v.transform.x, v.transform.y, v.transform.k
			)
		})
	};

	let start_on_activate = start_animation.clone();
	let activate = move |id: String| {
		// a drag that ended on a node is not a click
		if viewport.with_untracked(|v| v.pan.moved) {
			return;
		}
		if let Some(cb) = on_activate {
			cb.run(id);
		}
		if let Some(policy) = click_zoom {
			let scale = viewport.with_untracked(|v| v.transform.k);
			if let Some(target) = policy.respond(scale) {
				start_on_activate(target);
			}
		}
	};

	view! {
		<div class="flowchart">
			<div class="controls">
				{controls
					.iter()
					.map(|control| {
						let ZoomControl { label, scale } = *control;
						let start = start_animation.clone();
						view! { <button on:click=move |_| start(scale)>{label}</button> }
					})
					.collect_view()}
			</div>
			<svg
				node_ref=svg_ref
				width=width.to_string()
				height=height.to_string()
				style="border: 1px solid #ccc; display: block; cursor: grab; touch-action: none;"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
			>
				<g transform=transform_attr>
					{move || {
						frame
							.get()
							.links
							.into_iter()
							.map(|link| {
								view! {
									<line
										x1=link.x1.to_string()
										y1=link.y1.to_string()
										x2=link.x2.to_string()
										y2=link.y2.to_string()
										stroke="#999"
										stroke-width="2"
										opacity=link.opacity.to_string()
									/>
								}
							})
							.collect_view()
					}}
					{
						let activate = activate.clone();
						move || {
							let activate = activate.clone();
							frame
								.get()
								.nodes
								.into_iter()
								.map(move |node| {
									let id = node.id.clone();
									let on_node_click = {
										let activate = activate.clone();
										move |ev: MouseEvent| {
											ev.stop_propagation();
											activate(id.clone());
										}
									};
									let shape = match node.shape {
										NodeShape::Rectangle => view! {
											<rect
												x=(node.x - node.width / 2.0).to_string()
												y=(node.y - node.height / 2.0).to_string()
												width=node.width.to_string()
												height=node.height.to_string()
												rx="10"
												ry="10"
												fill=node.fill.clone()
												stroke="#333"
												stroke-width="2"
											/>
										}
										.into_any(),
										NodeShape::Circle => view! {
											<circle
												cx=node.x.to_string()
												cy=node.y.to_string()
												r=(node.width / 2.0).to_string()
												fill=node.fill.clone()
												stroke="#333"
											/>
										}
										.into_any(),
									};
									view! {
										<g
											opacity=node.opacity.to_string()
											style="cursor: pointer;"
											on:click=on_node_click
										>
											{shape}
											<text
												x=node.x.to_string()
												y=node.y.to_string()
												text-anchor="middle"
												dominant-baseline="central"
												font-size="10"
												fill="white"
											>
												{node.label.clone()}
											</text>
										</g>
									}
								})
								.collect_view()
						}
					}
				</g>
			</svg>
		</div>
	}
}
