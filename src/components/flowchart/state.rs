/// Fixed timestep fed to `ViewportState::tick` by the animation loop.
pub const TICK_SECS: f64 = 0.016;
/// Duration of the button/click driven zoom transitions.
pub const ZOOM_TRANSITION_SECS: f64 = 0.5;

/// Pointer travel (in screen px) below which a gesture still counts as a click.
pub const CLICK_THRESHOLD: f64 = 4.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

/// Allowed zoom range; the scale never leaves `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
	pub min: f64,
	pub max: f64,
}

impl Default for ScaleBounds {
	fn default() -> Self {
		Self { min: 0.5, max: 3.0 }
	}
}

impl ScaleBounds {
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Sticky until the next gesture begins, so a click arriving after
	/// mouseup can tell whether the pointer actually travelled.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PinchState {
	pub active: bool,
	pub start_dist: f64,
	pub start_k: f64,
}

#[derive(Clone, Debug)]
struct ZoomAnimation {
	from: ViewTransform,
	target: f64,
	duration: f64,
	elapsed: f64,
}

/// Holds the pan/zoom transform applied to the whole scene, plus the gesture
/// bookkeeping that drives it. Single writer: only gesture handlers and the
/// animation tick mutate the transform.
#[derive(Clone, Debug)]
pub struct ViewportState {
	pub transform: ViewTransform,
	pub bounds: ScaleBounds,
	pub pan: PanState,
	pub pinch: PinchState,
	animation: Option<ZoomAnimation>,
}

impl ViewportState {
	pub fn new(bounds: ScaleBounds) -> Self {
		Self {
			transform: ViewTransform::default(),
			bounds,
			pan: PanState::default(),
			pinch: PinchState::default(),
			animation: None,
		}
	}

	pub fn is_animating(&self) -> bool {
		self.animation.is_some()
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		// a fresh gesture overrides any in-flight transition
		self.animation = None;
		self.pan.active = true;
		self.pan.moved = false;
		self.pan.start_x = x;
		self.pan.start_y = y;
		self.pan.transform_start_x = self.transform.x;
		self.pan.transform_start_y = self.transform.y;
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
		if dx.abs().max(dy.abs()) > CLICK_THRESHOLD {
			self.pan.moved = true;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn wheel_zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		self.animation = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.zoom_about(x, y, self.transform.k * factor);
	}

	pub fn begin_pinch(&mut self, a: (f64, f64), b: (f64, f64)) {
		self.animation = None;
		self.pan.active = false;
		self.pinch.active = true;
		self.pinch.start_dist = dist(a, b).max(1.0);
		self.pinch.start_k = self.transform.k;
	}

	pub fn pinch_to(&mut self, a: (f64, f64), b: (f64, f64)) {
		if !self.pinch.active {
			return;
		}
		let new_k = self.pinch.start_k * dist(a, b).max(1.0) / self.pinch.start_dist;
		let (cx, cy) = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
		self.zoom_about(cx, cy, new_k);
	}

	pub fn end_pinch(&mut self) {
		self.pinch.active = false;
	}

	/// Rescales about a screen point so the world position under it stays put.
	fn zoom_about(&mut self, x: f64, y: f64, new_k: f64) {
		let new_k = self.bounds.clamp(new_k);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Starts a smooth transition to the given scale, translating back to the
	/// origin on the way. Replaces any transition already running.
	pub fn animate_to(&mut self, target: f64, duration: f64) {
		let target = self.bounds.clamp(target);
		self.pan.active = false;
		self.pinch.active = false;
		self.animation = Some(ZoomAnimation {
			from: self.transform,
			target,
			duration,
			elapsed: 0.0,
		});
	}

	/// Advances the running transition by one timestep. Returns false once
	/// there is nothing left to animate. The final step lands on exactly
	/// `{x: 0, y: 0, k: target}`, never an eased approximation.
	pub fn tick(&mut self, dt: f64) -> bool {
		let Some(anim) = &mut self.animation else {
			return false;
		};
		anim.elapsed += dt;
		if anim.elapsed >= anim.duration {
			self.transform = ViewTransform {
				x: 0.0,
				y: 0.0,
				k: anim.target,
			};
			self.animation = None;
		} else {
			let t = ease_out_cubic(anim.elapsed / anim.duration);
			let from = anim.from;
			self.transform = ViewTransform {
				x: from.x * (1.0 - t),
				y: from.y * (1.0 - t),
				k: from.k + (anim.target - from.k) * t,
			};
		}
		true
	}
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	(dx * dx + dy * dy).sqrt()
}

/// Zoom-in-on-activate policy: clicking a node below the threshold jumps the
/// viewport to the target scale; at or above it, clicks change nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickZoom {
	pub threshold: f64,
	pub target: f64,
}

impl ClickZoom {
	pub fn respond(&self, scale: f64) -> Option<f64> {
		(scale < self.threshold).then_some(self.target)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport() -> ViewportState {
		ViewportState::new(ScaleBounds { min: 0.5, max: 3.0 })
	}

	fn run_to_rest(v: &mut ViewportState) {
		for _ in 0..1000 {
			if !v.tick(TICK_SECS) {
				return;
			}
		}
		panic!("animation did not settle");
	}

	#[test]
	fn clamp_is_idempotent_and_exact_at_the_bounds() {
		let bounds = ScaleBounds { min: 0.5, max: 3.0 };
		assert_eq!(bounds.clamp(5.0), 3.0);
		assert_eq!(bounds.clamp(0.1), 0.5);
		assert_eq!(bounds.clamp(1.7), 1.7);
		assert_eq!(bounds.clamp(bounds.clamp(5.0)), 3.0);
		assert_eq!(bounds.clamp(bounds.clamp(0.1)), 0.5);
	}

	#[test]
	fn clamp_is_monotonic() {
		let bounds = ScaleBounds { min: 0.5, max: 3.0 };
		for (lo, hi) in [(0.2, 0.4), (0.4, 2.0), (2.0, 9.0)] {
			assert!(bounds.clamp(lo) <= bounds.clamp(hi));
		}
	}

	#[test]
	fn animate_to_lands_exactly_on_the_target_scale() {
		for start in [0.5, 3.0] {
			let mut v = viewport();
			v.animate_to(start, ZOOM_TRANSITION_SECS);
			run_to_rest(&mut v);
			assert_eq!(v.transform.k, start);

			v.animate_to(1.5, ZOOM_TRANSITION_SECS);
			run_to_rest(&mut v);
			assert_eq!(v.transform.k, 1.5);
			assert_eq!((v.transform.x, v.transform.y), (0.0, 0.0));
		}
	}

	#[test]
	fn animate_to_clamps_out_of_range_targets() {
		let mut v = viewport();
		v.animate_to(10.0, ZOOM_TRANSITION_SECS);
		run_to_rest(&mut v);
		assert_eq!(v.transform.k, 3.0);
	}

	#[test]
	fn fresh_gestures_cancel_a_running_transition() {
		let mut v = viewport();
		v.animate_to(2.0, ZOOM_TRANSITION_SECS);
		assert!(v.tick(TICK_SECS));
		v.begin_pan(10.0, 10.0);
		assert!(!v.is_animating());
		let k = v.transform.k;
		assert!(!v.tick(TICK_SECS));
		assert_eq!(v.transform.k, k);

		v.animate_to(2.0, ZOOM_TRANSITION_SECS);
		v.wheel_zoom(0.0, 0.0, -1.0);
		assert!(!v.is_animating());
	}

	#[test]
	fn wheel_zoom_saturates_at_the_bounds() {
		let mut v = ViewportState::new(ScaleBounds { min: 1.0, max: 2.0 });
		for _ in 0..100 {
			v.wheel_zoom(300.0, 200.0, -1.0);
		}
		assert_eq!(v.transform.k, 2.0);
		for _ in 0..200 {
			v.wheel_zoom(300.0, 200.0, 1.0);
		}
		assert_eq!(v.transform.k, 1.0);
	}

	#[test]
	fn pan_tracks_the_pointer_and_flags_real_drags() {
		let mut v = viewport();
		v.begin_pan(100.0, 100.0);
		v.pan_to(102.0, 101.0);
		v.end_pan();
		assert!(!v.pan.moved);

		v.begin_pan(100.0, 100.0);
		v.pan_to(130.0, 100.0);
		assert!(v.pan.moved);
		assert_eq!(v.transform.x, 30.0);
		assert_eq!(v.transform.y, 0.0);
	}

	#[test]
	fn pinch_scales_about_the_midpoint() {
		let mut v = viewport();
		v.begin_pinch((100.0, 100.0), (200.0, 100.0));
		v.pinch_to((50.0, 100.0), (250.0, 100.0));
		assert_eq!(v.transform.k, 2.0);
		// midpoint (150, 100) stays fixed on screen
		assert_eq!(v.transform.x, -150.0);
		assert_eq!(v.transform.y, -100.0);
	}

	#[test]
	fn click_zoom_only_fires_below_its_threshold() {
		let policy = ClickZoom { threshold: 1.5, target: 1.5 };
		assert_eq!(policy.respond(1.2), Some(1.5));
		assert_eq!(policy.respond(1.5), None);
		assert_eq!(policy.respond(1.8), None);
	}
}
