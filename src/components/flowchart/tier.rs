use super::types::{DetailLevel, Node};

/// Opacity of elements the graduated policy dims rather than hides.
pub const DIM_OPACITY: f64 = 0.3;

/// Maps the continuous zoom scale to per-element visibility. Both shapes are
/// pure functions of (tags, scale, threshold) and are re-evaluated from the
/// live scale on every change; nothing is cached across transform updates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TierPolicy {
	/// Nested nodes are hidden below the threshold and shown at or above it.
	BinaryCutoff { threshold: f64 },
	/// Mid-level elements appear at the threshold; pure-overview elements dim.
	Graduated { threshold: f64 },
}

impl TierPolicy {
	/// Opacity for a single node at the given scale: 0, `DIM_OPACITY` or 1.
	pub fn node_opacity(&self, node: &Node, scale: f64) -> f64 {
		match *self {
			TierPolicy::BinaryCutoff { threshold } => {
				if node.is_inner() && scale < threshold {
					0.0
				} else {
					1.0
				}
			}
			TierPolicy::Graduated { threshold } => {
				if scale < threshold {
					if node.level() == DetailLevel::Overview { 1.0 } else { 0.0 }
				} else if node.level() == DetailLevel::MidLevel {
					1.0
				} else {
					DIM_OPACITY
				}
			}
		}
	}

	/// Opacity for a link, judged from both endpoint tags with the same scale
	/// snapshot as the nodes. A link is never shown while an endpoint is hidden.
	pub fn link_opacity(&self, source: &Node, target: &Node, scale: f64) -> f64 {
		match *self {
			TierPolicy::BinaryCutoff { .. } => {
				if self.node_opacity(source, scale) == 0.0
					|| self.node_opacity(target, scale) == 0.0
				{
					0.0
				} else {
					1.0
				}
			}
			TierPolicy::Graduated { threshold } => {
				let (a, b) = (source.level(), target.level());
				if scale < threshold {
					if a == DetailLevel::Overview && b == DetailLevel::Overview {
						1.0
					} else {
						0.0
					}
				} else if a == DetailLevel::MidLevel || b == DetailLevel::MidLevel {
					1.0
				} else {
					DIM_OPACITY
				}
			}
		}
	}
}
