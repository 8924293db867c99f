use super::tier::TierPolicy;
use super::types::{NodeShape, Scene};

/// Straight segment between two node centers, in world-space coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkShape {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub opacity: f64,
}

/// A node resolved to drawable form: shape, size, fill and label.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGlyph {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub label: String,
	pub shape: NodeShape,
	pub width: f64,
	pub height: f64,
	pub fill: String,
	pub opacity: f64,
}

/// Everything drawn for one scale snapshot, links below nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub links: Vec<LinkShape>,
	pub nodes: Vec<NodeGlyph>,
}

/// Flattens scene + tier policy into drawable primitives for a single scale
/// snapshot, so a link can never outlive its endpoints by a frame. Elements
/// the policy hides are omitted outright; dimmed elements keep their glyphs
/// (and stay clickable). Coordinates are world-space; the viewport transform
/// is applied once, globally, by the caller.
pub fn compose(scene: &Scene, policy: Option<&TierPolicy>, scale: f64) -> Frame {
	let mut frame = Frame::default();

	for link in scene.links() {
		// endpoints are validated at scene construction
		let (Some(source), Some(target)) =
			(scene.node(&link.source), scene.node(&link.target))
		else {
			continue;
		};
		let opacity = policy.map_or(1.0, |p| p.link_opacity(source, target, scale));
		if opacity == 0.0 {
			continue;
		}
		frame.links.push(LinkShape {
			x1: source.x,
			y1: source.y,
			x2: target.x,
			y2: target.y,
			opacity,
		});
	}

	for node in scene.nodes() {
		let opacity = policy.map_or(1.0, |p| p.node_opacity(node, scale));
		if opacity == 0.0 {
			continue;
		}
		let (width, height) = node.size();
		frame.nodes.push(NodeGlyph {
			id: node.id.clone(),
			x: node.x,
			y: node.y,
			label: node.label.clone(),
			shape: node.shape,
			width,
			height,
			fill: node.fill().to_string(),
			opacity,
		});
	}

	frame
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::flowchart::types::{Link, Node};

	fn chart() -> Scene {
		Scene::new(
			vec![
				Node::circle("start", 0.0, 0.0, "Start"),
				Node::circle("mid", 100.0, 0.0, "Mid").with_parent("start"),
				Node::circle("end", 200.0, 0.0, "End"),
			],
			vec![Link::new("start", "mid"), Link::new("mid", "end")],
		)
		.unwrap()
	}

	fn ids(frame: &Frame) -> Vec<&str> {
		frame.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn overview_scale_drops_the_inner_node_and_both_its_links() {
		let policy = TierPolicy::BinaryCutoff { threshold: 1.5 };
		let frame = compose(&chart(), Some(&policy), 1.0);
		assert_eq!(ids(&frame), ["start", "end"]);
		assert!(frame.links.is_empty());
	}

	#[test]
	fn detail_scale_renders_everything_fully_opaque() {
		let policy = TierPolicy::BinaryCutoff { threshold: 1.5 };
		let frame = compose(&chart(), Some(&policy), 2.0);
		assert_eq!(ids(&frame), ["start", "mid", "end"]);
		assert_eq!(frame.links.len(), 2);
		assert!(frame.nodes.iter().all(|n| n.opacity == 1.0));
		assert!(frame.links.iter().all(|l| l.opacity == 1.0));
	}

	#[test]
	fn no_policy_renders_everything() {
		let frame = compose(&chart(), None, 0.7);
		assert_eq!(frame.nodes.len(), 3);
		assert_eq!(frame.links.len(), 2);
	}

	#[test]
	fn links_carry_their_endpoint_positions() {
		let frame = compose(&chart(), None, 1.0);
		assert_eq!(frame.links[0].x1, 0.0);
		assert_eq!(frame.links[0].x2, 100.0);
		assert_eq!(frame.links[1].x1, 100.0);
		assert_eq!(frame.links[1].x2, 200.0);
	}

	#[test]
	fn glyphs_resolve_shape_defaults() {
		let scene = Scene::new(
			vec![
				Node::rect("block", 50.0, 50.0, "Block"),
				Node::circle("dot", 0.0, 0.0, "Dot"),
			],
			vec![],
		)
		.unwrap();
		let frame = compose(&scene, None, 1.0);
		let block = &frame.nodes[0];
		assert_eq!(block.shape, NodeShape::Rectangle);
		assert_eq!((block.width, block.height), (150.0, 50.0));
		let dot = &frame.nodes[1];
		assert_eq!((dot.width, dot.height), (40.0, 40.0));
	}
}
