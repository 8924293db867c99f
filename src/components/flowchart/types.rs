use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

/// Default diameter for circle nodes.
pub const DEFAULT_CIRCLE_DIAMETER: f64 = 40.0;
/// Default width for rectangle nodes.
pub const DEFAULT_RECT_WIDTH: f64 = 150.0;
/// Default height for rectangle nodes.
pub const DEFAULT_RECT_HEIGHT: f64 = 50.0;
/// Default node fill when the scene supplies no color.
pub const DEFAULT_FILL: &str = "#69b3a2";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
	#[default]
	Circle,
	Rectangle,
}

/// Detail tier a node or link belongs to. Untagged elements count as overview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailLevel {
	#[default]
	Overview,
	MidLevel,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub label: String,
	#[serde(default)]
	pub shape: NodeShape,
	#[serde(default)]
	pub width: Option<f64>,
	#[serde(default)]
	pub height: Option<f64>,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub parent: Option<String>,
	#[serde(default)]
	pub level: Option<DetailLevel>,
}

impl Node {
	/// Circle node at a fixed world-space position.
	pub fn circle(id: &str, x: f64, y: f64, label: &str) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			label: label.into(),
			shape: NodeShape::Circle,
			width: None,
			height: None,
			color: None,
			parent: None,
			level: None,
		}
	}

	/// Rounded-rectangle node at a fixed world-space position.
	pub fn rect(id: &str, x: f64, y: f64, label: &str) -> Self {
		Self {
			shape: NodeShape::Rectangle,
			..Self::circle(id, x, y, label)
		}
	}

	pub fn with_size(mut self, width: f64, height: f64) -> Self {
		self.width = Some(width);
		self.height = Some(height);
		self
	}

	pub fn with_color(mut self, color: &str) -> Self {
		self.color = Some(color.into());
		self
	}

	/// Marks this node as nested inside another node.
	pub fn with_parent(mut self, parent: &str) -> Self {
		self.parent = Some(parent.into());
		self
	}

	pub fn with_level(mut self, level: DetailLevel) -> Self {
		self.level = Some(level);
		self
	}

	/// Nested nodes are the ones the binary cutoff policy gates.
	pub fn is_inner(&self) -> bool {
		self.parent.is_some()
	}

	pub fn level(&self) -> DetailLevel {
		self.level.unwrap_or_default()
	}

	/// Resolved width/height, falling back to the per-shape defaults.
	pub fn size(&self) -> (f64, f64) {
		match self.shape {
			NodeShape::Rectangle => (
				self.width.unwrap_or(DEFAULT_RECT_WIDTH),
				self.height.unwrap_or(DEFAULT_RECT_HEIGHT),
			),
			NodeShape::Circle => {
				let d = self.width.unwrap_or(DEFAULT_CIRCLE_DIAMETER);
				(d, self.height.unwrap_or(d))
			}
		}
	}

	pub fn fill(&self) -> &str {
		self.color.as_deref().unwrap_or(DEFAULT_FILL)
	}
}

/// Directed connection between two nodes, purely referential.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	pub source: String,
	pub target: String,
}

impl Link {
	pub fn new(source: &str, target: &str) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

#[derive(Debug, Error)]
pub enum SceneError {
	#[error("link {link_source} -> {target} references unknown node `{missing}`")]
	UnknownNode {
		link_source: String,
		target: String,
		missing: String,
	},
	#[error("invalid scene description: {0}")]
	Parse(#[from] serde_json::Error),
}

/// One row of the external scene description: a node plus its outgoing links.
#[derive(Debug, Deserialize)]
struct NodeSpec {
	#[serde(flatten)]
	node: Node,
	#[serde(default)]
	to: Vec<String>,
}

/// The fixed set of nodes and links describing a diagram. Immutable once
/// constructed; every link endpoint is validated against the node set, so
/// endpoint lookups during rendering cannot dangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	nodes: Vec<Node>,
	links: Vec<Link>,
}

impl Scene {
	pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Result<Self, SceneError> {
		let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		for link in &links {
			for end in [&link.source, &link.target] {
				if !ids.contains(end.as_str()) {
					return Err(SceneError::UnknownNode {
						link_source: link.source.clone(),
						target: link.target.clone(),
						missing: end.clone(),
					});
				}
			}
		}
		Ok(Self { nodes, links })
	}

	/// Parses the external description: a JSON array of nodes, each carrying
	/// its outgoing link targets in `to`.
	pub fn from_json(text: &str) -> Result<Self, SceneError> {
		let specs: Vec<NodeSpec> = serde_json::from_str(text)?;
		let mut nodes = Vec::with_capacity(specs.len());
		let mut links = Vec::new();
		for spec in specs {
			for target in &spec.to {
				links.push(Link {
					source: spec.node.id.clone(),
					target: target.clone(),
				});
			}
			nodes.push(spec.node);
		}
		Self::new(nodes, links)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scene_rejects_dangling_link_naming_the_missing_id() {
		let err = Scene::new(
			vec![Node::circle("a", 0.0, 0.0, "A")],
			vec![Link::new("a", "ghost")],
		)
		.unwrap_err();
		assert!(matches!(
			err,
			SceneError::UnknownNode { ref missing, .. } if missing == "ghost"
		));
		assert!(err.to_string().contains("ghost"));
	}

	#[test]
	fn from_json_builds_nodes_and_outgoing_links() {
		let scene = Scene::from_json(
			r##"[
				{ "id": "build", "x": 100, "y": 50, "label": "Build",
				  "shape": "rectangle", "level": "overview", "to": ["test"] },
				{ "id": "test", "x": 300, "y": 50, "label": "Test",
				  "level": "mid-level", "width": 24, "color": "#ffa500",
				  "parent": "build" }
			]"##,
		)
		.unwrap();

		assert_eq!(scene.nodes().len(), 2);
		assert_eq!(scene.links(), &[Link::new("build", "test")]);

		let build = scene.node("build").unwrap();
		assert_eq!(build.shape, NodeShape::Rectangle);
		assert_eq!(build.level(), DetailLevel::Overview);
		assert_eq!(build.size(), (DEFAULT_RECT_WIDTH, DEFAULT_RECT_HEIGHT));

		let test = scene.node("test").unwrap();
		assert_eq!(test.shape, NodeShape::Circle);
		assert_eq!(test.level(), DetailLevel::MidLevel);
		assert!(test.is_inner());
		assert_eq!(test.size(), (24.0, 24.0));
		assert_eq!(test.fill(), "#ffa500");
	}

	#[test]
	fn from_json_rejects_unknown_reference() {
		let err = Scene::from_json(
			r#"[{ "id": "a", "x": 0, "y": 0, "label": "A", "to": ["b"] }]"#,
		)
		.unwrap_err();
		assert!(matches!(err, SceneError::UnknownNode { .. }));
	}

	#[test]
	fn untagged_nodes_default_to_overview_circles() {
		let node = Node::circle("n", 0.0, 0.0, "N");
		assert_eq!(node.level(), DetailLevel::Overview);
		assert!(!node.is_inner());
		assert_eq!(node.fill(), DEFAULT_FILL);
		assert_eq!(node.size(), (DEFAULT_CIRCLE_DIAMETER, DEFAULT_CIRCLE_DIAMETER));
	}
}
