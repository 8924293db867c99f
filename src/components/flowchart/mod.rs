mod component;
mod details;
mod render;
mod state;
mod tier;
mod types;

pub use component::{FlowchartSvg, ZoomControl};
pub use details::NodeDetailsPanel;
pub use render::{Frame, LinkShape, NodeGlyph, compose};
pub use state::{ClickZoom, ScaleBounds, ViewTransform, ViewportState};
pub use tier::TierPolicy;
pub use types::{DetailLevel, Link, Node, NodeShape, Scene, SceneError};
