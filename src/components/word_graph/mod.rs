mod component;
mod config;
mod events;
mod interaction;
mod panels;
mod render;
mod scene;
mod search;
mod selection;
mod state;
mod store;
mod types;
mod viewport;

pub use component::{WordGraphCanvas, WordGraphHandle};
pub use config::EditorConfig;
pub use panels::{CanvasControls, DetailPanel, Sidebar, WordDialog};
pub use state::WordGraphState;
pub use types::{EdgeStyle, GraphData, GraphEdge, GraphNode, WordData};
pub use viewport::Point;
