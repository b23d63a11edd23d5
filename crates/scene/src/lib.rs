pub mod camera;
pub mod carousel;
pub mod config;
pub mod content;
pub mod expanded;
pub mod focus;
pub mod portfolio;
pub mod reveal;
pub mod section;
pub mod snapshot;
pub mod terminal;
pub mod transform;

pub use config::{ConfigError, SceneConfig};
pub use portfolio::*;
pub use section::{Section, SectionKind};
