pub mod blueprint;
pub mod collaborators;
pub mod config;
pub mod content;
pub mod holders;
pub mod mapgen;
pub mod types;

pub use blueprint::{Blueprint, BlueprintError, Rgba};
pub use collaborators::Collaborators;
pub use config::{ConfigError, GeneratorConfig, GeneratorSettings};
pub use content::{CatalogError, ContentCatalog};
pub use holders::{Entity, OwnershipHolders};
pub use mapgen::{GeneratedRoom, MapGenerator, MapRequest, Placement};
pub use types::*;
