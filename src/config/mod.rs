pub mod settings;

pub use settings::{AppConfig, DirectorySettings, RankingSettings, ResolverSettings};
