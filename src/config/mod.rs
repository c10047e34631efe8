mod filesystem;
mod loader;
mod model;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LoadResult, load_config};
pub use model::{CONFIG_VERSION, Config, OutputConfig, ProgressConfig};
