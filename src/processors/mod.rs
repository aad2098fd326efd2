// downsize/src/processors/mod.rs
mod accessor;
mod batch;
mod compressor;
mod loader;
mod placement;
mod resizer;
mod strategy;

pub use accessor::{ImageAccessor, RasterAccessor};
pub use batch::BatchProcessor;
pub use compressor::Compressor;
pub use loader::Loader;
pub use placement::{Destination, OutputPlacement, BACKUP_DIR};
pub use resizer::{Resizer, MAX_DIMENSION};
pub use strategy::ResizingStrategy;

