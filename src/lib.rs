//! Loader, band algebra, and PNG export for the phenotyping camera's
//! multispectral .DAT captures.

pub mod image_pipeline;
pub mod logger;
