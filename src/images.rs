/*! Array texture resources and the service that manages them. */

mod cache;
mod error;
pub mod service;
mod texture_array;

pub use cache::{TextureArrayKey, TextureCache};
pub use error::Error;
pub use service::{ContextLossPolicy, TextureArrayService};
pub use texture_array::{RetainedUpload, TextureArray, TextureArrayDescriptor, TextureArrayUpdate};
