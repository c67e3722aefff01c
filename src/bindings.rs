/*! Binding discipline and upload planning for array textures. */

pub mod binding;
pub mod sampler;
pub mod unpack;
pub mod upload_plan;

pub use binding::{BindingScope, with_binding};
pub use upload_plan::{RowAlignment, UploadPlan};
