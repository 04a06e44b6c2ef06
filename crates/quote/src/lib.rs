//! Print-cost estimation for uploaded STL meshes.
//!
//! A request runs through a fixed pipeline: upload checks, STL decoding,
//! volume and area accumulation, the shell/infill manufacturing model, and
//! finally pricing by material. See [`quote`].

mod config;
mod engine;
mod error;
mod material;
pub mod model;
pub mod order;
mod pricing;
pub mod upload;

pub use config::*;
pub use engine::*;
pub use error::QuoteError;
pub use material::*;
pub use model::PrintedVolume;
pub use pricing::*;
pub use upload::MeshUpload;

pub use printquote_mesh::GeometryTotals;

// Requests may be priced on any thread.
static_assertions::assert_impl_all!(QuoteRequest: Send, Sync);
static_assertions::assert_impl_all!(Quotation: Send, Sync);
