//! `pdfpane` - PDF acquisition and render planning for embedded viewers
//!
//! # Pipeline
//!
//! ```text
//! trigger → AcquisitionController → DocumentFetcher / DocumentPicker
//!         → [encode as data: URI, remote path only] → RenderStrategy → RenderPlan
//! ```
//!
//! - **Fetching**: one HTTP GET per attempt, no retries; downloads stream
//!   into `<cache-root>/<filename>.pdf`
//! - **Encoding**: whole document as a `data:application/pdf;base64,...` URI
//! - **Rendering**: web hosts show the reference inline, native hosts go
//!   through an embedded-viewer service
//! - **State**: `idle → loading → ready | error`, newest attempt wins
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pdfpane::{AcquisitionController, Config, PathPicker, Status};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let controller = AcquisitionController::from_config(&config, Arc::new(PathPicker::default()))?;
//!     let state = controller.load_from_remote().await;
//!     assert_eq!(state.status, Status::Ready);
//!     println!("{:?}", controller.render_plan().await);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod encoder;
pub mod error;
pub mod fetcher;
pub mod picker;
pub mod render;

pub use config::Config;
pub use controller::{AcquisitionController, AcquisitionState, DocumentSource, Status};
pub use encoder::{decode, encode, EncodedPayload, PDF_MEDIA_TYPE};
pub use error::AcquireError;
pub use fetcher::{DocumentFetcher, HttpFetcher};
pub use picker::{DocumentPicker, PathPicker, PromptPicker};
pub use render::{plan, Platform, RenderMode, RenderPlan, RenderStrategy};

/// Version of pdfpane
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
