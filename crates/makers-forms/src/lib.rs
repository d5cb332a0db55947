//! Product submission wizard.
//!
//! `ProductFormManager` owns one draft (keyed by form mode) and its step pointer and
//! writes both to an injected `SessionStore` on every change. Assets picked by the
//! user stay local until `UploadPhase` sends them to an `AssetStore`; the
//! `WizardController` decides when that happens (leaving the screenshots step, or
//! submitting) and reports partial failures through the host's `Notifier`.

pub mod controller;
pub mod draft;
pub mod error;
pub mod manager;
pub mod settings;
pub mod upload;
pub mod wizard;

pub use controller::WizardController;
pub use draft::Draft;
pub use error::FormError;
pub use manager::ProductFormManager;
pub use settings::{FormSettings, UploadSettings};
pub use upload::{UploadPhase, UploadReport};
pub use wizard::{WizardStep, STEP_COUNT};
