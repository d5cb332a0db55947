//! Wizard controller
//!
//! Drives a `ProductFormManager` through the wizard: runs the upload phase when the
//! user leaves the screenshots step, and performs the final submission.

use crate::error::FormError;
use crate::manager::ProductFormManager;
use crate::settings::UploadSettings;
use crate::upload::{UploadPhase, UploadReport};
use crate::wizard::WizardStep;
use makers_core::models::{FormMode, Product};
use makers_core::{ErrorMetadata, Notifier, ProductBackend, SessionProvider};
use makers_storage::AssetStore;
use std::sync::Arc;

pub struct WizardController {
    manager: ProductFormManager,
    assets: Arc<dyn AssetStore>,
    products: Arc<dyn ProductBackend>,
    session: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
    upload_settings: UploadSettings,
}

impl WizardController {
    pub fn new(
        manager: ProductFormManager,
        assets: Arc<dyn AssetStore>,
        products: Arc<dyn ProductBackend>,
        session: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
        upload_settings: UploadSettings,
    ) -> Self {
        Self {
            manager,
            assets,
            products,
            session,
            notifier,
            upload_settings,
        }
    }

    pub fn manager(&self) -> &ProductFormManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ProductFormManager {
        &mut self.manager
    }

    pub fn into_manager(self) -> ProductFormManager {
        self.manager
    }

    /// Upload all pending assets now
    pub async fn upload_pending(&mut self) -> Result<UploadReport, FormError> {
        let phase = UploadPhase::new(self.assets.as_ref(), &self.upload_settings);
        let report = phase.run(&mut self.manager).await?;

        if let Some(summary) = report.summary() {
            self.notifier.warning(&summary);
        }
        Ok(report)
    }

    /// Move to the next step.
    ///
    /// Leaving the screenshots step uploads pending files first. Partial failures only
    /// warn; the move is blocked when no screenshot ended up committed.
    pub async fn advance(&mut self) -> Result<WizardStep, FormError> {
        let current = self.manager.current_step();
        self.manager.validate_step(current)?;

        if current == WizardStep::Screenshots && self.manager.draft().has_pending_assets() {
            let report = self.upload_pending().await?;

            if self.manager.draft().uploaded_screenshot_count() == 0 {
                let err = FormError::NoScreenshotUploaded {
                    failed: report.failed,
                    attempted: report.attempted,
                };
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        }

        self.manager.next_step().await
    }

    /// Move to the previous step. No uploads, no validation.
    pub async fn retreat(&mut self) -> Result<WizardStep, FormError> {
        self.manager.previous_step().await
    }

    /// Submit the draft to the products endpoint.
    ///
    /// Uploads leftovers, re-validates, then creates or updates depending on the form
    /// mode. The draft is cleared only after the endpoint accepted it.
    pub async fn submit(&mut self) -> Result<Product, FormError> {
        if !self.session.is_authenticated() {
            let err = FormError::AuthenticationRequired;
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        if self.manager.draft().has_pending_assets() {
            self.upload_pending().await?;
        }

        let submission = match self.manager.submission() {
            Ok(submission) => submission,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        let result = match self.manager.mode() {
            FormMode::Create => self.products.create_product(&submission).await,
            FormMode::Edit(id) => self.products.update_product(id, &submission).await,
        };

        let product = match result {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(mode = %self.manager.mode(), error = %e, "Product submission failed");
                self.notifier.error(&e.client_message());
                return Err(FormError::Submission(e));
            }
        };

        self.manager.clear().await?;
        tracing::info!(product_id = %product.id, mode = %self.manager.mode(), "Product submitted");
        self.notifier.info("Product submitted");

        Ok(product)
    }

    /// Abandon the draft
    pub async fn cancel(&mut self) -> Result<(), FormError> {
        self.manager.clear().await
    }
}
