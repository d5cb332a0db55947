//! Draft form manager
//!
//! Holds the draft for one form mode, persists it to the session store after every
//! change, and answers the per-step validity questions the wizard asks.

use crate::draft::Draft;
use crate::error::FormError;
use crate::settings::FormSettings;
use crate::wizard::WizardStep;
use makers_core::models::{
    AssetRef, DraftField, FormMode, LocalFile, PersistedDraft, Product, ProductSubmission,
};
use makers_core::validation::{
    is_over_limit, remaining_chars, validate_image_file, validate_link, validate_text,
    ValidationError,
};
use makers_storage::{draft_key, step_key, SessionStore, StorageError};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use validator::Validate;

pub struct ProductFormManager {
    mode: FormMode,
    store: Arc<dyn SessionStore>,
    settings: FormSettings,
    draft: Draft,
    step: WizardStep,
}

impl ProductFormManager {
    /// Open the draft for `mode`, restoring any value left in the session store.
    pub async fn open(
        mode: FormMode,
        store: Arc<dyn SessionStore>,
        settings: FormSettings,
    ) -> Result<Self, FormError> {
        let mut manager = Self {
            mode,
            store,
            settings,
            draft: Draft::default(),
            step: WizardStep::first(),
        };

        if let Some(persisted) = manager.load_draft().await? {
            manager.draft = Draft::from_persisted(persisted);
        }
        if let Some(step) = manager.load_step().await? {
            manager.step = step;
        }

        tracing::debug!(
            mode = %manager.mode,
            step = %manager.step,
            screenshots = manager.draft.screenshots.len(),
            "Draft opened"
        );

        Ok(manager)
    }

    /// Open the edit draft for `product`.
    ///
    /// An edit already in progress for the same product is restored as is; otherwise the
    /// draft is seeded from the product's current values.
    pub async fn open_for_product(
        product: &Product,
        store: Arc<dyn SessionStore>,
        settings: FormSettings,
    ) -> Result<Self, FormError> {
        let mode = FormMode::Edit(product.id);
        let has_saved_draft = store.get(&draft_key(mode)).await.ok().flatten().is_some();

        let mut manager = Self::open(mode, store, settings).await?;
        if !has_saved_draft {
            manager.draft = Draft::from_persisted(PersistedDraft::from(product));
            manager.persist_draft().await?;
            tracing::debug!(product_id = %product.id, "Edit draft seeded from product");
        }

        Ok(manager)
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn value(&self, field: DraftField) -> &str {
        self.draft.fields.get(field)
    }

    pub fn max_chars(&self, field: DraftField) -> usize {
        self.settings.max_chars(field)
    }

    pub fn remaining_chars(&self, field: DraftField) -> usize {
        remaining_chars(self.value(field), self.max_chars(field))
    }

    pub fn is_over_limit(&self, field: DraftField) -> bool {
        is_over_limit(self.value(field), self.max_chars(field))
    }

    /// Set a text field. Values over the field's ceiling are rejected and leave the
    /// draft unchanged. Links are stored trimmed.
    pub async fn update_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let mut value = value.into();
        if field == DraftField::Link {
            value = value.trim().to_string();
        }
        validate_text(field, &value, self.max_chars(field), false)?;

        *self.draft.fields.get_mut(field) = value;
        self.persist_draft().await
    }

    /// Check a single step without side effects
    pub fn validate_step(&self, step: WizardStep) -> Result<(), ValidationError> {
        match step {
            WizardStep::Information => {
                for field in [
                    DraftField::Name,
                    DraftField::Tagline,
                    DraftField::Description,
                    DraftField::Link,
                ] {
                    validate_text(field, self.value(field), self.max_chars(field), true)?;
                }
                validate_link(self.value(DraftField::Link))?;
                if self.draft.icon.is_none() {
                    return Err(ValidationError::MissingIcon);
                }
                Ok(())
            }
            WizardStep::Screenshots => {
                if self.draft.screenshots.is_empty() {
                    return Err(ValidationError::MissingScreenshots);
                }
                if self.draft.screenshots.len() > self.settings.max_screenshots {
                    return Err(ValidationError::TooManyScreenshots {
                        max: self.settings.max_screenshots,
                    });
                }
                Ok(())
            }
            narrative => match narrative.narrative_field() {
                Some(field) => {
                    validate_text(field, self.value(field), self.max_chars(field), true)
                }
                None => Ok(()),
            },
        }
    }

    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        self.validate_step(step).is_ok()
    }

    pub fn current_step_valid(&self) -> bool {
        self.is_step_valid(self.step)
    }

    /// Move forward one step if the current one is valid. Stays put on the last step.
    pub async fn next_step(&mut self) -> Result<WizardStep, FormError> {
        self.validate_step(self.step)?;
        self.go_to(self.step.next()).await
    }

    /// Move back one step. Never validates.
    pub async fn previous_step(&mut self) -> Result<WizardStep, FormError> {
        self.go_to(self.step.previous()).await
    }

    async fn go_to(&mut self, step: WizardStep) -> Result<WizardStep, FormError> {
        if step != self.step {
            tracing::debug!(mode = %self.mode, from = %self.step, to = %step, "Wizard step changed");
            self.step = step;
        }
        self.store
            .set(&step_key(self.mode), json!(self.step.index()))
            .await?;
        Ok(self.step)
    }

    /// Replace the icon with a local file. The file is uploaded later.
    pub async fn set_icon(&mut self, file: LocalFile) -> Result<(), FormError> {
        self.check_file(&file)?;
        self.draft.icon = Some(AssetRef::Pending(file));
        self.persist_draft().await
    }

    pub async fn remove_icon(&mut self) -> Result<Option<AssetRef>, FormError> {
        let removed = self.draft.icon.take();
        self.persist_draft().await?;
        Ok(removed)
    }

    /// Queue a screenshot for upload
    pub async fn add_screenshot(&mut self, file: LocalFile) -> Result<(), FormError> {
        let max = self.settings.max_screenshots;
        if self.draft.screenshots.len() >= max {
            return Err(ValidationError::TooManyScreenshots { max }.into());
        }
        self.check_file(&file)?;

        self.draft.screenshots.push(AssetRef::Pending(file));
        self.persist_draft().await
    }

    /// Remove the screenshot at `index`. Returns `None` when the index is out of range.
    pub async fn remove_screenshot(&mut self, index: usize) -> Result<Option<AssetRef>, FormError> {
        if index >= self.draft.screenshots.len() {
            return Ok(None);
        }
        let removed = self.draft.screenshots.remove(index);
        self.persist_draft().await?;
        Ok(Some(removed))
    }

    fn check_file(&self, file: &LocalFile) -> Result<(), ValidationError> {
        validate_image_file(
            file,
            &self.settings.allowed_content_types,
            self.settings.max_asset_size_bytes,
        )
    }

    /// Build the request body for the products endpoint, re-validating the whole draft.
    ///
    /// Only committed asset URLs are included.
    pub fn submission(&self) -> Result<ProductSubmission, ValidationError> {
        for field in DraftField::ALL {
            validate_text(field, self.value(field), self.max_chars(field), true)?;
        }
        validate_link(self.value(DraftField::Link))?;

        let icon_url = self
            .draft
            .icon_url()
            .ok_or(ValidationError::MissingIcon)?
            .to_string();

        let screenshot_urls = self.draft.screenshot_urls();
        if screenshot_urls.is_empty() {
            return Err(ValidationError::MissingScreenshots);
        }
        if screenshot_urls.len() > self.settings.max_screenshots {
            return Err(ValidationError::TooManyScreenshots {
                max: self.settings.max_screenshots,
            });
        }

        let submission = ProductSubmission {
            fields: self.draft.fields.clone(),
            icon_url,
            screenshot_urls,
        };
        submission
            .validate()
            .map_err(|e| ValidationError::InvalidSubmission(e.to_string()))?;

        Ok(submission)
    }

    /// Drop the draft and its step pointer from memory and from the session store
    pub async fn clear(&mut self) -> Result<(), FormError> {
        self.store.remove(&draft_key(self.mode)).await?;
        self.store.remove(&step_key(self.mode)).await?;
        self.draft = Draft::default();
        self.step = WizardStep::first();

        tracing::debug!(mode = %self.mode, "Draft cleared");
        Ok(())
    }

    pub(crate) fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub(crate) async fn persist_draft(&self) -> Result<(), FormError> {
        let value = serde_json::to_value(self.draft.to_persisted())?;
        self.store.set(&draft_key(self.mode), value).await?;
        Ok(())
    }

    async fn load_draft(&self) -> Result<Option<PersistedDraft>, FormError> {
        let key = draft_key(self.mode);
        let Some(value) = self.read_value(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_value::<PersistedDraft>(value) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable draft");
                self.store.remove(&key).await?;
                Ok(None)
            }
        }
    }

    async fn load_step(&self) -> Result<Option<WizardStep>, FormError> {
        let key = step_key(self.mode);
        let Some(value) = self.read_value(&key).await? else {
            return Ok(None);
        };

        match WizardStep::from_persisted(&value) {
            Some(step) => Ok(Some(step)),
            None => {
                tracing::warn!(key = %key, value = %value, "Discarding unreadable step pointer");
                self.store.remove(&key).await?;
                Ok(None)
            }
        }
    }

    /// Read a raw value; a value the store itself cannot decode is removed and treated as absent
    async fn read_value(&self, key: &str) -> Result<Option<JsonValue>, FormError> {
        match self.store.get(key).await {
            Ok(value) => Ok(value),
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(key = %key, error = %e, "Discarding corrupt session value");
                self.store.remove(key).await?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
