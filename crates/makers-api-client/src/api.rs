//! Domain methods for the Product Makers API client.
//!
//! Request and response types come from `makers_core::models`. The trait impls at the
//! bottom adapt the client to the storage and backend seams used by the form and the
//! vote toggle.

use crate::ApiClient;
use anyhow::Result;
use async_trait::async_trait;
use makers_core::models::{
    LocalFile, Product, ProductSubmission, ProductSummary, SubmitProductResponse,
    ToggleVoteResponse, UploadResponse,
};
use makers_core::{AppError, ProductBackend, ProductListQuery, VoteBackend};
use makers_storage::{AssetStore, StorageError, StorageResult};
use uuid::Uuid;

impl ApiClient {
    /// Upload a single asset file. Returns the endpoint's response as-is.
    pub async fn upload_asset(&self, file: &LocalFile) -> Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::debug!(
            file_name = %file.file_name,
            size_bytes = file.size(),
            "Uploading asset"
        );
        self.post_multipart("/api/upload", form).await
    }

    /// Toggle the current user's vote on a product.
    pub async fn toggle_vote(&self, product_id: Uuid) -> Result<ToggleVoteResponse> {
        self.post_empty(&format!("/api/products/{}/vote", product_id))
            .await
    }

    /// Create a new product listing.
    pub async fn create_product(
        &self,
        submission: &ProductSubmission,
    ) -> Result<SubmitProductResponse> {
        self.post_json("/api/products", submission).await
    }

    /// Update an existing product listing.
    pub async fn update_product(
        &self,
        product_id: Uuid,
        submission: &ProductSubmission,
    ) -> Result<SubmitProductResponse> {
        self.put_json(&format!("/api/products/{}", product_id), submission)
            .await
    }

    /// List products. The search term is passed through; sorting and pagination are
    /// applied client-side with `ProductListQuery::apply`.
    pub async fn list_products(&self, query: &ProductListQuery) -> Result<Vec<ProductSummary>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.trim().to_string()));
        }
        self.get("/api/products", &params).await
    }

    /// Get a single product by ID.
    pub async fn get_product(&self, product_id: Uuid) -> Result<Product> {
        self.get(&format!("/api/products/{}", product_id), &[])
            .await
    }
}

fn submission_result(response: SubmitProductResponse) -> Result<Product, AppError> {
    match response {
        SubmitProductResponse {
            success: true,
            product: Some(product),
            ..
        } => Ok(product),
        SubmitProductResponse { error, .. } => Err(AppError::Remote(
            error.unwrap_or_else(|| "Product submission failed".to_string()),
        )),
    }
}

#[async_trait]
impl AssetStore for ApiClient {
    async fn upload(&self, file: &LocalFile) -> StorageResult<String> {
        let response = self
            .upload_asset(file)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{:#}", e)))?;

        match response {
            UploadResponse {
                success: true,
                url: Some(url),
                ..
            } => Ok(url),
            UploadResponse { error, .. } => Err(StorageError::UploadFailed(
                error.unwrap_or_else(|| format!("Upload of {} failed", file.file_name)),
            )),
        }
    }
}

#[async_trait]
impl VoteBackend for ApiClient {
    async fn toggle_vote(&self, product_id: Uuid) -> Result<ToggleVoteResponse, AppError> {
        ApiClient::toggle_vote(self, product_id)
            .await
            .map_err(|e| AppError::Remote(format!("{:#}", e)))
    }
}

#[async_trait]
impl ProductBackend for ApiClient {
    async fn create_product(&self, submission: &ProductSubmission) -> Result<Product, AppError> {
        let response = ApiClient::create_product(self, submission)
            .await
            .map_err(|e| AppError::Remote(format!("{:#}", e)))?;
        submission_result(response)
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        submission: &ProductSubmission,
    ) -> Result<Product, AppError> {
        let response = ApiClient::update_product(self, product_id, submission)
            .await
            .map_err(|e| AppError::Remote(format!("{:#}", e)))?;
        submission_result(response)
    }
}
