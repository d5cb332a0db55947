//! Product Makers CLI: drafts, votes and the product directory.
//!
//! Set MAKERS_API_URL and MAKERS_API_TOKEN. Drafts live under MAKERS_SESSION_DIR.

use anyhow::Context;
use clap::{Parser, Subcommand};
use makers_api_client::ApiClient;
use makers_cli::{read_local_file, session_for, truncate_string};
use makers_core::models::{AssetRef, DraftField, FormMode, VoteSnapshot};
use makers_core::{AppError, MakersConfig, ProductListQuery, ProductSort};
use makers_forms::{
    FormSettings, ProductFormManager, UploadReport, UploadSettings, WizardController, WizardStep,
};
use makers_infra::{init_telemetry, report_error, ErrorResponse, TracingNotifier};
use makers_storage::{AssetStore, FileSessionStore, LocalAssetStore, SessionStore};
use makers_votes::VoteToggle;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "makers", about = "Product Makers CLI")]
struct Cli {
    /// Write logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work on a product draft
    Draft {
        /// Edit an existing product instead of creating one
        #[arg(long)]
        edit: Option<Uuid>,
        #[command(subcommand)]
        sub: DraftCommands,
    },
    /// Toggle your vote on a product
    Vote {
        /// Product UUID
        id: Uuid,
    },
    /// Browse the product directory
    Products {
        #[command(subcommand)]
        sub: ProductCommands,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Show the draft, the current step and remaining characters
    Show,
    /// Set a text field (name, tagline, description, link, problem, solution,
    /// target-audience, key-features, business-model, roadmap)
    Set { field: DraftField, value: String },
    /// Go to the next step; leaving the screenshots step uploads pending files
    Next,
    /// Go back one step
    Back,
    /// Attach and upload the product icon
    Icon { file: PathBuf },
    /// Attach and upload one or more screenshots
    Screenshot {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove the icon
    RemoveIcon,
    /// Remove the screenshot at a zero-based position
    RemoveScreenshot { index: usize },
    /// Submit the draft
    Submit,
    /// Discard the draft
    Clear,
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List products
    List {
        /// Filter by name or tagline
        #[arg(long)]
        search: Option<String>,
        /// newest, most-voted or alphabetical
        #[arg(long, default_value = "newest")]
        sort: ProductSort,
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long, default_value = "12")]
        per_page: usize,
        /// One line per product instead of JSON
        #[arg(long)]
        plain: bool,
    },
    /// Get a single product by ID
    Get {
        /// Product UUID
        id: Uuid,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn asset_json(asset: &AssetRef) -> serde_json::Value {
    match asset {
        AssetRef::Uploaded { url } => json!({ "url": url }),
        AssetRef::Pending(file) => json!({ "pending": file.file_name }),
    }
}

fn draft_json(manager: &ProductFormManager) -> serde_json::Value {
    let step = manager.current_step();
    let fields: serde_json::Map<String, serde_json::Value> = DraftField::ALL
        .iter()
        .map(|field| {
            (
                field.to_string(),
                json!({
                    "value": manager.value(*field),
                    "remaining": manager.remaining_chars(*field),
                    "overLimit": manager.is_over_limit(*field),
                }),
            )
        })
        .collect();
    let steps: Vec<serde_json::Value> = WizardStep::ALL
        .iter()
        .map(|s| json!({ "title": s.title(), "valid": manager.is_step_valid(*s) }))
        .collect();

    json!({
        "mode": manager.mode().to_string(),
        "step": { "index": step.index(), "title": step.title(), "valid": manager.current_step_valid() },
        "fields": fields,
        "icon": manager.draft().icon.as_ref().map(asset_json),
        "screenshots": manager.draft().screenshots.iter().map(asset_json).collect::<Vec<_>>(),
        "steps": steps,
    })
}

fn report_json(report: &UploadReport) -> serde_json::Value {
    json!({
        "attempted": report.attempted,
        "failed": report.failed,
        "iconUploaded": report.icon_uploaded,
        "screenshotsUploaded": report.screenshots_uploaded,
        "errors": report.errors,
    })
}

async fn open_wizard(
    config: &MakersConfig,
    client: &ApiClient,
    edit: Option<Uuid>,
) -> anyhow::Result<WizardController> {
    let store: Arc<dyn SessionStore> = Arc::new(
        FileSessionStore::new(config.session_dir.clone())
            .await
            .map_err(AppError::from)?,
    );
    let settings = FormSettings::from_config(config);

    let manager = match edit {
        Some(id) => {
            let product = client.get_product(id).await?;
            ProductFormManager::open_for_product(&product, store, settings).await
        }
        None => ProductFormManager::open(FormMode::Create, store, settings).await,
    }
    .map_err(AppError::from)?;

    let assets: Arc<dyn AssetStore> = match &config.asset_dir {
        Some(dir) => {
            let base_url = config
                .asset_base_url
                .clone()
                .context("MAKERS_ASSET_BASE_URL must be set with MAKERS_ASSET_DIR")?;
            Arc::new(
                LocalAssetStore::new(dir.clone(), base_url)
                    .await
                    .map_err(AppError::from)?,
            )
        }
        None => Arc::new(client.clone()),
    };

    Ok(WizardController::new(
        manager,
        assets,
        Arc::new(client.clone()),
        Arc::new(session_for(client)),
        Arc::new(TracingNotifier),
        UploadSettings::from_config(config),
    ))
}

async fn run_draft(
    config: &MakersConfig,
    client: &ApiClient,
    edit: Option<Uuid>,
    sub: DraftCommands,
) -> anyhow::Result<()> {
    let mut wizard = open_wizard(config, client, edit).await?;

    match sub {
        DraftCommands::Show => {}
        DraftCommands::Set { field, value } => {
            wizard
                .manager_mut()
                .update_field(field, value)
                .await
                .map_err(AppError::from)?;
        }
        DraftCommands::Next => {
            wizard.advance().await.map_err(AppError::from)?;
        }
        DraftCommands::Back => {
            wizard.retreat().await.map_err(AppError::from)?;
        }
        DraftCommands::Icon { file } => {
            let file = read_local_file(&file).await?;
            wizard
                .manager_mut()
                .set_icon(file)
                .await
                .map_err(AppError::from)?;
            // Local files do not outlive the process, so attach means upload.
            let report = wizard.upload_pending().await.map_err(AppError::from)?;
            return print_json(&report_json(&report));
        }
        DraftCommands::Screenshot { files } => {
            for path in files {
                let file = read_local_file(&path).await?;
                wizard
                    .manager_mut()
                    .add_screenshot(file)
                    .await
                    .map_err(AppError::from)?;
            }
            let report = wizard.upload_pending().await.map_err(AppError::from)?;
            return print_json(&report_json(&report));
        }
        DraftCommands::RemoveIcon => {
            wizard
                .manager_mut()
                .remove_icon()
                .await
                .map_err(AppError::from)?;
        }
        DraftCommands::RemoveScreenshot { index } => {
            let removed = wizard
                .manager_mut()
                .remove_screenshot(index)
                .await
                .map_err(AppError::from)?;
            if removed.is_none() {
                return Err(AppError::InvalidInput(format!("No screenshot at position {}", index)).into());
            }
        }
        DraftCommands::Submit => {
            let product = wizard.submit().await.map_err(AppError::from)?;
            return print_json(&product);
        }
        DraftCommands::Clear => {
            wizard.cancel().await.map_err(AppError::from)?;
            return print_json(&json!({ "success": true, "message": "Draft discarded" }));
        }
    }

    print_json(&draft_json(wizard.manager()))
}

async fn run(command: Commands, config: &MakersConfig, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        Commands::Draft { edit, sub } => run_draft(config, client, edit, sub).await?,
        Commands::Vote { id } => {
            let product = client.get_product(id).await?;
            let mut toggle = VoteToggle::new(id, VoteSnapshot::new(product.has_voted, product.vote_count));
            let session = session_for(client);

            let settled = toggle
                .toggle(&session, client)
                .await
                .map_err(AppError::from)?;
            print_json(&json!({
                "productId": id,
                "hasVoted": settled.has_voted,
                "voteCount": settled.vote_count,
            }))?;
        }
        Commands::Products { sub } => match sub {
            ProductCommands::List {
                search,
                sort,
                page,
                per_page,
                plain,
            } => {
                let query = ProductListQuery {
                    search,
                    sort,
                    page,
                    per_page,
                };
                let products = client.list_products(&query).await?;
                let page = query.apply(&products);
                tracing::debug!(total = page.total, page = page.page, "Products fetched");

                if plain {
                    for p in &page.items {
                        println!(
                            "{}  {:>4}  {:<24}  {}",
                            p.id,
                            p.vote_count,
                            truncate_string(&p.name, 24),
                            truncate_string(&p.tagline, 48)
                        );
                    }
                    println!("page {}/{} ({} products)", page.page, page.total_pages, page.total);
                } else {
                    print_json(&page)?;
                }
            }
            ProductCommands::Get { id } => {
                let product = client.get_product(id).await?;
                print_json(&product)?;
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = MakersConfig::from_env()?;
    let json_logs = cli.json_logs || config.is_production();
    init_telemetry("info", json_logs, &config.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    let client = ApiClient::from_config(&config)
        .context("Failed to create API client. Set MAKERS_API_URL and MAKERS_API_TOKEN")?;

    if let Err(err) = run(cli.command, &config, &client).await {
        if let Some(app_error) = err.downcast_ref::<AppError>() {
            report_error(app_error);
            print_json(&ErrorResponse::from(app_error))?;
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
