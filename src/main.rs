use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use finsight::application::services::{AnswerPipeline, UploadService};
use finsight::infrastructure::llm::WatsonxClient;
use finsight::infrastructure::observability::{TracingConfig, init_tracing};
use finsight::infrastructure::text_processing::{
    FormatDispatcher, OcrExtractor, PdfiumRasterizer, TabularPreviewer, TesseractEngine,
};
use finsight::presentation::config::SettingsError;
use finsight::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(SettingsError::Environment)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging))
        .context("Failed to initialize tracing")?;

    let extraction = &settings.extraction;
    let ocr_engine = Arc::new(TesseractEngine::new(
        extraction.tesseract_cmd.clone(),
        extraction.ocr_language.clone(),
        Duration::from_secs(extraction.ocr_timeout_secs),
    ));
    let rasterizer = Arc::new(PdfiumRasterizer::new(
        extraction.pdfium_library_path.clone(),
        extraction.render_dpi,
    ));
    let dispatcher = Arc::new(FormatDispatcher::with_loaders(
        Arc::new(OcrExtractor::new(ocr_engine, rasterizer)),
        Arc::new(TabularPreviewer::new(extraction.max_preview_rows)),
    ));

    let llm_client = Arc::new(
        WatsonxClient::new(settings.watsonx.clone()).context("Failed to build watsonx client")?,
    );

    let state = AppState::new(
        UploadService::new(dispatcher, extraction.max_preview_chars),
        AnswerPipeline::new(llm_client, settings.watsonx.system_prompt.clone()),
    );

    let router = create_router(state, &settings.server);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port")?;
    tracing::info!(
        %addr,
        model_id = %settings.watsonx.model_id,
        mode = ?settings.watsonx.mode,
        cors_origins = ?settings.server.cors_origins,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
