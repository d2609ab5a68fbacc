//! Pre-flight validation of provider configuration.
//!
//! Each validator returns a checklist plus, when every check passed, the
//! client it built along the way so the run can reuse it.

use crate::{
    AiProvider, ImagenClient, ImagenSettings, TextSettings, VeoClient, VeoSettings, VertexAuth,
    build_text_generator,
};
use lumina_interface::{PreflightReport, TextGenerator};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Validate the text provider and build its client.
pub fn validate_text_provider(
    settings: &TextSettings,
) -> (PreflightReport, Option<Arc<dyn TextGenerator>>) {
    let mut report = PreflightReport::new(settings.provider().to_string());

    let (has_key, variable) = match settings.provider() {
        AiProvider::Gemini => (settings.gemini_api_key().is_some(), "GEMINI_API_KEY"),
        AiProvider::OpenAi => (settings.openai_key().is_some(), "OPENAI_KEY"),
    };
    if !has_key {
        report.fail("Configuration", format!("{} not set", variable));
        return (report, None);
    }
    report.pass("Configuration", format!("{} set", variable));

    match build_text_generator(settings) {
        Ok(generator) => {
            report.pass(
                "Client",
                format!("{} client for {}", generator.provider_name(), generator.model_name()),
            );
            (report, Some(generator))
        }
        Err(e) => {
            report.fail("Client", e.to_string());
            (report, None)
        }
    }
}

/// Validate the Veo backend: configuration, client, API access and, on
/// Vertex, the output bucket.
#[instrument(skip(settings), fields(mode = settings.mode_label()))]
pub async fn validate_veo(settings: &VeoSettings) -> (PreflightReport, Option<VeoClient>) {
    let mut report = PreflightReport::new(settings.mode_label());

    let missing: Vec<&str> = if *settings.use_vertex() {
        let vertex = settings.vertex();
        [
            (vertex.project().is_none(), "VERTEX_PROJECT"),
            (vertex.gcs_bucket().is_none(), "VERTEX_GCS_BUCKET"),
        ]
        .into_iter()
        .filter_map(|(absent, name)| absent.then_some(name))
        .collect()
    } else if settings.api_key().is_none() {
        vec!["VEO_API_KEY"]
    } else {
        Vec::new()
    };
    if !missing.is_empty() {
        report.fail("Configuration", format!("missing {}", missing.join(", ")));
        return (report, None);
    }
    report.pass("Configuration", format!("model {}", settings.model()));

    let client = match VeoClient::from_settings(settings).await {
        Ok(client) => {
            report.pass("Client", "client created");
            client
        }
        Err(e) => {
            report.fail("Client", e.to_string());
            return (report, None);
        }
    };

    match client.check_access().await {
        Ok(()) => report.pass("API access", format!("{} reachable", client.model_name())),
        Err(e) => {
            report.fail("API access", e.to_string());
            return (report, None);
        }
    }

    if let (Some(gcs), Some(bucket), Some(project)) = (
        client.gcs(),
        settings.vertex().gcs_bucket(),
        settings.vertex().project(),
    ) {
        let bucket_ready = match gcs.bucket_exists(bucket).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(bucket = %bucket, "Output bucket missing; creating it");
                gcs.create_bucket(project, bucket, settings.vertex().location())
                    .await
            }
            Err(e) => Err(e),
        };
        let outcome = match bucket_ready {
            Ok(()) => gcs.probe_write(bucket).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => report.pass("GCS bucket", format!("{} writable", bucket)),
            Err(e) => {
                report.fail("GCS bucket", e.to_string());
                return (report, None);
            }
        }
    }

    info!("Veo pre-flight checks passed");
    (report, Some(client))
}

/// Validate Imagen: project configured and Vertex credentials usable.
#[instrument(skip(settings))]
pub async fn validate_imagen(settings: &ImagenSettings) -> (PreflightReport, Option<ImagenClient>) {
    let mut report = PreflightReport::new("vertex_ai");

    if settings.vertex().project().is_none() {
        report.fail("Configuration", "missing VERTEX_PROJECT");
        return (report, None);
    }
    report.pass("Configuration", format!("model {}", settings.model()));

    let auth = match VertexAuth::discover().await {
        Ok(auth) => auth,
        Err(e) => {
            report.fail("Credentials", e.to_string());
            return (report, None);
        }
    };
    if let Err(e) = auth.bearer().await {
        report.fail("Credentials", e.to_string());
        return (report, None);
    }
    report.pass("Credentials", "access token obtained");

    match ImagenClient::new(settings, auth) {
        Ok(client) => {
            report.pass("Client", "client created");
            (report, Some(client))
        }
        Err(e) => {
            report.fail("Client", e.to_string());
            (report, None)
        }
    }
}
