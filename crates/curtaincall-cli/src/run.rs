//! Command handlers: load the input files, curate each phase, render JSON.

use std::path::Path;

use anyhow::Context;
use curtaincall_core::{AppConfig, Phase, ShowInfo, TheatreConfig};
use curtaincall_places::{
    curate, AvailabilityOracle, CandidateSource, Curation, CurationRequest, GooglePlacesClient,
};
use serde::Serialize;

/// Run curation for `phases` and return the rendered JSON document.
///
/// # Errors
///
/// Returns an error if either input file cannot be loaded, a phase's request
/// is invalid, or the HTTP client cannot be built. Provider failures do not
/// error; they shrink the affected categories.
pub(crate) async fn run_curate(
    config: &AppConfig,
    theatre_path: &Path,
    show_path: &Path,
    phases: &[Phase],
    pretty: bool,
) -> anyhow::Result<String> {
    let theatre = curtaincall_core::load_theatre_config(theatre_path)
        .with_context(|| format!("failed to load theatre config {}", theatre_path.display()))?;
    let show = curtaincall_core::load_show(show_path)
        .with_context(|| format!("failed to load show file {}", show_path.display()))?;

    if config.places_api_key.is_none() {
        tracing::warn!("GOOGLE_PLACES_API_KEY not set, returning mock recommendations");
    }

    let client = GooglePlacesClient::new(config.places_timeout_secs, &config.user_agent)
        .context("failed to build places client")?
        .with_retries(config.places_max_retries, config.places_retry_backoff_ms);

    tracing::info!(
        theatre = theatre.theatre.name.as_deref().unwrap_or("unnamed"),
        show = show.title.as_deref().unwrap_or("untitled"),
        start = %show.start_time,
        end = %show.end_time,
        "curating recommendations"
    );

    let results = curate_phases(
        &theatre,
        &show,
        phases,
        config.places_api_key.as_deref(),
        &client,
        &client,
    )
    .await?;
    render(&results, pretty)
}

/// Render the checkpoints each phase's venues must be open at.
///
/// # Errors
///
/// Returns an error if the show file cannot be loaded.
pub(crate) fn run_checkpoints(show_path: &Path, phases: &[Phase]) -> anyhow::Result<String> {
    let show = curtaincall_core::load_show(show_path)
        .with_context(|| format!("failed to load show file {}", show_path.display()))?;

    let lines: Vec<String> = phases
        .iter()
        .flat_map(|&phase| {
            show.checkpoints(phase)
                .into_iter()
                .map(move |at| format!("{phase}\t{}", at.format("%Y-%m-%d %H:%M")))
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Curate each phase in turn with that phase's categories and checkpoints.
pub(crate) async fn curate_phases<S, O>(
    theatre: &TheatreConfig,
    show: &ShowInfo,
    phases: &[Phase],
    api_key: Option<&str>,
    source: &S,
    oracle: &O,
) -> anyhow::Result<Vec<(Phase, Curation)>>
where
    S: CandidateSource + ?Sized,
    O: AvailabilityOracle + ?Sized,
{
    let mut results = Vec::with_capacity(phases.len());
    for &phase in phases {
        let request = CurationRequest::with_shared_checkpoints(
            theatre.theatre.location,
            theatre.radius(),
            theatre.categories(phase),
            &show.checkpoints(phase),
            theatre.lists.clone(),
            api_key.map(str::to_string),
        )
        .with_context(|| format!("invalid {phase} request"))?;

        let curation = curate(&request, source, oracle).await;
        results.push((phase, curation));
    }
    Ok(results)
}

/// Output document: one key per curated phase.
#[derive(Debug, Default, Serialize)]
struct Rendered<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pre_show: Option<&'a Curation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_show: Option<&'a Curation>,
}

/// Render `{"pre_show": [...], "post_show": [...]}` for the phases present.
pub(crate) fn render(results: &[(Phase, Curation)], pretty: bool) -> anyhow::Result<String> {
    let mut document = Rendered::default();
    for (phase, curation) in results {
        match phase {
            Phase::PreShow => document.pre_show = Some(curation),
            Phase::PostShow => document.post_show = Some(curation),
        }
    }
    let rendered = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    rendered.context("failed to render output")
}
