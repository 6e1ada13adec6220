use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    extract::{Form, State},
    http::{header::HeaderName, HeaderValue},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use contact::{HttpRelayMailer, Mailer, MemoryMailer, Submission, Validator};
use shared::{
    error::RejectReason,
    feed::{CaseStudyFeed, TestimonialFeed},
};
use tower_http::{limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer};
use tracing::{error, info, warn};

mod config;
mod feeds;

use config::load_settings;

const MAX_FORM_BYTES: usize = 64 * 1024;

#[derive(Clone)]
struct AppState {
    catalog: Arc<shared::domain::Catalog>,
    validator: Arc<Validator>,
    mailer: Arc<dyn Mailer>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let data_dir = PathBuf::from(&settings.data_dir);
    let catalog = feeds::load_catalog(&data_dir).map_err(|error| {
        error!(
            data_dir = %data_dir.display(),
            %error,
            "failed to load feed data; refusing to start with a partial catalog"
        );
        error
    })?;

    let mailer = build_mailer(&settings)?;

    let state = AppState {
        catalog: Arc::new(catalog),
        validator: Arc::new(Validator::new(settings.contact_config())),
        mailer,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// A deployment without a relay refuses to start unless it explicitly
/// opts into the in-memory mailer; otherwise submissions would redirect
/// to the thank-you page while no mail ever leaves the process.
fn build_mailer(settings: &config::Settings) -> anyhow::Result<Arc<dyn Mailer>> {
    match &settings.relay_url {
        Some(url) => Ok(Arc::new(HttpRelayMailer::new(url.clone()))),
        None if settings.allow_memory_mailer => {
            warn!("no relay_url configured; deliveries are captured in memory only");
            Ok(Arc::new(MemoryMailer::new()))
        }
        None => anyhow::bail!(
            "no relay_url configured; set relay_url or allow_memory_mailer to run without one"
        ),
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/testimonials", get(testimonials_feed))
        .route("/api/case-studies", get(case_studies_feed))
        // Only POST submits; every other method lands on the same
        // `invalid` outcome the form page already understands.
        .route("/contact", post(submit_contact).fallback(contact_wrong_method))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(security_header(
            "x-content-type-options",
            "nosniff",
        ))
        .layer(security_header("x-frame-options", "DENY"))
        .layer(security_header("x-xss-protection", "1; mode=block"))
        .layer(security_header(
            "referrer-policy",
            "strict-origin-when-cross-origin",
        ))
        .with_state(state)
}

fn security_header(
    name: &'static str,
    value: &'static str,
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

async fn healthz() -> &'static str {
    "ok"
}

async fn testimonials_feed(State(state): State<Arc<AppState>>) -> Json<TestimonialFeed> {
    Json(TestimonialFeed {
        testimonials: state.catalog.testimonials().to_vec(),
    })
}

async fn case_studies_feed(State(state): State<Arc<AppState>>) -> Json<CaseStudyFeed> {
    Json(CaseStudyFeed {
        case_studies: state.catalog.case_studies().to_vec(),
    })
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<Submission>,
) -> Redirect {
    let email = match state.validator.evaluate(&submission) {
        Ok(email) => email,
        Err(rejection) => {
            info!(
                reason = rejection.reason.as_query_value(),
                errors = ?rejection.errors,
                "contact submission rejected"
            );
            return form_error(rejection.reason);
        }
    };

    match state.mailer.deliver(&email).await {
        Ok(()) => {
            info!(to = %email.to, "contact submission delivered");
            Redirect::to("/thank-you.html")
        }
        Err(error) => {
            error!(%error, "mail delivery failed");
            form_error(RejectReason::Server)
        }
    }
}

async fn contact_wrong_method() -> Redirect {
    form_error(RejectReason::Invalid)
}

fn form_error(reason: RejectReason) -> Redirect {
    Redirect::to(&format!("/contact.html?error={}", reason.as_query_value()))
}
