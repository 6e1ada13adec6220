//! Headless carousel demo: fetches the feeds from a running server,
//! rotates testimonials in the terminal, and takes line-based navigation
//! commands on stdin.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use carousel::{Carousel, CarouselOptions, Renderer, TokioRotation};
use clap::Parser;
use reqwest::StatusCode;
use shared::{
    domain::{CaseStudy, Catalog, Sector, Testimonial},
    feed::{CaseStudyFeed, TestimonialFeed},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: String,
    #[arg(long, default_value = "Technology")]
    sector: String,
    #[arg(long, default_value_t = 6000)]
    rotation_ms: u64,
    #[arg(long)]
    no_case_studies: bool,
}

struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn highlight_sector(&mut self, sector: &Sector) {
        println!("== {sector} ==");
    }

    fn show_testimonial(&mut self, testimonial: &Testimonial) {
        println!(
            "\"{}\"\n  - {}, {}, {}",
            testimonial.quote, testimonial.name, testimonial.title, testimonial.company
        );
    }

    fn clear_testimonial(&mut self) {
        println!("(no testimonials for this sector)");
    }

    fn rebuild_indicators(&mut self, count: usize, active: usize) {
        if count > 0 {
            let strip: String = (0..count).map(|i| if i == active { '*' } else { 'o' }).collect();
            println!("  [{strip}]");
        }
    }

    fn show_case_studies(&mut self, studies: &[&CaseStudy]) {
        for cs in studies {
            println!("  case study: {} ({}, {})", cs.title, cs.event, cs.location);
        }
    }

    fn show_case_study_placeholder(&mut self) {
        println!("  No case studies available for this sector.");
    }
}

async fn fetch_catalog(base: &str) -> Result<Catalog> {
    let client = reqwest::Client::new();
    let testimonials: TestimonialFeed = client
        .get(format!("{base}/api/testimonials"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("testimonials feed")?;

    let case_studies = match client.get(format!("{base}/api/case-studies")).send().await {
        Ok(resp) if resp.status() == StatusCode::NOT_FOUND => Vec::new(),
        Ok(resp) => {
            resp.error_for_status()?
                .json::<CaseStudyFeed>()
                .await
                .context("case-studies feed")?
                .case_studies
        }
        Err(err) => return Err(err).context("case-studies feed"),
    };

    Ok(Catalog::new(testimonials.testimonials, case_studies))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // A failed or partial fetch aborts before any carousel state exists.
    let catalog = Arc::new(fetch_catalog(&args.server_url).await?);
    let options = CarouselOptions {
        default_sector: Sector::new(args.sector.as_str()),
        rotation_period: Duration::from_millis(args.rotation_ms),
        case_studies_enabled: !args.no_case_studies && catalog.has_case_studies(),
    };

    let (timer, mut ticks) = TokioRotation::new(options.rotation_period);
    let mut carousel = Carousel::new(catalog, options, TerminalRenderer, timer);

    println!("commands: n(ext), p(rev), <index>, s <sector>, q(uit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            tick = ticks.recv() => {
                if tick.is_none() {
                    break;
                }
                carousel.auto_advance_tick();
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" => {}
                    "q" => break,
                    "n" => carousel.next(),
                    "p" => carousel.previous(),
                    input => {
                        if let Ok(index) = input.parse::<usize>() {
                            carousel.select_index(index);
                        } else if let Some(sector) = input.strip_prefix("s ") {
                            carousel.select_sector(Sector::new(sector.trim()));
                        } else {
                            warn!(input, "unrecognized command");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
