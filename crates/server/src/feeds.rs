use std::{fs, io, path::Path};

use anyhow::Context;
use shared::{
    domain::Catalog,
    feed::{CaseStudyFeed, TestimonialFeed},
};
use tracing::info;

/// Loads the feed files from the data directory. The testimonials feed
/// is mandatory; a missing case-studies feed just means the deployment
/// runs the variant without the case-study grid. No catalog is built at
/// all if either present file fails to parse.
pub fn load_catalog(data_dir: &Path) -> anyhow::Result<Catalog> {
    let testimonials_path = data_dir.join("testimonials.json");
    let raw = fs::read_to_string(&testimonials_path)
        .with_context(|| format!("failed to read {}", testimonials_path.display()))?;
    let testimonials: TestimonialFeed = serde_json::from_str(&raw)
        .with_context(|| format!("malformed feed {}", testimonials_path.display()))?;

    let case_studies_path = data_dir.join("case_studies.json");
    let case_studies = match fs::read_to_string(&case_studies_path) {
        Ok(raw) => {
            let feed: CaseStudyFeed = serde_json::from_str(&raw)
                .with_context(|| format!("malformed feed {}", case_studies_path.display()))?;
            feed.case_studies
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %case_studies_path.display(), "no case-studies feed; grid disabled");
            Vec::new()
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read {}", case_studies_path.display()))
        }
    };

    Ok(Catalog::new(testimonials.testimonials, case_studies))
}
