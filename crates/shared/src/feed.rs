//! JSON feed envelopes, kept byte-compatible with the data files the
//! site front end already consumes.

use serde::{Deserialize, Serialize};

use crate::domain::{CaseStudy, Testimonial};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialFeed {
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudyFeed {
    #[serde(rename = "caseStudies")]
    pub case_studies: Vec<CaseStudy>,
}
