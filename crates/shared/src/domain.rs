use serde::{Deserialize, Serialize};

/// Sector tag on testimonials and case studies. The set is open; new
/// sectors appear whenever the data files gain one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sector(pub String);

impl Sector {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sector {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub sector: Sector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub event: String,
    pub location: String,
    pub client: String,
    pub attendees: String,
    pub duration: String,
    pub challenge: String,
    pub solution: String,
    pub results: Vec<String>,
    pub services: Vec<String>,
    pub sector: Sector,
}

/// The full data set for one page session. Loaded once; immutable after.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    testimonials: Vec<Testimonial>,
    case_studies: Vec<CaseStudy>,
}

impl Catalog {
    pub fn new(testimonials: Vec<Testimonial>, case_studies: Vec<CaseStudy>) -> Self {
        Self {
            testimonials,
            case_studies,
        }
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn case_studies(&self) -> &[CaseStudy] {
        &self.case_studies
    }

    pub fn testimonials_for(&self, sector: &Sector) -> Vec<&Testimonial> {
        self.testimonials
            .iter()
            .filter(|t| &t.sector == sector)
            .collect()
    }

    pub fn case_studies_for(&self, sector: &Sector) -> Vec<&CaseStudy> {
        self.case_studies
            .iter()
            .filter(|cs| &cs.sector == sector)
            .collect()
    }

    pub fn has_case_studies(&self) -> bool {
        !self.case_studies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testimonial(sector: &str, name: &str) -> Testimonial {
        Testimonial {
            quote: "quote".into(),
            name: name.into(),
            title: "CTO".into(),
            company: "Acme".into(),
            sector: sector.into(),
        }
    }

    #[test]
    fn filters_testimonials_by_sector() {
        let catalog = Catalog::new(
            vec![
                testimonial("Technology", "a"),
                testimonial("Finance", "b"),
                testimonial("Technology", "c"),
            ],
            vec![],
        );

        let tech = catalog.testimonials_for(&"Technology".into());
        assert_eq!(tech.len(), 2);
        assert_eq!(tech[0].name, "a");
        assert_eq!(tech[1].name, "c");
        assert!(catalog.testimonials_for(&"Retail".into()).is_empty());
    }

    #[test]
    fn sector_serializes_as_plain_string() {
        let json = serde_json::to_string(&Sector::new("Technology")).expect("serialize");
        assert_eq!(json, "\"Technology\"");
    }
}
