//! Sector carousel controller: one testimonial visible at a time, scoped
//! to the selected sector, with manual navigation, swipe gestures, and a
//! restartable auto-advance timer.
//!
//! The controller owns its state outright; the display layer sits behind
//! the [`Renderer`] trait and the timer behind [`RotationTimer`], so the
//! transition logic is testable without any UI attached.

use std::sync::Arc;
use std::time::Duration;

use shared::domain::{CaseStudy, Catalog, Sector, Testimonial};
use tracing::debug;

pub mod rotation;
pub mod swipe;

pub use rotation::{ManualRotation, RotationTicks, RotationTimer, TokioRotation};
pub use swipe::{SwipeDirection, SwipeTracker, DEFAULT_SWIPE_THRESHOLD};

/// Observed rotation period of the production site.
pub const DEFAULT_ROTATION_PERIOD: Duration = Duration::from_millis(6000);

/// Display seam. Every method has a no-op default so a renderer backed by
/// a page missing one of the regions simply skips it; absence of a target
/// degrades that region, never the whole controller.
pub trait Renderer {
    fn highlight_sector(&mut self, _sector: &Sector) {}
    fn show_testimonial(&mut self, _testimonial: &Testimonial) {}
    fn clear_testimonial(&mut self) {}
    fn rebuild_indicators(&mut self, _count: usize, _active: usize) {}
    fn show_case_studies(&mut self, _studies: &[&CaseStudy]) {}
    fn show_case_study_placeholder(&mut self) {}
}

/// Renderer that displays nothing. Useful for driving the state machine
/// headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

#[derive(Debug, Clone)]
pub struct CarouselOptions {
    pub default_sector: Sector,
    pub rotation_period: Duration,
    pub case_studies_enabled: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            default_sector: Sector::new("Technology"),
            rotation_period: DEFAULT_ROTATION_PERIOD,
            case_studies_enabled: true,
        }
    }
}

/// Carousel state plus its collaborators. `sector` and `index` are only
/// mutated through the transition methods below; `index` is always valid
/// for the current sector's filtered set, or the set is empty and no
/// testimonial is shown.
pub struct Carousel<R: Renderer, T: RotationTimer> {
    catalog: Arc<Catalog>,
    options: CarouselOptions,
    sector: Sector,
    index: usize,
    renderer: R,
    timer: T,
}

impl<R: Renderer, T: RotationTimer> Carousel<R, T> {
    /// Builds the controller over a fully loaded catalog, renders the
    /// default sector, and starts the auto-advance timer. Callers must
    /// not construct a carousel from a partially loaded data set; a
    /// failed fetch aborts page initialization upstream instead.
    pub fn new(catalog: Arc<Catalog>, options: CarouselOptions, renderer: R, timer: T) -> Self {
        let sector = options.default_sector.clone();
        let mut carousel = Self {
            catalog,
            options,
            sector,
            index: 0,
            renderer,
            timer,
        };
        carousel.render_sector();
        carousel.timer.restart();
        carousel
    }

    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The testimonial currently on display, if the sector has any.
    pub fn current(&self) -> Option<&Testimonial> {
        self.catalog
            .testimonials_for(&self.sector)
            .get(self.index)
            .copied()
    }

    fn count(&self) -> usize {
        self.catalog.testimonials_for(&self.sector).len()
    }

    /// Switches sector, resetting the index to 0. An empty filtered set
    /// leaves the stage blank rather than erroring.
    pub fn select_sector(&mut self, sector: Sector) {
        debug!(sector = %sector, "switching sector");
        self.sector = sector;
        self.index = 0;
        self.render_sector();
        self.timer.restart();
    }

    pub fn next(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        self.index = (self.index + 1) % count;
        self.render_testimonial();
        self.timer.restart();
    }

    pub fn previous(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        self.index = (self.index + count - 1) % count;
        self.render_testimonial();
        self.timer.restart();
    }

    /// Jump straight to an indicator's testimonial. Out-of-range indices
    /// are ignored silently.
    pub fn select_index(&mut self, index: usize) {
        if index >= self.count() {
            return;
        }
        self.index = index;
        self.render_testimonial();
        self.timer.restart();
    }

    /// Timer callback. Behaves like [`Self::next`], except the timer is
    /// restarted even when the sector is empty, so the fixed period keeps
    /// counting from the last tick rather than stalling.
    pub fn auto_advance_tick(&mut self) {
        if self.count() == 0 {
            self.timer.restart();
            return;
        }
        self.next();
    }

    /// Resolves a completed swipe gesture onto the same transitions the
    /// buttons and indicators use.
    pub fn apply_swipe(&mut self, direction: SwipeDirection) {
        match direction {
            SwipeDirection::Next => self.next(),
            SwipeDirection::Previous => self.previous(),
        }
    }

    /// Full redraw: tab highlight, testimonial stage, indicator strip,
    /// and (when enabled) the case-study grid for the current sector.
    fn render_sector(&mut self) {
        self.renderer.highlight_sector(&self.sector);
        self.render_testimonial();
        if self.options.case_studies_enabled {
            let studies = self.catalog.case_studies_for(&self.sector);
            if studies.is_empty() {
                self.renderer.show_case_study_placeholder();
            } else {
                self.renderer.show_case_studies(&studies);
            }
        }
    }

    fn render_testimonial(&mut self) {
        let filtered = self.catalog.testimonials_for(&self.sector);
        match filtered.get(self.index) {
            Some(testimonial) => {
                self.renderer.show_testimonial(testimonial);
                self.renderer.rebuild_indicators(filtered.len(), self.index);
            }
            None => {
                self.renderer.clear_testimonial();
                self.renderer.rebuild_indicators(0, 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        highlighted: Vec<Sector>,
        shown: Vec<String>,
        cleared: usize,
        indicators: Vec<(usize, usize)>,
        case_study_titles: Vec<Vec<String>>,
        placeholders: usize,
    }

    impl Renderer for RecordingRenderer {
        fn highlight_sector(&mut self, sector: &Sector) {
            self.highlighted.push(sector.clone());
        }

        fn show_testimonial(&mut self, testimonial: &Testimonial) {
            self.shown.push(testimonial.name.clone());
        }

        fn clear_testimonial(&mut self) {
            self.cleared += 1;
        }

        fn rebuild_indicators(&mut self, count: usize, active: usize) {
            self.indicators.push((count, active));
        }

        fn show_case_studies(&mut self, studies: &[&CaseStudy]) {
            self.case_study_titles
                .push(studies.iter().map(|cs| cs.title.clone()).collect());
        }

        fn show_case_study_placeholder(&mut self) {
            self.placeholders += 1;
        }
    }

    #[derive(Default)]
    struct RecordingTimer {
        restarts: usize,
    }

    impl RotationTimer for RecordingTimer {
        fn restart(&mut self) {
            self.restarts += 1;
        }

        fn cancel(&mut self) {}
    }

    fn testimonial(sector: &str, name: &str) -> Testimonial {
        Testimonial {
            quote: format!("{name} says"),
            name: name.into(),
            title: "Director".into(),
            company: "Acme".into(),
            sector: sector.into(),
        }
    }

    fn case_study(sector: &str, title: &str) -> CaseStudy {
        CaseStudy {
            title: title.into(),
            event: "Summit".into(),
            location: "Atlanta".into(),
            client: "Acme".into(),
            attendees: "1,200".into(),
            duration: "3 days".into(),
            challenge: "tight schedule".into(),
            solution: "more crew".into(),
            results: vec!["on time".into()],
            services: vec!["staging".into()],
            sector: sector.into(),
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(
            vec![
                testimonial("Technology", "alice"),
                testimonial("Technology", "bob"),
                testimonial("Technology", "carol"),
                testimonial("Finance", "dave"),
            ],
            vec![case_study("Technology", "launch"), case_study("Finance", "ipo")],
        ))
    }

    fn carousel() -> Carousel<RecordingRenderer, RecordingTimer> {
        Carousel::new(
            catalog(),
            CarouselOptions::default(),
            RecordingRenderer::default(),
            RecordingTimer::default(),
        )
    }

    #[test]
    fn initial_render_shows_first_default_sector_testimonial() {
        let carousel = carousel();
        assert_eq!(carousel.sector().as_str(), "Technology");
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.renderer.shown, vec!["alice"]);
        assert_eq!(carousel.renderer.indicators, vec![(3, 0)]);
        assert_eq!(carousel.renderer.case_study_titles, vec![vec!["launch"]]);
        assert_eq!(carousel.timer.restarts, 1);
    }

    #[test]
    fn next_and_previous_wrap_modulo_count() {
        let mut carousel = carousel();
        carousel.next();
        assert_eq!(carousel.index(), 1);
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.previous();
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.current().map(|t| t.name.as_str()), Some("carol"));
    }

    #[test]
    fn select_index_jumps_when_in_range_and_ignores_out_of_range() {
        let mut carousel = carousel();
        carousel.select_index(2);
        assert_eq!(carousel.index(), 2);
        let restarts = carousel.timer.restarts;
        carousel.select_index(3);
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.timer.restarts, restarts);
    }

    #[test]
    fn switching_sector_resets_index_and_restarts_timer() {
        let mut carousel = carousel();
        carousel.next();
        carousel.next();
        let restarts = carousel.timer.restarts;
        carousel.select_sector("Finance".into());
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.current().map(|t| t.name.as_str()), Some("dave"));
        assert_eq!(carousel.timer.restarts, restarts + 1);
        assert_eq!(
            carousel.renderer.highlighted.last().map(Sector::as_str),
            Some("Finance")
        );
    }

    #[test]
    fn empty_sector_renders_nothing_and_navigation_is_noop() {
        let mut carousel = carousel();
        carousel.select_sector("Retail".into());
        assert_eq!(carousel.renderer.cleared, 1);
        assert_eq!(carousel.renderer.indicators.last(), Some(&(0, 0)));
        assert_eq!(carousel.renderer.placeholders, 1);
        assert!(carousel.current().is_none());

        let shown = carousel.renderer.shown.len();
        let restarts = carousel.timer.restarts;
        carousel.next();
        carousel.previous();
        carousel.select_index(0);
        assert_eq!(carousel.renderer.shown.len(), shown);
        assert_eq!(carousel.timer.restarts, restarts);
    }

    #[test]
    fn auto_advance_tick_matches_next_and_always_restarts() {
        let mut carousel = carousel();
        carousel.auto_advance_tick();
        assert_eq!(carousel.index(), 1);

        carousel.select_sector("Retail".into());
        let restarts = carousel.timer.restarts;
        carousel.auto_advance_tick();
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.timer.restarts, restarts + 1);
    }

    #[test]
    fn swipe_resolves_to_the_shared_transitions() {
        let mut carousel = carousel();
        carousel.apply_swipe(SwipeDirection::Next);
        assert_eq!(carousel.index(), 1);
        carousel.apply_swipe(SwipeDirection::Previous);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn sector_without_case_studies_gets_placeholder() {
        let catalog = Arc::new(Catalog::new(
            vec![testimonial("Healthcare", "erin")],
            vec![case_study("Technology", "launch")],
        ));
        let carousel = Carousel::new(
            catalog,
            CarouselOptions {
                default_sector: "Healthcare".into(),
                ..CarouselOptions::default()
            },
            RecordingRenderer::default(),
            RecordingTimer::default(),
        );
        assert_eq!(carousel.renderer.placeholders, 1);
        assert!(carousel.renderer.case_study_titles.is_empty());
    }

    #[test]
    fn case_studies_disabled_renders_no_grid() {
        let carousel = Carousel::new(
            catalog(),
            CarouselOptions {
                case_studies_enabled: false,
                ..CarouselOptions::default()
            },
            RecordingRenderer::default(),
            RecordingTimer::default(),
        );
        assert!(carousel.renderer.case_study_titles.is_empty());
        assert_eq!(carousel.renderer.placeholders, 0);
    }
}
