// Layout orchestration: picks a placement strategy from the campaign's
// layout style and runs the pipeline.

use tracing::debug;

use crate::config::EngineConfig;
use crate::sponsor::{Container, LayoutConfig, LayoutStyle, SponsorRecord};

use super::filter::filter_with;
use super::grid::{assign, assign_claimed, GridAssignment};
use super::rank::rank;
use super::size::{SizeCalculator, TextMeasurer};
use super::spiral::SpiralPlacer;
use super::variant::resolve_variant;
use super::{Layout, PlacedSponsor, Placement, Strategy};

/// Stateless layout engine. Holds only tuning parameters, so one instance
/// can serve any number of render calls.
pub struct LayoutEngine {
    config: EngineConfig,
    sizes: SizeCalculator,
    spiral: SpiralPlacer,
}

impl LayoutEngine {
    pub fn new(config: EngineConfig) -> Self {
        let sizes = SizeCalculator::new(config.sizing.clone(), config.tiers.clone());
        let spiral = SpiralPlacer::new(config.spiral.clone());
        LayoutEngine {
            config,
            sizes,
            spiral,
        }
    }

    /// Use a renderer-supplied text measurer instead of the glyph-count
    /// estimate.
    pub fn with_measurer(config: EngineConfig, measurer: Box<dyn TextMeasurer>) -> Self {
        let sizes =
            SizeCalculator::with_measurer(config.sizing.clone(), config.tiers.clone(), measurer);
        let spiral = SpiralPlacer::new(config.spiral.clone());
        LayoutEngine {
            config,
            sizes,
            spiral,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sizes(&self) -> &SizeCalculator {
        &self.sizes
    }

    /// Compute placements for one render of a campaign page.
    pub fn render(
        &self,
        sponsors: &[SponsorRecord],
        layout: &LayoutConfig,
        container: Container,
    ) -> Layout {
        let display = layout.sponsor_display_type;
        let eligible = filter_with(sponsors, display, &self.config.filter);
        debug!(
            "render {:?}: {} of {} sponsors eligible",
            layout.layout_style,
            eligible.len(),
            sponsors.len()
        );

        match layout.layout_style {
            LayoutStyle::Grid => {
                let positions = layout.grid_positions();
                self.grid_layout(assign_claimed(&eligible, &positions), layout)
            }
            LayoutStyle::SizeOrdered => self.flow_layout(self.ranked(eligible, layout), layout),
            LayoutStyle::WordCloud => self.word_cloud(&eligible, layout, container),
            LayoutStyle::AmountOrdered => self.amount_ordered(eligible, layout),
            LayoutStyle::Unknown => {
                debug!("unrecognized layout style, rendering as amount-ordered");
                self.amount_ordered(eligible, layout)
            }
        }
    }

    fn ranked(&self, sponsors: Vec<SponsorRecord>, layout: &LayoutConfig) -> Vec<SponsorRecord> {
        // Unknown styles rank like amount-ordered.
        rank(
            sponsors,
            layout.campaign_type,
            layout.layout_style,
            &self.sizes,
            layout.sponsor_display_type,
        )
    }

    fn amount_ordered(&self, sponsors: Vec<SponsorRecord>, layout: &LayoutConfig) -> Layout {
        let ranked = self.ranked(sponsors, layout);
        if layout.has_grid() {
            let positions = layout.grid_positions();
            self.grid_layout(assign(&ranked, &positions), layout)
        } else {
            self.flow_layout(ranked, layout)
        }
    }

    fn grid_layout(&self, assignment: GridAssignment, layout: &LayoutConfig) -> Layout {
        let display = layout.sponsor_display_type;
        let available_positions = assignment.available().cloned().collect();
        let placed = assignment
            .slots
            .into_iter()
            .filter_map(|slot| {
                let sponsor = slot.sponsor?;
                let variant = resolve_variant(&sponsor, display);
                Some(PlacedSponsor::new(
                    sponsor,
                    variant,
                    Placement::Slot {
                        position_id: slot.position.position_id,
                        section: slot.position.section,
                    },
                ))
            })
            .collect();
        Layout {
            strategy: Strategy::Grid,
            placed,
            available_positions,
        }
    }

    fn flow_layout(&self, ranked: Vec<SponsorRecord>, layout: &LayoutConfig) -> Layout {
        let display = layout.sponsor_display_type;
        let placed = ranked
            .into_iter()
            .enumerate()
            .map(|(i, sponsor)| {
                let variant = resolve_variant(&sponsor, display);
                PlacedSponsor::new(sponsor, variant, Placement::Flow { rank: i + 1 })
            })
            .collect();
        Layout {
            placed,
            ..Layout::empty(Strategy::Flow)
        }
    }

    fn word_cloud(
        &self,
        sponsors: &[SponsorRecord],
        layout: &LayoutConfig,
        container: Container,
    ) -> Layout {
        let placed = self
            .spiral
            .place(sponsors, &self.sizes, layout.sponsor_display_type, container)
            .into_iter()
            .map(|p| {
                PlacedSponsor::new(
                    p.sponsor,
                    p.variant,
                    Placement::Point {
                        x: p.rect.x,
                        y: p.rect.y,
                        width: p.rect.width,
                        height: p.rect.height,
                        fallback: p.fallback,
                    },
                )
            })
            .collect();
        Layout {
            placed,
            ..Layout::empty(Strategy::WordCloud)
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        LayoutEngine::new(EngineConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
