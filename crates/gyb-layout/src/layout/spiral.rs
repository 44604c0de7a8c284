// Word-cloud placement.
//
// Sponsors are placed greedily, largest first, by walking an expanding
// elliptical spiral out from the cloud center until a spot is found that
// clears every previously placed box by `padding`. Placed boxes are never
// moved again.
//
// The radius jitter is a sine of the attempt index, so identical input
// always produces identical coordinates.

use tracing::{debug, warn};

use crate::config::SpiralConfig;
use crate::sponsor::{Container, SponsorDisplayType, SponsorRecord};

use super::rank::by_footprint_desc;
use super::size::{BoxSize, SizeCalculator};
use super::variant::{resolve_variant, Variant};
use super::Rect;

/// A sponsor with its word-cloud box.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralPlacement {
    pub sponsor: SponsorRecord,
    pub variant: Variant,
    pub rect: Rect,
    /// The attempt budget ran out and the deterministic fallback spot was
    /// used; this box may overlap others.
    pub fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SpiralPlacer {
    config: SpiralConfig,
}

impl SpiralPlacer {
    pub fn new(config: SpiralConfig) -> Self {
        SpiralPlacer { config }
    }

    pub fn config(&self) -> &SpiralConfig {
        &self.config
    }

    /// Place every sponsor inside `container`, in footprint-descending
    /// order. The output is in placement order and always has one entry
    /// per input sponsor.
    pub fn place(
        &self,
        sponsors: &[SponsorRecord],
        sizes: &SizeCalculator,
        display: SponsorDisplayType,
        container: Container,
    ) -> Vec<SpiralPlacement> {
        if sponsors.is_empty() {
            return Vec::new();
        }

        let ordered = by_footprint_desc(sponsors.to_vec(), sizes, display);
        let boxes: Vec<(Variant, BoxSize)> = ordered
            .iter()
            .map(|s| {
                let variant = resolve_variant(s, display);
                (variant, sizes.size_for_variant(s, variant))
            })
            .collect();

        let largest = boxes.iter().map(|(_, b)| b.max_side()).fold(0.0, f64::max);
        let center = (
            container.width / 2.0,
            container.height * self.center_y_fraction(largest),
        );

        let mut placed: Vec<Rect> = Vec::with_capacity(ordered.len());
        let mut result = Vec::with_capacity(ordered.len());
        let mut fallbacks = 0usize;

        for (index, (sponsor, (variant, size))) in ordered.into_iter().zip(boxes).enumerate() {
            let (rect, fallback) = match self.search(size, center, container, &placed) {
                Some(rect) => (rect, false),
                None => {
                    fallbacks += 1;
                    warn!(
                        "no free spot for sponsor '{}' after {} attempts, using fallback position",
                        sponsor.id, self.config.max_attempts
                    );
                    (self.fallback_rect(index, size, center, container), true)
                }
            };
            placed.push(rect);
            result.push(SpiralPlacement {
                sponsor,
                variant,
                rect,
                fallback,
            });
        }

        debug!(
            "word cloud: placed {} sponsors in {}x{} ({} fallback)",
            result.len(),
            container.width,
            container.height,
            fallbacks
        );
        result
    }

    /// Vertical position of the cloud center as a fraction of the container
    /// height. Larger boxes need more headroom, so the center drops from
    /// `center_y_min` toward `center_y_max` as the largest box grows.
    pub fn center_y_fraction(&self, largest_side: f64) -> f64 {
        let c = &self.config;
        let t = ((largest_side - c.center_size_low) / (c.center_size_high - c.center_size_low))
            .clamp(0.0, 1.0);
        c.center_y_min + (c.center_y_max - c.center_y_min) * t
    }

    /// Spiral offset (dx, dy) for attempt `k`.
    pub fn spiral_offset(&self, k: usize) -> (f64, f64) {
        let c = &self.config;
        let k = k as f64;
        let angle = k * c.angle_step;
        let radius = c.base_radius
            + k * c.radius_step
            + c.jitter_amplitude * (k * c.jitter_frequency).sin();
        (
            radius * angle.cos(),
            radius * angle.sin() * c.vertical_compression,
        )
    }

    fn search(
        &self,
        size: BoxSize,
        center: (f64, f64),
        container: Container,
        placed: &[Rect],
    ) -> Option<Rect> {
        (0..self.config.max_attempts).find_map(|k| {
            let (dx, dy) = self.spiral_offset(k);
            let rect = self.box_at(center.0 + dx, center.1 + dy, size, container);
            let free = placed
                .iter()
                .all(|other| !rect.overlaps(other, self.config.padding));
            free.then_some(rect)
        })
    }

    fn fallback_rect(
        &self,
        index: usize,
        size: BoxSize,
        center: (f64, f64),
        container: Container,
    ) -> Rect {
        let c = &self.config;
        let i = index as f64;
        let angle = i * c.fallback_angle_step;
        let radius = i * c.fallback_radius_step;
        self.box_at(
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin() * c.vertical_compression,
            size,
            container,
        )
    }

    /// Box of `size` centred on (cx, cy), with the centre clamped so the box
    /// stays inside the container margins.
    fn box_at(&self, cx: f64, cy: f64, size: BoxSize, container: Container) -> Rect {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        let cx = clamp_axis(cx, half_w, self.config.margin_x, container.width);
        let cy = clamp_axis(cy, half_h, self.config.margin_y, container.height);
        Rect::new(cx - half_w, cy - half_h, size.width, size.height)
    }
}

/// Clamp a centre coordinate into `[margin + half, extent - margin - half]`.
/// Boxes larger than the span are centred on the axis.
fn clamp_axis(value: f64, half: f64, margin: f64, extent: f64) -> f64 {
    let lo = margin + half;
    let hi = extent - margin - half;
    if lo > hi {
        extent / 2.0
    } else {
        value.clamp(lo, hi)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
