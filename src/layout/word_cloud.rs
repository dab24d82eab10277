//! Word cloud layout.
//!
//! Words get a font size from a linear frequency scale, then a fixed
//! 100-pass relaxation spreads them: weak per-axis pulls toward the canvas
//! middle plus collision sized to each word's visual footprint. No alpha
//! cooling — the budget is the termination.
//!
//! The footprint formula (font size plus a margin) is a presentation
//! choice, not an engine invariant, so it is a pluggable function on the
//! config rather than a constant.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::force::{CollideForce, Force, PositionForce};
use crate::geometry::Extent;
use crate::graph::{InitialPlacement, NodeSpec};
use crate::sim::{Simulation, SimulationConfig, TerminationMode};

/// Default margin added around a word's font size.
const DEFAULT_WORD_MARGIN: f32 = 5.0;

/// Default collision footprint: the font size plus a fixed margin.
pub fn default_word_radius(font_size: f32) -> f32 {
    font_size + DEFAULT_WORD_MARGIN
}

fn default_radius_fn() -> fn(f32) -> f32 {
    default_word_radius
}

/// One word with its importance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSpec {
    /// The word itself.
    pub text: String,
    /// Importance; drives the font scale.
    pub frequency: f32,
}

impl WordSpec {
    /// Create a word spec.
    pub fn new(text: impl Into<String>, frequency: f32) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }
}

/// Tuning for the word cloud profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WordCloudConfig {
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Font size for the least frequent word.
    pub min_font_size: f32,
    /// Font size for the most frequent word.
    pub max_font_size: f32,
    /// Per-axis centering strength.
    pub axis_strength: f32,
    /// Relaxation passes.
    pub iterations: u32,
    /// Seed for the uniform initial placement.
    pub seed: u64,
    /// Collision footprint from font size. Not part of the wire config.
    #[serde(skip, default = "default_radius_fn")]
    pub radius_fn: fn(f32) -> f32,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            min_font_size: 12.0,
            max_font_size: 36.0,
            axis_strength: 0.05,
            iterations: 100,
            seed: 0,
            radius_fn: default_word_radius,
        }
    }
}

/// One placed word.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPlacement {
    /// The word.
    pub text: String,
    /// Input frequency.
    pub frequency: f32,
    /// Scaled font size.
    pub font_size: f32,
    /// Final X.
    pub x: f32,
    /// Final Y.
    pub y: f32,
}

/// The word cloud profile.
pub struct WordCloudLayout {
    config: WordCloudConfig,
}

impl WordCloudLayout {
    /// Create the profile with the given config.
    pub fn new(config: WordCloudConfig) -> Self {
        Self { config }
    }

    /// Create the profile with dashboard defaults.
    pub fn with_defaults() -> Self {
        Self::new(WordCloudConfig::default())
    }

    /// Linear frequency-to-font-size scale. A flat frequency distribution
    /// maps every word to the top of the range.
    fn font_size(&self, frequency: f32, min_freq: f32, max_freq: f32) -> f32 {
        let c = &self.config;
        if max_freq <= min_freq {
            return c.max_font_size;
        }
        let t = (frequency - min_freq) / (max_freq - min_freq);
        c.min_font_size + t * (c.max_font_size - c.min_font_size)
    }

    /// Place the words.
    pub fn compute(&self, words: &[WordSpec]) -> Result<Vec<WordPlacement>, LayoutError> {
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let c = &self.config;

        let min_freq = words.iter().map(|w| w.frequency).fold(f32::INFINITY, f32::min);
        let max_freq = words
            .iter()
            .map(|w| w.frequency)
            .fold(f32::NEG_INFINITY, f32::max);

        let font_sizes: Vec<f32> = words
            .iter()
            .map(|w| self.font_size(w.frequency, min_freq, max_freq))
            .collect();

        // Ids are positional: the same word may appear twice in the input.
        let nodes: Vec<NodeSpec> = words
            .iter()
            .zip(&font_sizes)
            .enumerate()
            .map(|(i, (word, &font))| {
                NodeSpec::new(format!("w{i}"))
                    .with_label(&word.text)
                    .with_size((c.radius_fn)(font))
            })
            .collect();

        let forces: Vec<Box<dyn Force>> = vec![
            Box::new(PositionForce::x(c.width / 2.0, c.axis_strength)),
            Box::new(PositionForce::y(c.height / 2.0, c.axis_strength)),
            Box::new(CollideForce::new(0.0)),
        ];
        let mut sim = Simulation::new(
            &nodes,
            &[],
            InitialPlacement::Uniform(Extent::new(c.width, c.height)),
            forces,
            SimulationConfig {
                seed: c.seed,
                termination: TerminationMode::FixedIterations(c.iterations),
                ..Default::default()
            },
        )?;
        sim.run_to_quiescence(|_, _| true);

        let graph = sim.graph();
        Ok(words
            .iter()
            .zip(font_sizes)
            .enumerate()
            .map(|(i, (word, font_size))| WordPlacement {
                text: word.text.clone(),
                frequency: word.frequency,
                font_size,
                x: graph.positions_x()[i],
                y: graph.positions_y()[i],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_words() -> Vec<WordSpec> {
        [
            ("vaccine", 42.0),
            ("election", 37.0),
            ("climate", 25.0),
            ("hoax", 19.0),
            ("fact-check", 12.0),
            ("viral", 9.0),
            ("bot", 5.0),
        ]
        .into_iter()
        .map(|(t, f)| WordSpec::new(t, f))
        .collect()
    }

    #[test]
    fn test_font_scale_spans_range() {
        let layout = WordCloudLayout::with_defaults();
        let placed = layout.compute(&sample_words()).unwrap();

        assert_eq!(placed[0].font_size, 36.0);
        assert_eq!(placed.last().unwrap().font_size, 12.0);
        for w in &placed {
            assert!(w.font_size >= 12.0 && w.font_size <= 36.0);
        }
    }

    #[test]
    fn test_flat_frequencies_use_max_font() {
        let words = vec![WordSpec::new("a", 3.0), WordSpec::new("b", 3.0)];
        let placed = WordCloudLayout::with_defaults().compute(&words).unwrap();
        assert_eq!(placed[0].font_size, 36.0);
        assert_eq!(placed[1].font_size, 36.0);
    }

    #[test]
    fn test_words_spread_apart() {
        let placed = WordCloudLayout::with_defaults()
            .compute(&sample_words())
            .unwrap();

        let mut overlapping = 0;
        let mut pairs = 0;
        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                let a = &placed[i];
                let b = &placed[j];
                let d = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
                let footprints =
                    default_word_radius(a.font_size) + default_word_radius(b.font_size);
                pairs += 1;
                if d < footprints - 1.0 {
                    overlapping += 1;
                }
            }
        }
        assert!(
            f64::from(overlapping) <= 0.05 * f64::from(pairs),
            "{overlapping} of {pairs} word pairs overlap"
        );
    }

    #[test]
    fn test_custom_radius_fn() {
        fn tight(_font: f32) -> f32 {
            1.0
        }
        let config = WordCloudConfig {
            radius_fn: tight,
            ..Default::default()
        };
        let placed = WordCloudLayout::new(config).compute(&sample_words()).unwrap();

        // Tiny footprints let the axis pull win: words crowd the middle.
        for w in &placed {
            assert!((w.x - 150.0).abs() < 100.0);
            assert!((w.y - 150.0).abs() < 100.0);
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let layout = WordCloudLayout::with_defaults();
        let a = layout.compute(&sample_words()).unwrap();
        let b = layout.compute(&sample_words()).unwrap();
        for (wa, wb) in a.iter().zip(&b) {
            assert_eq!(wa.x, wb.x);
            assert_eq!(wa.y, wb.y);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(WordCloudLayout::with_defaults().compute(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_words_allowed() {
        let words = vec![WordSpec::new("echo", 5.0), WordSpec::new("echo", 5.0)];
        let placed = WordCloudLayout::with_defaults().compute(&words).unwrap();
        assert_eq!(placed.len(), 2);
    }
}
