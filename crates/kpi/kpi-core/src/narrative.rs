//! Narrative generation boundary
//!
//! The generated-text service lives outside this crate and is reached only
//! through the injected [`NarrativeGenerator`] trait. This module provides
//! the cancellable consumer for its chunk streams and an offline template
//! generator that phrases the numeric grounding directly.

use kpi_spi::{NarrativeContext, NarrativeGenerator, NarrativeStream, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Drain a narrative stream into one string.
///
/// The cancel flag is checked before every chunk; once raised, no further
/// chunks are pulled and the text gathered so far is returned.
pub fn collect_narrative(mut stream: NarrativeStream, cancel: &AtomicBool) -> String {
    let mut text = String::new();
    let mut chunks = 0usize;
    loop {
        if cancel.load(Ordering::Relaxed) {
            debug!(chunks, "narrative cancelled");
            break;
        }
        match stream.next() {
            Some(chunk) => {
                text.push_str(&chunk);
                chunks += 1;
            }
            None => break,
        }
    }
    text
}

/// Deterministic, offline narrative built from fixed sentence templates
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }

    fn sentences(context: &NarrativeContext) -> Vec<String> {
        let stats = &context.stats;
        let mut sentences = vec![
            format!(
                "{} shows {} (average {:.2}, range {:.2} to {:.2}, change {:+.1}%). ",
                context.kpi_name,
                context.trend.description(),
                stats.avg,
                stats.min,
                stats.max,
                stats.change_percent
            ),
            format!("{}. ", context.forecast_summary),
        ];

        if !context.drivers.is_empty() {
            sentences.push(format!("Likely drivers: {}. ", context.drivers.join("; ")));
        }

        if let Some(r) = context.correlation {
            sentences.push(format!(
                "Correlation with the companion KPI is {:.2} ({}). ",
                r,
                correlation_strength(r)
            ));
        }

        sentences
    }
}

impl NarrativeGenerator for TemplateNarrator {
    fn generate(&self, context: &NarrativeContext) -> Result<NarrativeStream> {
        Ok(Box::new(Self::sentences(context).into_iter()))
    }
}

/// Verbal strength of a correlation coefficient
pub fn correlation_strength(r: f64) -> &'static str {
    match r.abs() {
        a if a >= 0.7 => "strong",
        a if a >= 0.3 => "moderate",
        _ => "weak",
    }
}
