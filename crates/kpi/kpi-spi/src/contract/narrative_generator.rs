//! Trait for the external narrative (generated text) layer

use crate::error::Result;
use crate::model::NarrativeContext;

/// Lazy, finite, non-restartable sequence of text chunks.
///
/// Consumers may stop pulling at any point; chunks are never replayed.
pub type NarrativeStream = Box<dyn Iterator<Item = String> + Send>;

/// Turns numeric grounding into prose.
///
/// Implementations are injected where needed; there is no process-wide
/// client.
pub trait NarrativeGenerator: Send + Sync {
    fn generate(&self, context: &NarrativeContext) -> Result<NarrativeStream>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SeriesStats, TrendLabel};

    struct EchoGenerator;

    impl NarrativeGenerator for EchoGenerator {
        fn generate(&self, context: &NarrativeContext) -> Result<NarrativeStream> {
            let chunks = vec![context.kpi_name.clone(), context.trend.to_string()];
            Ok(Box::new(chunks.into_iter()))
        }
    }

    fn context() -> NarrativeContext {
        NarrativeContext {
            kpi_name: "Revenue".to_string(),
            trend: TrendLabel::Stable,
            stats: SeriesStats::default(),
            forecast_summary: String::new(),
            forecast_mean: 0.0,
            drivers: vec![],
            correlation: None,
        }
    }

    #[test]
    fn test_generator_as_trait_object() {
        let generator: Box<dyn NarrativeGenerator> = Box::new(EchoGenerator);
        let chunks: Vec<String> = generator.generate(&context()).unwrap().collect();
        assert_eq!(chunks, vec!["Revenue", "stable"]);
    }

    #[test]
    fn test_stream_can_stop_early() {
        let mut stream = EchoGenerator.generate(&context()).unwrap();
        assert_eq!(stream.next().as_deref(), Some("Revenue"));
        drop(stream);
    }
}
