//! Basic example demonstrating a KPI analysis
//!
//! Run with: cargo run --example basic -p kpi-facade

use kpi_facade::{
    collect_narrative, pearson_correlation, series_stats, AnalyzerBuilder, NarrativeContext,
    NarrativeGenerator, TemplateNarrator,
};
use std::sync::atomic::AtomicBool;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== KPI Analysis Basic Example ===\n");

    let revenue = vec![100.0, 110.0, 105.0, 120.0, 115.0, 130.0, 125.0];
    let costs = vec![70.0, 74.0, 73.0, 80.0, 78.0, 85.0, 84.0];

    println!("Revenue: {:?}\n", revenue);

    // 1. Statistics
    let stats = series_stats(&revenue);
    println!("1. Statistics");
    println!(
        "   avg {:.2}, min {:.2}, max {:.2}, change {:+.1}%\n",
        stats.avg, stats.min, stats.max, stats.change_percent
    );

    // 2. Full analysis
    let analyzer = AnalyzerBuilder::new().seed(42).build()?;
    let analysis = analyzer.analyze(&revenue, "Финансы", None)?;
    println!("2. Analysis");
    println!("   Trend: {} (slope {:.3})", analysis.trend.label, analysis.trend.slope);
    println!(
        "   Forecast: {:?}",
        analysis
            .forecast
            .values
            .iter()
            .map(|x| format!("{:.1}", x))
            .collect::<Vec<_>>()
    );
    println!("   {}", analysis.forecast.summary);
    println!("   Drivers: {:?}\n", analysis.drivers);

    // 3. Correlation
    let r = pearson_correlation(&revenue, &costs);
    println!("3. Revenue vs costs correlation: {:.3}\n", r);

    // 4. Narrative
    let context = NarrativeContext::from_analysis("Revenue", &analysis, Some(r));
    let stream = TemplateNarrator::new().generate(&context)?;
    println!("4. Narrative");
    println!("   {}", collect_narrative(stream, &AtomicBool::new(false)));

    println!("\n=== Example Complete ===");
    Ok(())
}
