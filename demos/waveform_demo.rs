//! Waveform Rendering Demo
//!
//! Renders a synthetic pulse waveform through the chart rasterizer and
//! saves the result as a PNG.

use vitalscan::WaveformStyle;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("📈 VitalScan Waveform Demo");
    println!("==========================");

    // A plausible pulse trace: a slow sine with a sharper systolic bump.
    let samples: Vec<f64> = (0..100)
        .map(|i| {
            let t = i as f64 / 100.0 * 4.0 * std::f64::consts::PI;
            let base = t.sin() * 30.0 + 50.0;
            let bump = (t * 2.0).sin().max(0.0).powi(3) * 20.0;
            base + bump
        })
        .collect();

    println!("\n🎨 Rendering {} samples onto a 600x200 surface", samples.len());
    let style = WaveformStyle::default();
    let chart = vitalscan::waveform::render(&samples, &style)?;

    let output = std::env::temp_dir().join("vitalscan_waveform.png");
    chart.save(&output)?;
    println!("✨ Waveform chart saved to {}", output.display());

    Ok(())
}
