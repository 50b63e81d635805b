//! Scan Session Demo
//!
//! Drives a full capture → analyze → display cycle without hardware or a
//! server: the synthetic test-pattern source stands in for the camera and a
//! canned backend stands in for the analysis service.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use vitalscan::{
    AnalysisBackend, AnalysisResult, Frame, ScanSession, SessionEvent, TestPatternSource,
    VitalScanError,
};

/// Stand-in analysis service returning a plausible canned report.
struct CannedBackend;

fn canned_result() -> AnalysisResult {
    AnalysisResult {
        success: true,
        error: None,
        heart_rate: 74.0,
        hrv: 41.0,
        risk_level: "Low".to_string(),
        risk_score: 23.0,
        recommendations: vec![
            "Maintain regular physical activity".to_string(),
            "Follow a heart-healthy diet rich in fruits and vegetables".to_string(),
            "Get 7-8 hours of quality sleep nightly".to_string(),
        ],
        waveform_data: (0..100)
            .map(|i| {
                let t = i as f64 / 100.0 * 4.0 * std::f64::consts::PI;
                t.sin() * 40.0 + 50.0
            })
            .collect(),
    }
}

#[async_trait]
impl AnalysisBackend for CannedBackend {
    async fn analyze(&self, frames: &[Frame]) -> Result<AnalysisResult, VitalScanError> {
        println!("   📤 {} frames submitted for analysis", frames.len());
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(canned_result())
    }

    async fn demo(&self) -> Result<AnalysisResult, VitalScanError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(canned_result())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("🫀 VitalScan Session Demo");
    println!("=========================");

    println!("\n📹 Opening session with a synthetic frame source");
    let session = ScanSession::builder()
        .frame_source(Arc::new(TestPatternSource::new()))
        .analysis_backend(Arc::new(CannedBackend))
        .capture_window(Duration::from_secs(2))
        .open()
        .await?;
    println!("   stream: {}", session.stream().description());

    let mut events = session.events().expect("event stream already taken");

    println!("\n🔴 Capturing for 2 seconds at 10 Hz...");
    session.start().await?;

    while let Ok(Some(event)) = events.try_next() {
        match event {
            SessionEvent::StateChanged { from, to } => {
                println!("   state: {from} -> {to}");
            }
            SessionEvent::CaptureFinished { frames } => {
                println!("   capture finished with {frames} frames");
            }
            SessionEvent::ReportReady { report } => {
                println!("\n📋 Scan report");
                println!("   heart rate:  {} BPM", report.heart_rate);
                println!("   HRV:         {} ms", report.hrv);
                println!(
                    "   risk:        {} {} ({}%)",
                    report.tier.badge(),
                    report.risk_level,
                    report.risk_score
                );
                for recommendation in &report.recommendations {
                    println!("   • {recommendation}");
                }
                let output = std::env::temp_dir().join("vitalscan_session_waveform.png");
                report.waveform.save(&output)?;
                println!("   waveform chart saved to {}", output.display());
            }
            SessionEvent::SessionFailed { error } => {
                println!("   ❌ {error}");
            }
        }
    }

    println!("\n🔄 Restarting session");
    session.restart();
    println!("   state: {}", session.state());

    println!("\n✨ Session demo completed!");
    Ok(())
}
