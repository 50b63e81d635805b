//! Camera Check
//!
//! Acquires the default camera, grabs one snapshot, and saves it as a JPEG.
//! Fails cleanly on machines without a camera.

use vitalscan::{CameraConfig, CameraSource, FrameSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("📷 VitalScan Camera Check");
    println!("=========================");

    let config = CameraConfig::default();
    println!(
        "\n🔍 Opening camera {} at {}x{} @{}fps",
        config.device_index, config.width, config.height, config.frame_rate
    );

    let source = CameraSource::new(config)?;
    match source.acquire().await {
        Ok(handle) => {
            println!("   acquired: {}", handle.description());

            let frame = source.current_frame().await?;
            println!("   snapshot: {} bytes of JPEG", frame.len());

            let output = std::env::temp_dir().join("vitalscan_camera_check.jpg");
            std::fs::write(&output, frame.data())?;
            println!("✨ Snapshot saved to {}", output.display());
        }
        Err(err) => {
            println!("   ❌ camera unavailable: {err}");
            println!("   (code {})", err.error_code());
        }
    }

    Ok(())
}
