//! Generate a synthetic face-width trace.

use std::path::PathBuf;

use screenguard_proximity_core::observation::{serialize_observations, validate_face_width};
use screenguard_proximity_core::TraceBuilder;

pub fn run(
    baseline: f64,
    close: f64,
    fps: u32,
    jitter: f64,
    output: Option<PathBuf>,
    calibration_frames: usize,
) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    validate_face_width(baseline).map_err(|e| anyhow::anyhow!("--baseline: {e}"))?;
    validate_face_width(close).map_err(|e| anyhow::anyhow!("--close: {e}"))?;

    let frame_interval_ns = 1_000_000_000 / fps as u64;
    let trace = TraceBuilder::approach_and_retreat(
        baseline,
        close,
        calibration_frames,
        frame_interval_ns,
    )
    .jitter(jitter)
    .build();

    let mut content = format!(
        "# synthetic trace: baseline={baseline} close={close} fps={fps} jitter={jitter}\n"
    );
    content.push_str(&serialize_observations(&trace)?);

    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
            println!("Wrote {} observations to {}", trace.len(), path.display());
        }
        None => print!("{content}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenguard_common::MonitorConfig;
    use screenguard_proximity_core::observation::parse_observations;

    #[test]
    fn test_written_trace_parses_back() {
        let path = std::env::temp_dir().join(format!(
            "screenguard-simulate-{}.jsonl",
            std::process::id()
        ));
        run(0.2, 0.4, 30, 0.0, Some(path.clone()), calibration_frames()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# synthetic trace"));
        let trace = parse_observations(&content).unwrap();
        assert_eq!(trace.len(), 115);
        assert_eq!(trace[0].face_width, Some(0.2));
        assert_eq!(trace[1].timestamp_ns, 33_333_333);

        std::fs::remove_file(path).ok();
    }

    fn calibration_frames() -> usize {
        MonitorConfig::default().calibration_sample_count
    }

    #[test]
    fn test_calibration_frames_set_trace_length() {
        let path = std::env::temp_dir().join(format!(
            "screenguard-simulate-short-{}.jsonl",
            std::process::id()
        ));
        run(0.2, 0.4, 30, 0.0, Some(path.clone()), 10).unwrap();

        let trace = parse_observations(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(trace.len(), 95);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_rejects_out_of_range_widths() {
        assert!(run(1.5, 0.4, 30, 0.0, None, calibration_frames()).is_err());
        assert!(run(0.2, 0.4, 0, 0.0, None, calibration_frames()).is_err());
    }
}
