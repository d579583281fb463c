use bubble_core::{InputSample, Landmark, ScreenSize};
use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f64,
    #[serde(default = "default_screen")]
    pub screen: ScreenSize,
    pub frames: Vec<ReplayFrame>,
}

/// One input cycle. Neither `pointer` nor `landmarks` means nothing was
/// detected that cycle.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReplayFrame {
    #[serde(default)]
    pub pointer: Option<Vec2>,
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplayFrame {
    pub fn sample(&self) -> InputSample {
        match (&self.pointer, &self.landmarks) {
            (Some(p), _) => InputSample::Pointer(*p),
            (None, Some(landmarks)) => InputSample::Landmarks(landmarks.clone()),
            (None, None) => InputSample::Idle,
        }
    }
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<InputSample> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let sample = frame.sample();
            for _ in 0..frame.repeat.max(1) {
                out.push(sample.clone());
            }
        }
        out
    }

    /// Figure-eight pointer sweep across the screen, `seconds` long.
    pub fn pointer_sweep(screen: ScreenSize, fixed_dt: f64, seconds: f64) -> Self {
        let count = (seconds / fixed_dt).round().max(1.0) as usize;
        let frames = (0..count)
            .map(|i| {
                let t = (i as f64 * fixed_dt) as f32;
                let x = 0.5 + 0.42 * (t * 0.9).sin();
                let y = 0.5 + 0.38 * (t * 1.8).sin();
                ReplayFrame {
                    pointer: Some(Vec2::new(x * screen.width, y * screen.height)),
                    landmarks: None,
                    repeat: 1,
                }
            })
            .collect();
        Self {
            fixed_dt,
            screen,
            frames,
        }
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if !(replay.fixed_dt > 0.0) {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if !replay.screen.is_valid() {
        return Err("Replay validation failed: screen dimensions must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    for (i, frame) in replay.frames.iter().enumerate() {
        if frame.pointer.is_some() && frame.landmarks.is_some() {
            return Err(format!(
                "Replay validation failed: frame {i} has both pointer and landmarks"
            ));
        }
    }
    Ok(())
}

const fn default_dt() -> f64 {
    1.0 / 30.0
}

const fn default_repeat() -> u32 {
    1
}

fn default_screen() -> ScreenSize {
    ScreenSize::new(1280.0, 720.0)
}
