// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! Travelling gaussian pulse over the vertices of a neuron mesh

use tracing::trace;

use neuroglyph_config::PulseConfig;

use crate::error::{ActivityError, ActivityResult};

/// One intensity per mesh vertex, swept by a pulse that jumps forward every
/// `delay_frames` frames and fades linearly in between
#[derive(Debug, Clone)]
pub struct PulseSimulator {
    intensity: Vec<f32>,
    config: PulseConfig,
    center: usize,
    frame: u64,
}

impl PulseSimulator {
    pub fn new(vertex_count: usize, config: PulseConfig) -> ActivityResult<Self> {
        if config.delay_frames == 0 {
            return Err(ActivityError::InvalidConfig(
                "pulse delay_frames must be at least 1".to_string(),
            ));
        }
        if config.half_width == 0 {
            return Err(ActivityError::InvalidConfig(
                "pulse half_width must be at least 1".to_string(),
            ));
        }
        if !config.fade_per_frame.is_finite() || config.fade_per_frame < 0.0 {
            return Err(ActivityError::InvalidConfig(format!(
                "pulse fade_per_frame must be finite and non-negative, got {}",
                config.fade_per_frame
            )));
        }
        Ok(Self {
            intensity: vec![0.0; vertex_count],
            config,
            center: 0,
            frame: 0,
        })
    }

    /// Advance one frame; returns true when a new pulse was written
    pub fn step(&mut self) -> bool {
        let emitted = self.frame % self.config.delay_frames == 0;
        if emitted {
            self.emit();
        }

        let fade = self.config.fade_per_frame;
        for value in &mut self.intensity {
            *value = (*value - fade).max(0.0);
        }

        self.frame += 1;
        emitted
    }

    fn emit(&mut self) {
        self.intensity.fill(0.0);
        let len = self.intensity.len();
        let half = self.config.half_width as isize;
        let width = self.config.half_width as f32;

        for offset in -half..=half {
            let index = self.center as isize + offset;
            if index < 0 || index as usize >= len {
                continue;
            }
            let t = offset as f32 / width;
            self.intensity[index as usize] = (-4.0 * t * t).exp();
        }

        trace!(
            target: "neuroglyph-activity",
            "pulse at vertex {} (frame {})",
            self.center,
            self.frame
        );

        self.center += self.config.stride;
        if self.center >= len {
            self.center = 0;
        }
    }

    #[inline]
    pub fn intensity(&self) -> &[f32] {
        &self.intensity
    }

    /// Vertex the next pulse will be centred on
    #[inline]
    pub fn center(&self) -> usize {
        self.center
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn vertex_count(&self) -> usize {
        self.intensity.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(delay: u64, half_width: usize, stride: usize, fade: f32) -> PulseConfig {
        PulseConfig {
            delay_frames: delay,
            half_width,
            stride,
            fade_per_frame: fade,
        }
    }

    #[test]
    fn test_first_frame_writes_faded_gaussian() {
        let mut pulse = PulseSimulator::new(20, config(5, 4, 3, 0.03)).unwrap();
        assert!(pulse.step());

        let v = pulse.intensity();
        assert!((v[0] - 0.97).abs() < 1e-6);
        let expected = (-4.0f32 * 0.25 * 0.25).exp() - 0.03;
        assert!((v[1] - expected).abs() < 1e-6);
        assert_eq!(v[5], 0.0);
        assert_eq!(pulse.center(), 3);
        assert_eq!(pulse.frame(), 1);
    }

    #[test]
    fn test_pulse_only_moves_every_delay_frames() {
        let mut pulse = PulseSimulator::new(100, config(5, 2, 10, 0.0)).unwrap();
        let emitted: Vec<bool> = (0..11).map(|_| pulse.step()).collect();
        assert_eq!(
            emitted,
            vec![true, false, false, false, false, true, false, false, false, false, true]
        );
        assert_eq!(pulse.center(), 30);
        // previous pulse was cleared before the new one was written
        assert_eq!(pulse.intensity()[10], 0.0);
        assert_eq!(pulse.intensity()[20], 1.0);
    }

    #[test]
    fn test_center_wraps_to_zero() {
        let mut pulse = PulseSimulator::new(12, config(1, 1, 5, 0.0)).unwrap();
        pulse.step(); // centre 0 -> 5
        pulse.step(); // 5 -> 10
        pulse.step(); // 10 -> 15, wraps
        assert_eq!(pulse.center(), 0);
        assert_eq!(pulse.intensity()[10], 1.0);
        assert_eq!(pulse.intensity()[11], (-4.0f32).exp());
    }

    #[test]
    fn test_fade_floors_at_zero() {
        let mut pulse = PulseSimulator::new(4, config(1000, 1, 1, 0.6)).unwrap();
        pulse.step();
        pulse.step();
        assert!(pulse.intensity().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_empty_mesh_is_harmless() {
        let mut pulse = PulseSimulator::new(0, PulseConfig::default()).unwrap();
        assert!(pulse.step());
        assert_eq!(pulse.center(), 0);
        assert!(pulse.intensity().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(PulseSimulator::new(10, config(0, 1, 1, 0.0)).is_err());
        assert!(PulseSimulator::new(10, config(1, 0, 1, 0.0)).is_err());
        assert!(PulseSimulator::new(10, config(1, 1, 1, f32::NAN)).is_err());
    }
}
