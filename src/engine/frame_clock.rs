/// Frame timing for a variable timestep loop
///
/// Each frame hands the simulation the real time since the previous frame,
/// capped so a stall (window drag, breakpoint) does not launch everything
/// through the floor on the next frame.
use std::time::{Duration, Instant};

/// Longest step handed to the simulation (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame timing state
#[derive(Debug)]
pub struct FrameClock {
    last_frame_time: Instant,
    paused: bool,
    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,
    frame_count: u64,
    current_fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame_time: Instant::now(),
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame from the wall clock, returns the step in seconds
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of real time, returns the step in seconds.
    ///
    /// The step is 0 while paused and never exceeds [`MAX_FRAME_DT`].
    pub fn advance(&mut self, frame_time: Duration) -> f32 {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return 0.0;
        }

        frame_time.as_secs_f32().min(MAX_FRAME_DT)
    }

    /// Average over the last frames, refreshed every 10 frames
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Don't hand the paused time to the next frame
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
