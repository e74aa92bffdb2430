//! Input recording and deterministic playback
//!
//! A [`Session`] wraps the wave controller and owns the input-source mode.
//! In live mode every tick's resolved input is appended to the run's
//! [`ReplayBuffer`]; in replay mode the controller is restarted and driven
//! from the buffer alone, ignoring live cursor and fire input.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState, TickInput, tick};

/// One recorded tick of input
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub x: f32,
    pub y: f32,
    pub fire: bool,
}

impl ReplayFrame {
    pub fn cursor(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Ordered per-tick inputs of the most recent live run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayBuffer {
    frames: Vec<ReplayFrame>,
    sealed: bool,
}

impl ReplayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finished recording
    pub fn from_frames(frames: Vec<ReplayFrame>) -> Self {
        Self {
            frames,
            sealed: true,
        }
    }

    /// Append a frame; sealed buffers ignore further input
    pub fn push(&mut self, frame: ReplayFrame) {
        if !self.sealed {
            self.frames.push(frame);
        }
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Drop the recording and reopen for a new run
    pub fn clear(&mut self) {
        self.frames.clear();
        self.sealed = false;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    /// Frame for tick `index`; past the end the last frame is held
    pub fn sample(&self, index: usize) -> Option<ReplayFrame> {
        self.frames.get(index).or(self.frames.last()).copied()
    }
}

/// Where cursor and fire input come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Live,
    Replay { cursor: usize },
}

/// Raw per-tick input from the pointer and keyboard
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveInput {
    pub cursor: Vec2,
    pub fire: bool,
    /// Start a new live game
    pub start: bool,
    /// Replay the last recorded game
    pub replay: bool,
    /// Stop the run loop at this tick boundary
    pub quit: bool,
    /// Fine horizontal aim adjustment, in pixels
    pub aim_adjust: i32,
}

/// Anything that can produce a tick's live input
pub trait InputSource {
    fn next_input(&mut self, state: &GameState) -> LiveInput;
}

impl<F> InputSource for F
where
    F: FnMut(&GameState) -> LiveInput,
{
    fn next_input(&mut self, state: &GameState) -> LiveInput {
        self(state)
    }
}

/// Result of a session step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

/// Wave controller plus input recording/playback
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    mode: InputMode,
    buffer: ReplayBuffer,
    recording: bool,
    aim_offset: f32,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            mode: InputMode::Live,
            buffer: ReplayBuffer::new(),
            recording: false,
            aim_offset: 0.0,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn aim_offset(&self) -> f32 {
        self.aim_offset
    }

    /// Install a recording to be played by the next replay signal
    pub fn load_replay(&mut self, mut buffer: ReplayBuffer) {
        buffer.seal();
        self.buffer = buffer;
        self.recording = false;
    }

    /// Run one tick with the given live input
    pub fn step(&mut self, live: &LiveInput) -> StepOutcome {
        if live.quit {
            log::info!("Quit requested at tick {}", self.state.time_ticks);
            return StepOutcome::Quit;
        }
        self.aim_offset += live.aim_adjust as f32;

        let idle = matches!(self.state.phase, GamePhase::Intro | GamePhase::Over);
        let mut start = false;
        if idle && live.start {
            self.mode = InputMode::Live;
            self.buffer.clear();
            self.recording = true;
            self.state.submit_scores = true;
            start = true;
        } else if idle && live.replay && !self.buffer.is_empty() {
            self.buffer.seal();
            self.mode = InputMode::Replay { cursor: 0 };
            self.recording = false;
            self.state.submit_scores = false;
            start = true;
            log::info!("Replaying {} recorded ticks", self.buffer.len());
        }

        let frame = match &mut self.mode {
            InputMode::Live => ReplayFrame {
                x: live.cursor.x + self.aim_offset,
                y: live.cursor.y,
                fire: live.fire,
            },
            InputMode::Replay { cursor } => {
                let frame = self.buffer.sample(*cursor).unwrap_or_default();
                *cursor += 1;
                frame
            }
        };

        let input = TickInput {
            cursor: frame.cursor(),
            fire: frame.fire,
            start,
        };
        tick(&mut self.state, &input);

        if self.recording {
            self.buffer.push(frame);
            if self.state.phase == GamePhase::Over {
                self.recording = false;
                self.buffer.seal();
                log::info!("Recorded {} ticks", self.buffer.len());
            }
        }
        StepOutcome::Continue
    }

    /// Step until quit, `max_ticks`, or `stop` returns true; returns ticks run
    pub fn run<S, F>(&mut self, source: &mut S, max_ticks: u64, mut stop: F) -> u64
    where
        S: InputSource,
        F: FnMut(&GameState) -> bool,
    {
        let mut ticks = 0;
        while ticks < max_ticks {
            let live = source.next_input(&self.state);
            if self.step(&live) == StepOutcome::Quit {
                break;
            }
            ticks += 1;
            if stop(&self.state) {
                break;
            }
        }
        ticks
    }
}
