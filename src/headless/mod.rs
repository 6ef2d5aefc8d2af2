//! Headless mode for agentic testing
//!
//! Runs the melee sandbox without any graphical output: the scene is spawned
//! with real physics colliders, attacks are raised from a script, and the
//! outcome comes back as a [`SandboxResult`].
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless sandbox
//! cargo run --release -- --headless assets/scenes/sandbox.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "actor": { "name": "Player", "position": [0.0, 0.0, 0.0], "facing": "Right" },
//!   "targets": [
//!     { "name": "Dummy", "position": [1.0, 0.0, 0.0] },
//!     { "name": "Crate", "position": [-1.0, 0.0, 0.0], "hitable": false }
//!   ],
//!   "attacks": [
//!     { "at_secs": 0.5 },
//!     { "at_secs": 1.5, "facing": "Left" }
//!   ],
//!   "max_duration_secs": 3.0
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::SandboxConfig;
pub use runner::{run_headless_sandbox, SandboxResult, TargetResult};
