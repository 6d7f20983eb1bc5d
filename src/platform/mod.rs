//! Terminal platform layer
//!
//! Handles everything the simulation must not know about:
//! - Fixed timestep pacing
//! - Key events → logical tick input
//! - Drawing snapshots to the terminal

pub mod clock;
pub mod input;
pub mod terminal;

pub use clock::FixedStep;
pub use input::InputCollector;
pub use terminal::TerminalRenderer;
