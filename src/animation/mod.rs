pub mod sequencer;
pub mod transition;
