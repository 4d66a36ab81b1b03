//! Flip-Birds - terminal flappy-bird arcade game library
//!
//! Exposes the game core, the media collaborator traits and the headless
//! simulator for testing and external front ends.

pub mod build_info;
pub mod core;
pub mod game;
pub mod media;
pub mod simulator;
