//! Greyspire - Tactical Grid Combat Engine

pub mod battle;
pub mod core;
