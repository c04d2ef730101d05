//! Integration test harness.

mod scripted_source;
mod simulation;
