//! View controller: view events, reducer-style state transitions, and effect orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
