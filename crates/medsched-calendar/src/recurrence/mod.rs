//! Expansion of a base meeting's recurrence rule into concrete instances.

mod expander;
mod step;


pub use expander::RecurrenceExpander;
pub use step::nth_occurrence;
