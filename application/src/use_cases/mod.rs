//! Use cases (application services)

pub mod decide_motion;
pub mod manual_tally;
pub mod meeting_lifecycle;
pub mod motion_lifecycle;
mod shared;

#[cfg(test)]
mod test_store;
