pub mod collision;
pub mod support;
pub mod validator;

pub use support::support_ratio;
pub use validator::{validate_physics, validate_placement, PhysicsReport, PhysicsStatus};

#[cfg(test)]
mod test_pieces;
