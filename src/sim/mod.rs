mod acceleration_profile;
mod control_state;
mod force_applicator;
mod host;
mod input_smoother;
mod suspension;
mod vehicle_config;
mod vehicle_controller;

pub use acceleration_profile::*;
pub use control_state::*;
pub use force_applicator::*;
pub use host::*;
pub use input_smoother::*;
pub use suspension::*;
pub use vehicle_config::*;
pub use vehicle_controller::*;
