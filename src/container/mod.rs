//! Container-facing output of a loaded task file
//!
//! Turns validated steps into descriptors the container runtime consumes:
//! - decoded bind mounts
//! - merged environment, working directory and user per step
//! - the expanded step list of a task

pub mod mount;
pub mod plan;
pub mod step;

pub use mount::{decode_mount, decode_mounts, Mount, MountConsumer, MountKind};
pub use plan::TaskPlan;
pub use step::ContainerStep;
