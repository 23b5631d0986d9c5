//! Built-in directory tool adapters

pub mod employee_id;
pub mod location;
pub mod skill_set;
pub mod supervisor;

pub use employee_id::{EmployeeIdTool, EmployeeIdToolFactory};
pub use location::{LocationTool, LocationToolFactory};
pub use skill_set::{SkillSetTool, SkillSetToolFactory};
pub use supervisor::{SupervisorTool, SupervisorToolFactory};
