//! Mock employee-directory lookups
//!
//! Every lookup draws a uniformly random value from a small fixed set; there
//! is no real data backing. Randomness comes from an injected seedable
//! source so callers can make the lookups deterministic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Mutex, PoisonError};

/// Supervisors a lookup may report
pub const SUPERVISORS: [&str; 5] = ["Michael", "Jessica", "David", "Ashley", "Christopher"];

/// Locations a lookup may report
pub const LOCATIONS: [&str; 4] = ["Hyderabad", "Bangalore", "Chennai", "Mumbai"];

/// Employee IDs a lookup may report
pub const EMPLOYEE_IDS: [&str; 4] = ["abd104", "3ni3n", "93jnj", "ikh2k"];

/// Primary skills a lookup may report
pub const SKILLS: [&str; 4] = [
    "Machine Learning",
    "Generative AI",
    "ML Ops",
    "Image Analysis",
];

/// Mock directory backing the lookup tools.
///
/// Lookups are stateless with respect to their inputs: the argument is only
/// echoed into the result sentence, never used to select a value. An empty
/// argument yields a descriptive error sentence through the same string
/// channel as success.
pub struct Directory {
    rng: Mutex<StdRng>,
}

impl Directory {
    /// Create a directory with an entropy-seeded random source
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a directory with a fixed seed, for deterministic lookups
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self, set: &[&'static str]) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        set.choose(&mut *rng).copied().unwrap_or(set[0])
    }

    /// Supervisor for a given employee ID
    pub fn supervisor_of(&self, employee_id: &str) -> String {
        if employee_id.is_empty() {
            return "internal processing error: Employee ID is required.".to_string();
        }
        format!(
            "The supervisor for the given employee is {}",
            self.pick(&SUPERVISORS)
        )
    }

    /// Location of a given employee
    pub fn location_of(&self, employee_name: &str) -> String {
        if employee_name.is_empty() {
            return "internal processing error: Employee name is required.".to_string();
        }
        format!(
            "The location for {} is {}",
            employee_name,
            self.pick(&LOCATIONS)
        )
    }

    /// Employee ID for a given employee name
    pub fn id_of(&self, employee_name: &str) -> String {
        if employee_name.is_empty() {
            return "internal processing error: Employee name is required.".to_string();
        }
        format!(
            "The employee ID for {} is {}",
            employee_name,
            self.pick(&EMPLOYEE_IDS)
        )
    }

    /// Primary skill for a given employee ID
    pub fn skills_of(&self, employee_id: &str) -> String {
        if employee_id.is_empty() {
            return "internal processing error: Employee ID is required.".to_string();
        }
        format!(
            "The primary skill for the employee with ID {} is {}",
            employee_id,
            self.pick(&SKILLS)
        )
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
