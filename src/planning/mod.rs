pub mod bellman;
pub mod policy_iteration;
pub mod solver;
pub mod utility;
pub mod utility_table;
pub mod value_iteration;
