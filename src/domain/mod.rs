pub mod error;
pub mod model;
pub mod optimizer;
pub mod pool;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod team;
pub mod validate;
