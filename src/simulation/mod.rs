pub mod states;
pub mod params;
pub mod engine;
pub mod region;
pub mod barnes_hut;
pub mod forces;
pub mod integrator;
pub mod trajectory;
pub mod diagnostics;
pub mod scenario;
