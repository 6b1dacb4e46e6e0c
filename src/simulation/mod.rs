pub mod catalog;
pub mod driver;
pub mod feed;
pub mod random;
pub mod session;
pub mod timers;

pub use driver::{SharedSession, SimulationDriver};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use session::{SimulationSession, SimulationSnapshot};
