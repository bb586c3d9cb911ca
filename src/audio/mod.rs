pub mod queue;
pub mod track;

pub use queue::PlayQueue;
pub use track::Track;
