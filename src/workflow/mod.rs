pub mod essay_ctx;
pub mod essay_flow;
pub mod progress;

pub use essay_ctx::EssayCtx;
pub use essay_flow::{split_outline, EssayFlow, FlowResult};
pub use progress::ProgressTracker;
