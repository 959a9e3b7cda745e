pub mod cancel;
pub mod essay;
pub mod event;
pub mod job;
pub mod language;
pub mod loaders;

pub use cancel::CancelFlag;
pub use essay::{sanitize_topic, Essay, Section};
pub use event::{EventSink, PipelineEvent};
pub use job::{GenerationJob, INTRODUCTION_CHARS};
pub use language::Language;
pub use loaders::{load_job_from_toml, parse_job};
