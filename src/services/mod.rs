pub mod learning;
pub mod pipeline;
pub mod prediction;
pub mod server;

pub use learning::{LearningReport, LearningService};
pub use pipeline::{PipelineReport, PipelineService};
pub use prediction::{predict_player, PredictionReport, PredictionService};
pub use server::ServerService;
