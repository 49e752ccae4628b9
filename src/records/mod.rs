pub mod history;
pub mod recorder;

pub use history::{last_recorded_date, select_mode};
pub use recorder::{load_predictions, PredictionRecorder};
