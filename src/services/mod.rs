pub mod estimate_engine;
pub mod input_normalizer;
pub mod report_renderer;
