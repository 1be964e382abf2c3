pub mod document;
pub mod record;
pub mod stats;
