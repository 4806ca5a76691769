pub mod bar;
pub mod enrichment;
pub mod position;
pub mod report;
pub mod score;
pub mod snapshot;

pub use bar::*;
pub use enrichment::*;
pub use position::*;
pub use report::*;
pub use score::*;
pub use snapshot::*;
