mod facts;
mod plan;
mod validate;

pub use facts::{cmd_facts, detect_facts};
pub use plan::cmd_plan;
pub use validate::cmd_validate;
