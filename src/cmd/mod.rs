mod download;
mod open;
mod output;
mod plan;
mod read;

pub use download::cmd_download;
pub use open::cmd_open;
pub use plan::cmd_plan;
pub use read::cmd_read;
