mod categories;
mod generate;
mod inspect;

pub use categories::cmd_categories;
pub use generate::cmd_generate;
pub use inspect::cmd_inspect;
