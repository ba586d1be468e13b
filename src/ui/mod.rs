pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, id_list, info, outcome, success, summary_row, warn};
pub use table::{entity_table, stats_table, Profile, TableBuilder};
pub use theme::{theme, Theme};
