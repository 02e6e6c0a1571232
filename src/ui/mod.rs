pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, header, section, status, success, verdict, warn};
pub use table::{board_table, scores_table, BoardRow, TableBuilder};
pub use theme::{theme, Theme};
