// Widget rendering functions for each board zone.

pub mod confirm;
pub mod roster;
pub mod status_bar;
pub mod teams;
pub mod turn_banner;
