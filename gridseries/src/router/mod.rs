pub mod facilities;
pub mod series;

pub mod util;
