pub mod acc;
pub mod drive;
