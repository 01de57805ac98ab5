pub mod load;
pub mod selection;
