pub mod panels;
pub mod plot;
pub mod presentation;
pub mod testing;
