pub mod card;
pub mod panels;
pub mod plot;
