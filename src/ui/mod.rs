//! egui host: draws an assembled [`Dashboard`](crate::dashboard::Dashboard).

pub mod panels;
pub mod plot;
