//! Categories for filing and charting transactions.

mod api;
mod domain;
mod viewmodel;

pub use domain::{Category, CategoryId};
pub use viewmodel::CategoriesViewModel;
