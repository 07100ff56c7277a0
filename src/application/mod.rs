pub mod app;

pub use app::PetopiaApp;
