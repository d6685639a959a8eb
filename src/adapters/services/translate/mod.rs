//! Translation service adapters

pub mod google;

pub use google::GoogleTranslateService;
