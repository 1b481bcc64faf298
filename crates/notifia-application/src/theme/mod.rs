mod service;

pub use service::ThemeService;
