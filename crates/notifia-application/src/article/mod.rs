mod service;

pub use service::ArticleService;
