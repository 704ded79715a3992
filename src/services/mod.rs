pub mod catalog;
pub mod local_cache;
pub mod question_service;
pub mod quiz_service;
pub mod remote_source;
