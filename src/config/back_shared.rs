use once_cell::sync::Lazy;
use std::env;

pub static INFER_URL: Lazy<Box<str>> = Lazy::new(|| {
    env::var("INFER_URL")
        .unwrap_or_else(|_| "http://infer".into())
        .into_boxed_str()
});

pub static DEFAULT_MODEL: Lazy<Box<str>> = Lazy::new(|| {
    env::var("DEFAULT_MODEL")
        .unwrap_or_else(|_| "default".into())
        .into_boxed_str()
});

pub static INFER_API_KEY: Lazy<Option<Box<str>>> = Lazy::new(|| {
    env::var("INFER_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(String::into_boxed_str)
});

pub fn validate() {
    // Trigger the lazy statics to force panics early
    let _ = &*INFER_URL;
    let _ = &*DEFAULT_MODEL;
    let _ = &*INFER_API_KEY;
}
