pub mod dto;
pub mod widget;

#[cfg(feature = "chat-out")]
pub mod api;

#[cfg(feature = "chat-in")]
pub mod back;

#[cfg(feature = "chat-front")]
pub mod front;

#[cfg(all(feature = "web-dom", target_arch = "wasm32"))]
pub mod dom;
