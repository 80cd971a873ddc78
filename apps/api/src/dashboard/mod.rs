pub mod handlers;
pub mod pipeline;
pub mod placeholders;
pub mod view;
