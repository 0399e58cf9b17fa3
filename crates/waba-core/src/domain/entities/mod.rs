pub mod component;
pub mod listing;
pub mod message_response;
pub mod template;
