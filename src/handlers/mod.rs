// Handlers module

pub mod add_message;
pub mod list_messages;

pub use add_message::add_message_handler;
pub use list_messages::list_messages_handler;
