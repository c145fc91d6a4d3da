pub mod chat;
pub mod image;

pub use chat::call_chat_completion;
pub use image::{generate_single_meme, placeholder_meme_url};
