pub mod meme;
pub mod uploader;
