#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use msgboard::board::MessageBoard;
use msgboard::models::{Message, MessageLog, NewMessage};
use msgboard::store::FileMessageStore;
use tempfile::TempDir;

/// File name used for the message document inside test directories
pub const DATA_FILE: &str = "messages.json";

/// A board backed by a JSON file in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn file_board() -> (TempDir, Arc<FileMessageStore>, Arc<MessageBoard>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(FileMessageStore::new(data_path(&dir)));
    store.init().await.expect("Failed to init message file");
    let board = Arc::new(MessageBoard::new(store.clone()));
    (dir, store, board)
}

pub fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join(DATA_FILE)
}

pub fn new_message(nickname: &str, text: &str) -> NewMessage {
    NewMessage {
        nickname: nickname.to_string(),
        message: text.to_string(),
    }
}

pub fn stored_message(nickname: &str, text: &str) -> Message {
    new_message(nickname, text).stamp(Utc::now())
}

pub fn texts(log: &MessageLog) -> Vec<String> {
    log.messages().iter().map(|m| m.message.clone()).collect()
}
