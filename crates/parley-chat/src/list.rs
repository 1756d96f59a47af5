//! Chat list
//!
//! Most-recent-first ordering: new chats go to the front and existing
//! chats never move.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::chat::Chat;
use crate::error::ChatError;
use crate::message::Message;
use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Chat>", into = "Vec<Chat>")]
pub struct ChatList {
    chats: Vec<Chat>,
}

impl ChatList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from existing chats, rejecting duplicate ids
    pub fn from_chats(chats: Vec<Chat>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(chats.len());
        for chat in &chats {
            if !seen.insert(chat.id()) {
                return Err(ChatError::DuplicateId(chat.id().to_string()));
            }
        }

        Ok(Self { chats })
    }

    /// Insert a chat at the front of the list
    pub fn prepend(&mut self, chat: Chat) -> Result<()> {
        if self.contains(chat.id()) {
            return Err(ChatError::DuplicateId(chat.id().to_string()));
        }

        self.chats.insert(0, chat);
        Ok(())
    }

    pub fn get(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id() == chat_id)
    }

    pub fn contains(&self, chat_id: &str) -> bool {
        self.get(chat_id).is_some()
    }

    pub fn first(&self) -> Option<&Chat> {
        self.chats.first()
    }

    /// Append a message to the chat with the given id
    pub fn append_message(&mut self, chat_id: &str, message: Message) -> Result<&Chat> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id() == chat_id)
            .ok_or_else(|| ChatError::NotFound(chat_id.to_string()))?;

        chat.push(message);
        Ok(chat)
    }

    /// Remove a chat, returning it if it was present
    pub fn remove(&mut self, chat_id: &str) -> Option<Chat> {
        let index = self.chats.iter().position(|c| c.id() == chat_id)?;
        Some(self.chats.remove(index))
    }

    /// Chats whose title contains `query`, in list order
    pub fn search(&self, query: &str) -> Vec<&Chat> {
        self.chats
            .iter()
            .filter(|c| c.title_matches(query))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chat> {
        self.chats.iter()
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Chat> {
        self.chats.clone()
    }
}

impl TryFrom<Vec<Chat>> for ChatList {
    type Error = ChatError;

    fn try_from(chats: Vec<Chat>) -> Result<Self> {
        Self::from_chats(chats)
    }
}

impl From<ChatList> for Vec<Chat> {
    fn from(list: ChatList) -> Self {
        list.chats
    }
}

impl<'a> IntoIterator for &'a ChatList {
    type Item = &'a Chat;
    type IntoIter = std::slice::Iter<'a, Chat>;

    fn into_iter(self) -> Self::IntoIter {
        self.chats.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(list: &ChatList) -> Vec<&str> {
        list.iter().map(|c| c.title()).collect()
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut list = ChatList::new();
        list.prepend(Chat::new("Project Ideas", "hi")).unwrap();
        list.prepend(Chat::new("Getting Started", "hi")).unwrap();
        list.prepend(Chat::new("New Conversation", "hi")).unwrap();

        assert_eq!(
            titles(&list),
            vec!["New Conversation", "Getting Started", "Project Ideas"]
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let chat = Chat::new("Getting Started", "hi");
        let mut list = ChatList::new();
        list.prepend(chat.clone()).unwrap();

        assert_eq!(
            list.prepend(chat.clone()),
            Err(ChatError::DuplicateId(chat.id().to_string()))
        );
        assert!(ChatList::from_chats(vec![chat.clone(), chat]).is_err());
    }

    #[test]
    fn test_append_and_remove() {
        let mut list = ChatList::new();
        let chat = Chat::new("Getting Started", "hi");
        let id = chat.id().to_string();
        list.prepend(chat).unwrap();

        let updated = list.append_message(&id, Message::user("hello")).unwrap();
        assert_eq!(updated.message_count(), 2);

        let removed = list.remove(&id).unwrap();
        assert_eq!(removed.title(), "Getting Started");
        assert!(list.is_empty());
        assert!(list.remove(&id).is_none());
        assert_eq!(
            list.append_message(&id, Message::user("late")).unwrap_err(),
            ChatError::NotFound(id)
        );
    }

    #[test]
    fn test_search_preserves_order() {
        let mut list = ChatList::new();
        list.prepend(Chat::new("Rust ideas", "hi")).unwrap();
        list.prepend(Chat::new("Groceries", "hi")).unwrap();
        list.prepend(Chat::new("Project Ideas", "hi")).unwrap();

        let found: Vec<&str> = list.search("ideas").iter().map(|c| c.title()).collect();
        assert_eq!(found, vec!["Project Ideas", "Rust ideas"]);
        assert_eq!(list.search("").len(), 3);
        assert!(list.search("weather").is_empty());
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let chat = Chat::new("Getting Started", "hi");
        let json = serde_json::to_string(&vec![chat.clone(), chat]).unwrap();
        assert!(serde_json::from_str::<ChatList>(&json).is_err());
    }
}
