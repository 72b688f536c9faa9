/**
 * Post Model
 *
 * Posts snapshot the author's name and avatar at creation time. Likes and
 * comments are kept newest-first; a user appears at most once in `likes`.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::models::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(user: Uuid, text: String, name: String, avatar: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            text,
            name,
            avatar,
            date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Author id
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

impl Post {
    /// New post by `author`, with the author's current name and avatar
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: author.id,
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        }
    }

    pub fn is_liked_by(&self, user: Uuid) -> bool {
        self.likes.iter().any(|like| like.user == user)
    }

    /// Prepend a like; `false` if `user` already liked the post
    pub fn like(&mut self, user: Uuid) -> bool {
        if self.is_liked_by(user) {
            return false;
        }
        self.likes.insert(
            0,
            Like {
                id: Uuid::new_v4(),
                user,
            },
        );
        true
    }

    /// Remove `user`'s like; `false` if there was none
    pub fn unlike(&mut self, user: Uuid) -> bool {
        match self.likes.iter().position(|like| like.user == user) {
            Some(index) => {
                self.likes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Prepend a comment
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn find_comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    /// Remove and return the comment with `comment_id`
    pub fn remove_comment(&mut self, comment_id: Uuid) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == comment_id)?;
        Some(self.comments.remove(index))
    }
}
