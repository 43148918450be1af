use crate::schema::messages;
use diesel::prelude::*;
use serde::Serialize;

/*
 * The status column is plain text. Every message starts out unread and is
 * flipped to read the first time any fetch returns it. Nothing ever sets it
 * back to unread.
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Unread,
    Read,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Queryable, Serialize)]
#[diesel(table_name = messages)]
pub struct Message {
    pub id: i32,
    pub sender: String,
    pub receiver: String,
    pub message: String,
    pub subject: String,
    pub status: String,
    pub creation_date: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessage<'a> {
    pub sender: &'a str,
    pub receiver: &'a str,
    pub message: &'a str,
    pub subject: &'a str,
    pub status: &'a str,
    pub creation_date: String,
}

impl<'a> NewMessage<'a> {
    /// Build an unread message stamped with the current local time
    pub fn unread(sender: &'a str, receiver: &'a str, message: &'a str, subject: &'a str) -> Self {
        Self {
            sender,
            receiver,
            message,
            subject,
            status: Status::Unread.as_str(),
            creation_date: chrono::Local::now()
                .format("%d-%m-%Y %H:%M:%S")
                .to_string(),
        }
    }
}
