mod models;

pub use self::models::{Message, NewMessage, Status};
use crate::schema::messages;
use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::SqliteConnection;

pub struct Database {
    connection: SqliteConnection,
}

impl Database {
    /// Open a connection to the SQLite database at `db_uri`
    pub fn open(db_uri: &str) -> Result<Self> {
        let connection = SqliteConnection::establish(db_uri)
            .with_context(|| format!("Failed to open SQLite database {db_uri}"))?;
        Ok(Self { connection })
    }

    /// Create the messages table if it doesn't exist yet
    pub fn init(&mut self, max_field_length: usize) -> Result<()> {
        diesel::sql_query(format!(
            "
CREATE TABLE IF NOT EXISTS messages (
  id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
  sender VARCHAR({max_field_length}) NOT NULL,
  receiver VARCHAR({max_field_length}) NOT NULL,
  message VARCHAR({max_field_length}) NOT NULL,
  subject VARCHAR({max_field_length}) NOT NULL,
  status VARCHAR({max_field_length}) NOT NULL,
  creation_date VARCHAR({max_field_length}) NOT NULL
)"
        ))
        .execute(&mut self.connection)
        .context("Failed to create SQLite tables")?;
        Ok(())
    }

    /// Read every message in a receiver's mailbox, oldest first
    pub fn get_messages(&mut self, receiver: &str) -> Result<Vec<Message>> {
        messages::table
            .filter(messages::receiver.eq(receiver))
            .order(messages::id.asc())
            .load(&mut self.connection)
            .context("Failed to load messages from the database")
    }

    /// Read the messages in a receiver's mailbox that haven't been read yet
    pub fn get_unread_messages(&mut self, receiver: &str) -> Result<Vec<Message>> {
        messages::table
            .filter(messages::receiver.eq(receiver))
            .filter(messages::status.eq(Status::Unread.as_str()))
            .order(messages::id.asc())
            .load(&mut self.connection)
            .context("Failed to load unread messages from the database")
    }

    /// Read the most recently written message in a receiver's mailbox
    pub fn get_latest_message(&mut self, receiver: &str) -> Result<Option<Message>> {
        messages::table
            .filter(messages::receiver.eq(receiver))
            .order(messages::id.desc())
            .first(&mut self.connection)
            .optional()
            .context("Failed to load latest message from the database")
    }

    /// Set the status of already loaded messages, both in the database and in `rows`
    pub fn set_status(&mut self, rows: &mut [Message], status: Status) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        self.connection
            .transaction::<_, diesel::result::Error, _>(move |conn| {
                diesel::update(messages::table.filter(messages::id.eq_any(ids)))
                    .set(messages::status.eq(status.as_str()))
                    .execute(conn)
            })
            .context("Failed to update message status in the database")?;

        for row in rows {
            row.status = status.as_str().to_owned();
        }
        Ok(())
    }

    /// Delete every message addressed to `receiver` and every message written by `sender`
    /// The two filters are applied independently, so passing both deletes the union of their matches.
    pub fn delete_messages(&mut self, sender: Option<&str>, receiver: Option<&str>) -> Result<usize> {
        self.connection
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let mut deleted = 0;
                if let Some(receiver) = receiver {
                    deleted += diesel::delete(
                        messages::table.filter(messages::receiver.eq(receiver)),
                    )
                    .execute(conn)?;
                }
                if let Some(sender) = sender {
                    deleted +=
                        diesel::delete(messages::table.filter(messages::sender.eq(sender)))
                            .execute(conn)?;
                }
                Ok(deleted)
            })
            .context("Failed to delete messages from the database")
    }

    /// Record a new message and return it with its assigned id
    pub fn insert_message(&mut self, new_message: &NewMessage) -> Result<Message> {
        diesel::insert_into(messages::table)
            .values(new_message)
            .get_result(&mut self.connection)
            .context("Failed to save message to the database")
    }

    /// Count the messages in a receiver's mailbox
    pub fn count_messages(&mut self, receiver: &str) -> Result<i64> {
        messages::table
            .filter(messages::receiver.eq(receiver))
            .count()
            .get_result(&mut self.connection)
            .context("Failed to count messages in the database")
    }
}
