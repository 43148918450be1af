use crate::database::Message;
use std::collections::BTreeMap;

/// Key messages by their id for a JSON response
/// Accepts a single message as well as a list, since `Option<Message>` and `Vec<Message>` both iterate.
pub fn message_map(messages: impl IntoIterator<Item = Message>) -> BTreeMap<i32, Message> {
    messages
        .into_iter()
        .map(|message| (message.id, message))
        .collect()
}
